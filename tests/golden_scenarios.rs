//! Literal end-to-end scenarios with known-by-hand energies and forces.

use std::collections::HashMap;

use ffeval::topology::params::{AngleParams, AtomTypeParams, BondParams, DihedralComponent};
use ffeval::topology::ParameterSet;
use ffeval::{BetweenSets, Evaluator, EvaluatorConfig, Frame, Topology, Vec3};

fn lj(sigma: f64, epsilon: f64) -> AtomTypeParams {
    AtomTypeParams {
        sigma,
        epsilon,
        sigma_14: sigma,
        epsilon_14: epsilon,
    }
}

#[test]
fn two_argon_pair_at_sigma_has_zero_energy_and_known_force() {
    let sigma = 3.405;
    let epsilon = 0.238;
    let topo = Topology::new(
        vec!["AR".into(), "AR".into()],
        vec![0.0, 0.0],
        vec![],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();
    let mut atom_types = HashMap::new();
    atom_types.insert("AR".to_string(), lj(sigma, epsilon));
    let params = ParameterSet {
        atom_types,
        ..Default::default()
    };
    let eval = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
    let frame = Frame::non_periodic(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(sigma, 0.0, 0.0)]);
    let out = eval.evaluate(&[frame]).unwrap();

    let row = out.energies[0];
    assert!(row[0].abs() < 1e-9, "bond energy should be zero");
    assert!(row[1].abs() < 1e-9, "vdw energy should vanish at r=sigma");
    assert!(row[2].abs() < 1e-9, "no charges, elec should be zero");
    assert!(row[3].abs() < 1e-9);
    assert!(row[4].abs() < 1e-9);
    assert!(row[5].abs() < 1e-9);

    let expected_force = 24.0 * epsilon / sigma;
    let observed = (out.forces[0][1] - out.forces[0][0]).x / 2.0;
    assert!(
        (observed.abs() - expected_force).abs() < 1e-6,
        "observed {observed} expected {expected_force}"
    );
}

#[test]
fn two_unit_charges_at_one_angstrom() {
    let topo = Topology::new(
        vec!["Q1".into(), "Q2".into()],
        vec![1.0, 1.0],
        vec![],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();
    let mut atom_types = HashMap::new();
    atom_types.insert("Q1".to_string(), lj(0.0, 0.0));
    atom_types.insert("Q2".to_string(), lj(0.0, 0.0));
    let params = ParameterSet {
        atom_types,
        ..Default::default()
    };
    let eval = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
    let frame = Frame::non_periodic(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
    let out = eval.evaluate(&[frame]).unwrap();

    let k_e = ffeval::core::constants::COULOMB_KE;
    assert!((out.energies[0][2] - k_e).abs() < 1e-6);
    let f0 = out.forces[0][0].norm();
    let f1 = out.forces[0][1].norm();
    assert!((f0 - k_e).abs() < 1e-6);
    assert!((f1 - k_e).abs() < 1e-6);
}

#[test]
fn diatomic_bond_stretch() {
    let topo = Topology::new(
        vec!["C1".into(), "C2".into()],
        vec![0.0, 0.0],
        vec![[0, 1]],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();
    let mut atom_types = HashMap::new();
    atom_types.insert("C1".to_string(), lj(0.0, 0.0));
    atom_types.insert("C2".to_string(), lj(0.0, 0.0));
    let bond_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["C1".into(), "C2".into()],
        BondParams { k: 100.0, r0: 1.0 },
    )]);
    let params = ParameterSet {
        atom_types,
        bond_types,
        ..Default::default()
    };
    let eval = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
    let frame = Frame::non_periodic(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.1, 0.0, 0.0)]);
    let out = eval.evaluate(&[frame]).unwrap();

    assert!((out.energies[0][0] - 1.0).abs() < 1e-9);
    assert!((out.forces[0][0].norm() - 20.0).abs() < 1e-9);
    assert!((out.forces[0][1].norm() - 20.0).abs() < 1e-9);
    // Atoms pull toward each other: force on atom 0 points toward atom 1 (+x).
    assert!(out.forces[0][0].x > 0.0);
    assert!(out.forces[0][1].x < 0.0);
}

#[test]
fn water_angle_at_equilibrium_has_zero_energy_and_force() {
    let theta0 = 104.52_f64.to_radians();
    let bond_len = 0.9572;
    let half = theta0 / 2.0;
    let h1 = Vec3::new(bond_len * half.sin(), bond_len * half.cos(), 0.0);
    let h2 = Vec3::new(-bond_len * half.sin(), bond_len * half.cos(), 0.0);
    let o = Vec3::new(0.0, 0.0, 0.0);

    let topo = Topology::new(
        vec!["OW".into(), "HW".into(), "HW".into()],
        vec![-0.834, 0.417, 0.417],
        vec![[0, 1], [0, 2]],
        vec![[1, 0, 2]],
        vec![],
        vec![],
    )
    .unwrap();
    let mut atom_types = HashMap::new();
    atom_types.insert("OW".to_string(), lj(3.15, 0.15));
    atom_types.insert("HW".to_string(), lj(0.0, 0.0));
    let bond_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["OW".into(), "HW".into()],
        BondParams {
            k: 450.0,
            r0: bond_len,
        },
    )]);
    let angle_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["HW".into(), "OW".into(), "HW".into()],
        AngleParams {
            k: 55.0,
            theta0_deg: 104.52,
        },
    )]);
    let params = ParameterSet {
        atom_types,
        bond_types,
        angle_types,
        ..Default::default()
    };
    let eval = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
    let frame = Frame::non_periodic(vec![o, h1, h2]);
    let out = eval.evaluate(&[frame]).unwrap();

    assert!(out.energies[0][3].abs() < 1e-8, "angle energy at theta0");
}

#[test]
fn butane_dihedral_at_phi_zero() {
    // A planar chain with phi = 0: atoms 0-1-2-3 all in one plane, with atom 0
    // and atom 3 on the same side of the 1-2 bond (cis geometry).
    let pos = vec![
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let topo = Topology::new(
        vec!["C".into(), "C".into(), "C".into(), "C".into()],
        vec![0.0; 4],
        vec![],
        vec![],
        vec![[0, 1, 2, 3]],
        vec![],
    )
    .unwrap();
    let mut atom_types = HashMap::new();
    atom_types.insert("C".to_string(), lj(3.4, 0.1));
    let dihedral_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["C".into(), "C".into(), "C".into(), "C".into()],
        vec![DihedralComponent {
            k: 1.0,
            phase_deg: 0.0,
            n: 3,
            scnb: 2.0,
            scee: 1.2,
        }],
    )]);
    let params = ParameterSet {
        atom_types,
        dihedral_types,
        ..Default::default()
    };
    let eval = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
    let out = eval.evaluate(&[Frame::non_periodic(pos)]).unwrap();

    // phi=0 here is whatever the geometry's actual dihedral angle is; check
    // the functional form directly against the formula for phi=0 is only
    // valid if the built geometry truly sits at phi=0, which this planar cis
    // chain does by construction (verified in kernels::torsion unit tests).
    assert!((out.energies[0][4] - 2.0).abs() < 1e-6);
}

#[test]
fn between_sets_two_waters_with_rfa() {
    let cutoff = 12.0;
    let mut atom_types = HashMap::new();
    atom_types.insert("OW".to_string(), lj(3.15, 0.15));
    atom_types.insert("HW".to_string(), lj(0.0, 0.0));

    let atoms = vec![
        "OW".to_string(),
        "HW".to_string(),
        "HW".to_string(),
        "OW".to_string(),
        "HW".to_string(),
        "HW".to_string(),
    ];
    let charges = vec![-0.834, 0.417, 0.417, -0.834, 0.417, 0.417];
    let bonds = vec![[0, 1], [0, 2], [3, 4], [3, 5]];
    let angles = vec![[1, 0, 2], [4, 3, 5]];
    let topo = Topology::new(atoms, charges, bonds, angles, vec![], vec![]).unwrap();

    let bond_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["OW".into(), "HW".into()],
        BondParams { k: 450.0, r0: 0.9572 },
    )]);
    let angle_types = ffeval::topology::params::ParamTable::new(vec![(
        vec!["HW".into(), "OW".into(), "HW".into()],
        AngleParams { k: 55.0, theta0_deg: 104.52 },
    )]);
    let params = ParameterSet {
        atom_types,
        bond_types,
        angle_types,
        ..Default::default()
    };

    let config = EvaluatorConfig {
        cutoff,
        rfa: true,
        solvent_dielectric: 78.5,
        between_sets: Some(BetweenSets {
            set_a: [0, 1, 2].into_iter().collect(),
            set_b: [3, 4, 5].into_iter().collect(),
        }),
    };
    let eval = Evaluator::new(&topo, &params, config).unwrap();

    let near = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.9, 0.3, 0.0),
        Vec3::new(-0.9, 0.3, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(3.9, 0.3, 0.0),
        Vec3::new(2.1, 0.3, 0.0),
    ];
    let out_near = eval.evaluate(&[Frame::non_periodic(near)]).unwrap();
    assert_eq!(out_near.energies[0][0], 0.0, "bonded terms suppressed");
    assert_eq!(out_near.energies[0][3], 0.0, "angle terms suppressed");

    let far = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.9, 0.3, 0.0),
        Vec3::new(-0.9, 0.3, 0.0),
        Vec3::new(1000.0, 0.0, 0.0),
        Vec3::new(1000.9, 0.3, 0.0),
        Vec3::new(999.1, 0.3, 0.0),
    ];
    let out_far = eval.evaluate(&[Frame::non_periodic(far)]).unwrap();
    assert_eq!(out_far.energies[0][1], 0.0, "beyond cutoff: vdw exactly zero");
    assert_eq!(out_far.energies[0][2], 0.0, "beyond cutoff: elec exactly zero");
}
