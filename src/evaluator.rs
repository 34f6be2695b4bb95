//! The public evaluation entry point: wires a packed topology and its
//! kernels into a per-frame energy/force calculation, optionally run across
//! frames in parallel with `rayon`.

use std::collections::HashSet;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::core::error::FfError;
use crate::core::geometry::min_image;
use crate::kernels::{angle, pair, torsion};
use crate::topology::indexer;
use crate::topology::model::Topology;
use crate::topology::packed::PackedTopology;
use crate::topology::params::ParameterSet;

/// One simulation snapshot: atom coordinates and the periodic box for that
/// frame. A non-positive component of `box_lengths` means that axis is
/// non-periodic (see [`crate::core::geometry`]).
#[derive(Debug, Clone)]
pub struct Frame {
    pub coords: Vec<Vector3<f64>>,
    pub box_lengths: Vector3<f64>,
}

impl Frame {
    /// A frame with no periodic box (every axis non-periodic).
    pub fn non_periodic(coords: Vec<Vector3<f64>>) -> Self {
        Self {
            coords,
            box_lengths: Vector3::zeros(),
        }
    }
}

/// Restricts pairwise evaluation to cross-set pairs and suppresses every
/// bonded term, mirroring an inter-molecular or inter-group interaction
/// query.
#[derive(Debug, Clone)]
pub struct BetweenSets {
    pub set_a: HashSet<usize>,
    pub set_b: HashSet<usize>,
}

impl BetweenSets {
    fn contains_pair(&self, i: usize, j: usize) -> bool {
        (self.set_a.contains(&i) && self.set_b.contains(&j))
            || (self.set_a.contains(&j) && self.set_b.contains(&i))
    }
}

/// Evaluation-wide settings: non-bonded cutoff, reaction-field
/// electrostatics, and an optional between-sets restriction.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Pair distance beyond which LJ/Coulomb/bond terms are skipped. `0.0`
    /// means no cutoff.
    pub cutoff: f64,
    /// Enables the reaction-field approximation for cutoff electrostatics.
    /// Requires `cutoff > 0.0`.
    pub rfa: bool,
    /// Solvent dielectric used by the reaction-field approximation.
    pub solvent_dielectric: f64,
    pub between_sets: Option<BetweenSets>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.0,
            rfa: false,
            solvent_dielectric: crate::core::constants::DEFAULT_SOLVENT_DIELECTRIC,
            between_sets: None,
        }
    }
}

/// The six energy components the evaluator decomposes a system into, in the
/// order `[bond, vdw, elec, angle, dihedral, improper]`.
pub type EnergyRow = [f64; 6];

const BOND: usize = 0;
const VDW: usize = 1;
const ELEC: usize = 2;
const ANGLE: usize = 3;
const DIHEDRAL: usize = 4;
const IMPROPER: usize = 5;

/// Per-frame output: total energy components, per-atom forces, and an
/// approximate per-atom decomposition of the same six components.
#[derive(Debug, Clone)]
pub struct EvaluationOutput {
    pub energies: Vec<EnergyRow>,
    pub forces: Vec<Vec<Vector3<f64>>>,
    pub atom_energies: Vec<Vec<EnergyRow>>,
}

/// Energies formatted the way a caller typically wants to print or log
/// them: named fields instead of a positional array, with a running total.
#[derive(Debug, Clone)]
pub struct FormattedEnergies {
    pub bond: Vec<f64>,
    pub vdw: Vec<f64>,
    pub elec: Vec<f64>,
    pub angle: Vec<f64>,
    pub dihedral: Vec<f64>,
    pub improper: Vec<f64>,
    pub total: Vec<f64>,
}

/// A topology resolved against a parameter set, ready to evaluate one or
/// many coordinate frames.
pub struct Evaluator {
    topology: PackedTopology,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Resolves `topology` against `parameters` into packed arrays and
    /// validates `config`.
    pub fn new(
        topology: &Topology,
        parameters: &ParameterSet,
        config: EvaluatorConfig,
    ) -> Result<Self, FfError> {
        if config.cutoff < 0.0 {
            return Err(FfError::InvalidConfiguration(
                "cutoff must be >= 0.0 (0.0 disables the cutoff)".to_string(),
            ));
        }
        if config.rfa && config.cutoff <= 0.0 {
            return Err(FfError::InvalidConfiguration(
                "rfa requires a positive cutoff".to_string(),
            ));
        }
        let packed = indexer::build(topology, parameters)?;
        Ok(Self {
            topology: packed,
            config,
        })
    }

    pub fn n_atoms(&self) -> usize {
        self.topology.n_atoms
    }

    /// Evaluates every frame, in parallel across frames when more than one
    /// is given. Summation order within a single frame is always
    /// sequential, so repeated calls on the same input are bit-reproducible
    /// regardless of thread count.
    pub fn evaluate(&self, frames: &[Frame]) -> Result<EvaluationOutput, FfError> {
        let results: Vec<Result<FrameResult, FfError>> =
            frames.par_iter().map(|f| self.evaluate_frame(f)).collect();

        let mut energies = Vec::with_capacity(frames.len());
        let mut forces = Vec::with_capacity(frames.len());
        let mut atom_energies = Vec::with_capacity(frames.len());
        for r in results {
            let r = r?;
            energies.push(r.energies);
            forces.push(r.forces);
            atom_energies.push(r.atom_energies);
        }

        Ok(EvaluationOutput {
            energies,
            forces,
            atom_energies,
        })
    }

    /// Convenience wrapper that discards forces and per-atom energies.
    pub fn evaluate_energies(&self, frames: &[Frame]) -> Result<Vec<EnergyRow>, FfError> {
        Ok(self.evaluate(frames)?.energies)
    }

    /// Formats an evaluation's energy rows into named, per-frame vectors.
    pub fn format_energies(output: &EvaluationOutput) -> FormattedEnergies {
        let n = output.energies.len();
        let mut formatted = FormattedEnergies {
            bond: Vec::with_capacity(n),
            vdw: Vec::with_capacity(n),
            elec: Vec::with_capacity(n),
            angle: Vec::with_capacity(n),
            dihedral: Vec::with_capacity(n),
            improper: Vec::with_capacity(n),
            total: Vec::with_capacity(n),
        };
        for row in &output.energies {
            formatted.bond.push(row[BOND]);
            formatted.vdw.push(row[VDW]);
            formatted.elec.push(row[ELEC]);
            formatted.angle.push(row[ANGLE]);
            formatted.dihedral.push(row[DIHEDRAL]);
            formatted.improper.push(row[IMPROPER]);
            formatted.total.push(row.iter().sum());
        }
        formatted
    }

    fn evaluate_frame(&self, frame: &Frame) -> Result<FrameResult, FfError> {
        let n = self.topology.n_atoms;
        if frame.coords.len() != n {
            return Err(FfError::InvalidShape(format!(
                "frame has {} coordinates but the topology has {n} atoms",
                frame.coords.len()
            )));
        }

        let mut energies: EnergyRow = [0.0; 6];
        let mut forces = vec![Vector3::zeros(); n];
        let mut atom_energies = vec![[0.0; 6]; n];

        self.accumulate_pairs(frame, &mut energies, &mut forces, &mut atom_energies);

        if self.config.between_sets.is_none() {
            self.accumulate_angles(frame, &mut energies, &mut forces, &mut atom_energies);
            self.accumulate_torsions(
                frame,
                &self.topology.dihedrals,
                DIHEDRAL,
                &mut energies,
                &mut forces,
                &mut atom_energies,
            );
            self.accumulate_torsions(
                frame,
                &self.topology.impropers,
                IMPROPER,
                &mut energies,
                &mut forces,
                &mut atom_energies,
            );
        }

        Ok(FrameResult {
            energies,
            forces,
            atom_energies,
        })
    }

    fn accumulate_pairs(
        &self,
        frame: &Frame,
        energies: &mut EnergyRow,
        forces: &mut [Vector3<f64>],
        atom_energies: &mut [EnergyRow],
    ) {
        let topo = &self.topology;
        let n = topo.n_atoms;
        let between_sets = self.config.between_sets.as_ref();

        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(sets) = between_sets {
                    if !sets.contains_pair(i, j) {
                        continue;
                    }
                }

                let (is_bonded, bond_k, bond_r0) = if between_sets.is_none() {
                    match topo.bonds.row(i).iter().find(|b| b.j == j) {
                        Some(b) => (true, b.k, b.r0),
                        None => (false, 0.0, 0.0),
                    }
                } else {
                    (false, 0.0, 0.0)
                };
                let is_excluded = between_sets.is_none()
                    && topo.exclusions.row(i).iter().any(|&e| e == j);
                if is_excluded && !is_bonded {
                    continue;
                }

                let d = min_image(frame.coords[i] - frame.coords[j], frame.box_lengths);
                let dist = d.norm();
                if self.config.cutoff != 0.0 && dist > self.config.cutoff {
                    continue;
                }
                let unit = d / dist;

                let mut coeff = 0.0;
                let mut pot_bond = 0.0;
                if is_bonded {
                    let (p, f) = pair::harmonic_bond(dist, bond_k, bond_r0);
                    pot_bond = p;
                    coeff += f;
                }

                let mut pot_vdw = 0.0;
                let mut pot_elec = 0.0;
                if !is_excluded {
                    // Between-sets mode clears the dihedral list the 1-4 lists are
                    // derived from (see DESIGN.md), so a cross-set pair never counts
                    // as a 1-4 partner even if it happens to share a dihedral's endpoints.
                    let found14_vdw = if between_sets.is_none() {
                        topo.vdw14.row(i).iter().find(|s| s.j == j)
                    } else {
                        None
                    };
                    let vdw_scale = found14_vdw.map_or(1.0, |s| s.scale);
                    let nbfix_key = ordered_pair(topo.type_index[i], topo.type_index[j]);
                    let nbfix = topo.nbfix.get(&nbfix_key);
                    let (eps, sigma) = pair::combine_lj(
                        &topo.lj_table[topo.type_index[i]],
                        &topo.lj_table[topo.type_index[j]],
                        nbfix,
                        found14_vdw.is_some(),
                    );
                    let (p, f) = pair::lennard_jones(dist, eps, sigma, vdw_scale);
                    pot_vdw = p;
                    coeff += f;

                    let found14_elec = if between_sets.is_none() {
                        topo.elec14.row(i).iter().find(|s| s.j == j)
                    } else {
                        None
                    };
                    let elec_scale = found14_elec.map_or(1.0, |s| s.scale);
                    let rf = if self.config.rfa {
                        Some(pair::ReactionField {
                            cutoff: self.config.cutoff,
                            solvent_dielectric: self.config.solvent_dielectric,
                        })
                    } else {
                        None
                    };
                    let (p, f) =
                        pair::coulomb(dist, topo.charges[i], topo.charges[j], elec_scale, rf);
                    pot_elec = p;
                    coeff += f;
                }

                energies[BOND] += pot_bond;
                energies[VDW] += pot_vdw;
                energies[ELEC] += pot_elec;
                atom_energies[i][BOND] += pot_bond * 0.5;
                atom_energies[j][BOND] += pot_bond * 0.5;
                atom_energies[i][VDW] += pot_vdw * 0.5;
                atom_energies[j][VDW] += pot_vdw * 0.5;
                atom_energies[i][ELEC] += pot_elec * 0.5;
                atom_energies[j][ELEC] += pot_elec * 0.5;

                forces[i] -= coeff * unit;
                forces[j] += coeff * unit;
            }
        }
    }

    fn accumulate_angles(
        &self,
        frame: &Frame,
        energies: &mut EnergyRow,
        forces: &mut [Vector3<f64>],
        atom_energies: &mut [EnergyRow],
    ) {
        for a in &self.topology.angles {
            let (pot, [fa, fb, fc]) = angle::harmonic_angle(
                frame.coords[a.a],
                frame.coords[a.b],
                frame.coords[a.c],
                a.k,
                a.theta0,
                frame.box_lengths,
            );
            energies[ANGLE] += pot;
            forces[a.a] += fa;
            forces[a.b] += fb;
            forces[a.c] += fc;
            for &idx in &[a.a, a.b, a.c] {
                atom_energies[idx][ANGLE] += pot / 3.0;
            }
        }
    }

    fn accumulate_torsions(
        &self,
        frame: &Frame,
        terms: &[crate::topology::packed::PackedTorsion],
        energy_slot: usize,
        energies: &mut EnergyRow,
        forces: &mut [Vector3<f64>],
        atom_energies: &mut [EnergyRow],
    ) {
        for t in terms {
            let pos = [
                frame.coords[t.atoms[0]],
                frame.coords[t.atoms[1]],
                frame.coords[t.atoms[2]],
                frame.coords[t.atoms[3]],
            ];
            let (pot, fs) = torsion::torsion(&t.components, pos, frame.box_lengths);
            energies[energy_slot] += pot;
            for k in 0..4 {
                forces[t.atoms[k]] += fs[k];
                atom_energies[t.atoms[k]][energy_slot] += pot / 4.0;
            }
        }
    }
}

fn ordered_pair(i: usize, j: usize) -> (usize, usize) {
    if i < j { (i, j) } else { (j, i) }
}

struct FrameResult {
    energies: EnergyRow,
    forces: Vec<Vector3<f64>>,
    atom_energies: Vec<EnergyRow>,
}
