//! Converts a raw [`Topology`] plus a [`ParameterSet`] into the dense,
//! index-friendly [`PackedTopology`] the kernels read.
//!
//! All wildcard and permutation matching is done exactly once, here, never in
//! a kernel's hot loop.

use std::collections::{HashMap, HashSet};

use crate::core::error::{FfError, TermKind};
use crate::topology::model::Topology;
use crate::topology::packed::{
    BondedNeighbor, Csr, PackedAngle, PackedTopology, ResolvedNbFix, Scaled14, TorsionComponent,
};
use crate::topology::params::{ParamTable, ParameterSet};

const WILDCARD: &str = "X";

/// Builds the packed, resolved topology arrays from raw connectivity and a
/// parameter set.
pub fn build(topology: &Topology, parameters: &ParameterSet) -> Result<PackedTopology, FfError> {
    warn_urey_bradley_once(parameters);

    let n_atoms = topology.n_atoms();

    let mut unique_types: Vec<String> = topology.atom_types.clone();
    unique_types.sort();
    unique_types.dedup();

    let type_index: Vec<usize> = topology
        .atom_types
        .iter()
        .map(|t| unique_types.binary_search(t).expect("type was just interned"))
        .collect();

    let lj_table = unique_types
        .iter()
        .map(|t| {
            parameters
                .atom_types
                .get(t)
                .copied()
                .ok_or_else(|| FfError::ParameterMissing {
                    kind: TermKind::AtomType,
                    types: vec![t.clone()],
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let nbfix = build_nbfix(&unique_types, parameters);

    let mut excl_rows: Vec<HashSet<usize>> = vec![HashSet::new(); n_atoms];
    let mut bond_rows: Vec<Vec<BondedNeighbor>> = vec![Vec::new(); n_atoms];

    for bond in &topology.bonds {
        let (lo, hi) = ordered_pair(bond[0], bond[1]);
        let key = [
            topology.atom_types[bond[0]].clone(),
            topology.atom_types[bond[1]].clone(),
        ];
        let params = resolve(&key, &parameters.bond_types, false).ok_or_else(|| {
            FfError::ParameterMissing {
                kind: TermKind::Bond,
                types: key.to_vec(),
            }
        })?;
        excl_rows[lo].insert(hi);
        bond_rows[lo].push(BondedNeighbor {
            j: hi,
            k: params.k,
            r0: params.r0,
        });
    }

    let mut angles = Vec::with_capacity(topology.angles.len());
    for &[a, b, c] in &topology.angles {
        let (lo, hi) = ordered_pair(a, c);
        excl_rows[lo].insert(hi);

        let key = [
            topology.atom_types[a].clone(),
            topology.atom_types[b].clone(),
            topology.atom_types[c].clone(),
        ];
        let params = resolve(&key, &parameters.angle_types, false).ok_or_else(|| {
            FfError::ParameterMissing {
                kind: TermKind::Angle,
                types: key.to_vec(),
            }
        })?;
        angles.push(PackedAngle {
            a,
            b,
            c,
            k: params.k,
            theta0: params.theta0_deg.to_radians(),
        });
    }

    let mut vdw14_rows: Vec<Vec<Scaled14>> = vec![Vec::new(); n_atoms];
    let mut elec14_rows: Vec<Vec<Scaled14>> = vec![Vec::new(); n_atoms];
    let mut dihedrals = Vec::with_capacity(topology.dihedrals.len());
    let mut seen_dihedrals: HashSet<[usize; 4]> = HashSet::new();

    for &atoms in &topology.dihedrals {
        let mut canonical = atoms;
        canonical.sort_unstable();
        if !seen_dihedrals.insert(canonical) {
            continue;
        }

        let key: Vec<String> = atoms.iter().map(|&i| topology.atom_types[i].clone()).collect();
        let components = resolve(&key, &parameters.dihedral_types, true).ok_or_else(|| {
            FfError::ParameterMissing {
                kind: TermKind::Dihedral,
                types: key.clone(),
            }
        })?;

        let (lo, hi) = ordered_pair(atoms[0], atoms[3]);
        if let Some(first) = components.first() {
            vdw14_rows[lo].push(Scaled14 {
                j: hi,
                scale: first.scnb,
            });
            elec14_rows[lo].push(Scaled14 {
                j: hi,
                scale: first.scee,
            });
        }

        let packed_components = components
            .iter()
            .map(|c| TorsionComponent {
                k: c.k,
                phase: c.phase_deg.to_radians(),
                n: c.n,
            })
            .collect();

        dihedrals.push(crate::topology::packed::PackedTorsion {
            atoms,
            components: packed_components,
        });
    }

    let mut impropers = Vec::with_capacity(topology.impropers.len());
    for &atoms in &topology.impropers {
        let types: [String; 4] = std::array::from_fn(|k| topology.atom_types[atoms[k]].clone());
        let component = resolve_improper(&types, &atoms, &topology.bonds, parameters)
            .ok_or_else(|| FfError::ParameterMissing {
                kind: TermKind::Improper,
                types: types.to_vec(),
            })?;
        impropers.push(crate::topology::packed::PackedTorsion {
            atoms,
            components: vec![component],
        });
    }

    let exclusions = Csr::from_rows(
        excl_rows
            .into_iter()
            .map(|s| {
                let mut v: Vec<usize> = s.into_iter().collect();
                v.sort_unstable();
                v
            })
            .collect(),
    );
    let bonds = Csr::from_rows(bond_rows);
    let vdw14 = Csr::from_rows(vdw14_rows);
    let elec14 = Csr::from_rows(elec14_rows);

    Ok(PackedTopology {
        n_atoms,
        charges: topology.charges.clone(),
        type_index,
        lj_table,
        nbfix,
        exclusions,
        bonds,
        vdw14,
        elec14,
        angles,
        dihedrals,
        impropers,
    })
}

fn ordered_pair(i: usize, j: usize) -> (usize, usize) {
    if i < j { (i, j) } else { (j, i) }
}

fn warn_urey_bradley_once(parameters: &ParameterSet) {
    let has_active_ub = parameters
        .urey_bradley_types
        .iter()
        .any(|(_, p)| p.k != 0.0);
    if has_active_ub {
        log::warn!(
            "Urey-Bradley terms found in the parameters but are not implemented in this \
             evaluator and will be ignored"
        );
    }
}

fn build_nbfix(
    unique_types: &[String],
    parameters: &ParameterSet,
) -> HashMap<(usize, usize), ResolvedNbFix> {
    const SIGMA_FROM_RMIN: f64 = 0.890_898_7; // 2^(-1/6)

    let mut map = HashMap::new();
    for (ta, tb, p) in &parameters.nbfix_types {
        let (Ok(ia), Ok(ib)) = (
            unique_types.binary_search(ta),
            unique_types.binary_search(tb),
        ) else {
            continue;
        };
        let key = if ia < ib { (ia, ib) } else { (ib, ia) };
        map.insert(
            key,
            ResolvedNbFix {
                epsilon: p.epsilon,
                sigma: p.r_min * SIGMA_FROM_RMIN,
                epsilon_14: p.epsilon_14,
                sigma_14: p.r_min_14 * SIGMA_FROM_RMIN,
            },
        );
    }
    map
}

/// Exact, then (if `allow_reverse`) reversed, then wildcard lookup, in that
/// order. Wildcard candidates are scanned in the table's own iteration
/// order; the first position-wise match wins.
fn resolve<V: Clone>(key: &[String], table: &ParamTable<V>, allow_reverse: bool) -> Option<V> {
    if let Some(v) = table.get_exact(key) {
        return Some(v.clone());
    }
    if allow_reverse {
        let reversed: Vec<String> = key.iter().rev().cloned().collect();
        if let Some(v) = table.get_exact(&reversed) {
            return Some(v.clone());
        }
    }
    wildcard_scan(key, table)
}

fn wildcard_scan<V: Clone>(key: &[String], table: &ParamTable<V>) -> Option<V> {
    for (candidate, value) in table.iter() {
        if candidate.len() != key.len() || !candidate.iter().any(|t| t == WILDCARD) {
            continue;
        }
        let matches = candidate
            .iter()
            .zip(key.iter())
            .all(|(c, k)| c == WILDCARD || c == k);
        if matches {
            return Some(value.clone());
        }
    }
    None
}

/// Resolves an improper's `(k, φ₀/ψ_eq, n)` by the permutation-plus-
/// center-relocation procedure: try every ordering fixing each candidate as
/// the center, and if none match, fall back to detecting the center from the
/// bond graph and retrying.
fn resolve_improper(
    types: &[String; 4],
    atom_ids: &[usize; 4],
    bonds: &[[usize; 2]],
    parameters: &ParameterSet,
) -> Option<TorsionComponent> {
    if let Some(c) = scan_improper_permutations(types, parameters) {
        return Some(c);
    }

    let center_id = detect_improper_center(atom_ids, bonds)?;
    let mut others: Vec<(usize, String)> = atom_ids
        .iter()
        .zip(types.iter())
        .filter(|(&id, _)| id != center_id)
        .map(|(&id, t)| (id, t.clone()))
        .collect();
    others.sort_by(|a, b| a.1.cmp(&b.1));
    if others.len() != 3 {
        return None;
    }
    let center_type = types[atom_ids.iter().position(|&id| id == center_id)?].clone();
    let relocated = [
        others[0].1.clone(),
        others[1].1.clone(),
        center_type,
        others[2].1.clone(),
    ];
    scan_improper_permutations(&relocated, parameters)
}

/// Tries all orderings of the three non-center positions with position 2
/// fixed as the center, against the explicit and periodic improper tables,
/// exact then wildcard.
fn scan_improper_permutations(
    types: &[String; 4],
    parameters: &ParameterSet,
) -> Option<TorsionComponent> {
    const ORDERINGS: [[usize; 3]; 6] = [
        [0, 1, 3],
        [0, 3, 1],
        [1, 0, 3],
        [1, 3, 0],
        [3, 0, 1],
        [3, 1, 0],
    ];

    for ordering in ORDERINGS {
        let key = [
            types[ordering[0]].clone(),
            types[ordering[1]].clone(),
            types[2].clone(),
            types[ordering[2]].clone(),
        ];

        if let Some(p) = parameters.improper_types.get_exact(&key) {
            return Some(TorsionComponent {
                k: p.k,
                phase: p.psi_eq_deg.to_radians(),
                n: 0,
            });
        }
        if let Some(p) = parameters.improper_periodic_types.get_exact(&key) {
            return Some(TorsionComponent {
                k: p.k,
                phase: p.phase_deg.to_radians(),
                n: p.n,
            });
        }
        if let Some(p) = wildcard_scan(&key, &parameters.improper_types) {
            return Some(TorsionComponent {
                k: p.k,
                phase: p.psi_eq_deg.to_radians(),
                n: 0,
            });
        }
        if let Some(p) = wildcard_scan(&key, &parameters.improper_periodic_types) {
            return Some(TorsionComponent {
                k: p.k,
                phase: p.phase_deg.to_radians(),
                n: p.n,
            });
        }
    }
    None
}

/// Finds the atom among `atom_ids` whose neighbors (restricted to the other
/// three atoms in `atom_ids`, via `bonds`) number exactly three.
fn detect_improper_center(atom_ids: &[usize; 4], bonds: &[[usize; 2]]) -> Option<usize> {
    let set: HashSet<usize> = atom_ids.iter().copied().collect();
    for &candidate in atom_ids {
        let neighbor_count = bonds
            .iter()
            .filter(|b| {
                (b[0] == candidate && set.contains(&b[1]))
                    || (b[1] == candidate && set.contains(&b[0]))
            })
            .count();
        if neighbor_count == 3 {
            return Some(candidate);
        }
    }
    None
}
