//! Force-field parameter tables keyed by tuples of atom-type labels.
//!
//! Tables preserve the insertion order they were given in, because wildcard
//! resolution scans entries in that order and the first match wins. Exact
//! lookups are still `O(1)` via a side index.

use std::collections::HashMap;

/// Lennard-Jones parameters for one atom type: `σ`/`ε` for ordinary pairs and
/// `σ₁₄`/`ε₁₄` for 1-4 pairs, all in Å and kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AtomTypeParams {
    pub sigma: f64,
    pub epsilon: f64,
    pub sigma_14: f64,
    pub epsilon_14: f64,
}

/// Harmonic bond stretch parameters: stiffness `k` (kcal/mol/Å²) and
/// equilibrium length `r0` (Å).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BondParams {
    pub k: f64,
    pub r0: f64,
}

/// Harmonic angle bend parameters: stiffness `k` (kcal/mol/rad²) and
/// equilibrium angle `theta0_deg` (degrees, as stored at the parameter-table
/// boundary; the indexer converts to radians).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AngleParams {
    pub k: f64,
    pub theta0_deg: f64,
}

/// One Fourier component of a proper-dihedral or periodic-improper torsion
/// term, plus the 1-4 scaling factors it contributes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DihedralComponent {
    pub k: f64,
    pub phase_deg: f64,
    /// Periodicity; must be >= 1 for a valid Fourier component.
    pub n: i32,
    /// 1-4 van der Waals scale divisor.
    pub scnb: f64,
    /// 1-4 electrostatic scale divisor.
    pub scee: f64,
}

/// Harmonic (non-periodic) improper parameters: stiffness `k` and
/// equilibrium out-of-plane angle `psi_eq_deg` (degrees).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImproperParams {
    pub k: f64,
    pub psi_eq_deg: f64,
}

/// Periodic-improper parameters, structurally identical to a single
/// [`DihedralComponent`] minus the 1-4 scaling (impropers don't define 1-4
/// pairs of their own).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImproperPeriodicParams {
    pub k: f64,
    pub phase_deg: f64,
    pub n: i32,
}

/// Explicit per-pair Lennard-Jones override for a specified unordered atom
/// type pair, expressed in the upstream `r_min`/`ε` convention rather than
/// the `sigma`/`epsilon` form the packed topology resolves it to.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NbFixParams {
    pub r_min: f64,
    pub epsilon: f64,
    pub r_min_14: f64,
    pub epsilon_14: f64,
}

/// Urey-Bradley 1-3 stretch stiffness. Present only so the indexer can
/// detect and warn about unimplemented Urey-Bradley terms.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UreyBradleyParams {
    pub k: f64,
}

/// An order-preserving, wildcard-aware lookup table keyed by a tuple of
/// atom-type labels (stored as `Vec<String>` so keys of different arities can
/// share the same table type).
#[derive(Debug, Clone)]
pub struct ParamTable<V> {
    entries: Vec<(Vec<String>, V)>,
    exact: HashMap<Vec<String>, usize>,
}

impl<V> Default for ParamTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            exact: HashMap::new(),
        }
    }
}

impl<V> ParamTable<V> {
    /// Builds a table from an ordered list of `(key, value)` pairs. Earlier
    /// entries win ties in the exact-match index; the original order is
    /// preserved for the wildcard scan regardless.
    pub fn new(entries: Vec<(Vec<String>, V)>) -> Self {
        let mut exact = HashMap::with_capacity(entries.len());
        for (i, (key, _)) in entries.iter().enumerate() {
            exact.entry(key.clone()).or_insert(i);
        }
        Self { entries, exact }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `O(1)` exact-key lookup.
    pub fn get_exact(&self, key: &[String]) -> Option<&V> {
        self.exact.get(key).map(|&i| &self.entries[i].1)
    }

    /// Iterates entries in table (insertion) order, for wildcard scanning.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], &V)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }
}

/// The complete set of force-field parameter tables the indexer resolves
/// bonded terms against.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    pub atom_types: HashMap<String, AtomTypeParams>,
    pub bond_types: ParamTable<BondParams>,
    pub angle_types: ParamTable<AngleParams>,
    pub dihedral_types: ParamTable<Vec<DihedralComponent>>,
    pub improper_types: ParamTable<ImproperParams>,
    pub improper_periodic_types: ParamTable<ImproperPeriodicParams>,
    /// Keyed by the unordered pair `(type_a, type_b)`; the indexer matches
    /// either orientation.
    pub nbfix_types: Vec<(String, String, NbFixParams)>,
    pub urey_bradley_types: Vec<(Vec<String>, UreyBradleyParams)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_lookup_finds_entry() {
        let table = ParamTable::new(vec![(k(&["CT", "HC"]), BondParams { k: 1.0, r0: 1.1 })]);
        assert_eq!(table.get_exact(&k(&["CT", "HC"])).unwrap().r0, 1.1);
        assert!(table.get_exact(&k(&["HC", "CT"])).is_none());
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let table = ParamTable::new(vec![
            (k(&["X", "CT", "HC"]), AngleParams { k: 1.0, theta0_deg: 109.5 }),
            (k(&["CT", "CT", "HC"]), AngleParams { k: 2.0, theta0_deg: 110.0 }),
        ]);
        let keys: Vec<_> = table.iter().map(|(key, _)| key.to_vec()).collect();
        assert_eq!(keys, vec![k(&["X", "CT", "HC"]), k(&["CT", "CT", "HC"])]);
    }
}
