//! Dense, read-only arrays produced by [`crate::topology::indexer::build`]
//! and consumed by the kernels. Ragged per-atom lists (exclusions, bonds,
//! 1-4 scaling) are packed as CSR (offsets + values) rather than padded
//! `[N, max_width]` tables: a `Vec`-backed row slice is just as cheap to
//! iterate linearly as a fixed-stride, sentinel-padded array, without the
//! wasted space a ragged distribution of neighbor counts would produce.

/// A ragged per-atom array in compressed-sparse-row form: row `i` is
/// `values[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, Default)]
pub struct Csr<T> {
    offsets: Vec<usize>,
    values: Vec<T>,
}

impl<T> Csr<T> {
    /// Builds a CSR structure from a `Vec` of per-row value lists.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut values = Vec::new();
        offsets.push(0);
        for row in rows {
            values.extend(row);
            offsets.push(values.len());
        }
        Self { offsets, values }
    }

    pub fn n_rows(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.values[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// A bonded 1-2 neighbor of some atom `i`, with `j > i` (canonical form).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondedNeighbor {
    pub j: usize,
    pub k: f64,
    pub r0: f64,
}

/// A 1-4 scaling partner of some atom `i`, with `j > i` (canonical form).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled14 {
    pub j: usize,
    pub scale: f64,
}

/// An NBFix override already converted to the `(ε, σ)` convention the
/// kernels use, for both ordinary and 1-4 pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedNbFix {
    pub epsilon: f64,
    pub sigma: f64,
    pub epsilon_14: f64,
    pub sigma_14: f64,
}

/// A resolved harmonic angle term over atoms `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedAngle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub k: f64,
    pub theta0: f64,
}

/// One Fourier (or harmonic-improper) component of a torsion term, already
/// converted to radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionComponent {
    pub k: f64,
    pub phase: f64,
    /// Periodicity. `n > 0` selects the periodic form; `n <= 0` selects the
    /// harmonic-improper form with `phase` as the equilibrium angle.
    pub n: i32,
}

/// A resolved dihedral or improper term over atoms `(a, b, c, d)`, with the
/// chemical center always at position 2 for impropers.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedTorsion {
    pub atoms: [usize; 4],
    pub components: Vec<TorsionComponent>,
}

/// The immutable, index-friendly arrays the kernels operate over. Built once
/// by [`crate::topology::indexer::build`] from a topology snapshot and a
/// parameter set; read-only for the lifetime of an [`crate::Evaluator`].
#[derive(Debug, Clone)]
pub struct PackedTopology {
    pub n_atoms: usize,
    pub charges: Vec<f64>,
    /// Per-atom index into `lj_table`.
    pub type_index: Vec<usize>,
    pub lj_table: Vec<crate::topology::params::AtomTypeParams>,
    /// NBFix overrides keyed by the unordered `(min(type_a, type_b),
    /// max(type_a, type_b))` type-index pair.
    pub nbfix: std::collections::HashMap<(usize, usize), ResolvedNbFix>,

    /// Per-atom row `i`: the 1-2/1-3 exclusion partners `j > i`.
    pub exclusions: Csr<usize>,
    /// Per-atom row `i`: the 1-2 bonded neighbors `j > i`, with parameters.
    pub bonds: Csr<BondedNeighbor>,
    /// Per-atom row `i`: 1-4 van der Waals scaling partners `j > i`.
    pub vdw14: Csr<Scaled14>,
    /// Per-atom row `i`: 1-4 electrostatic scaling partners `j > i`.
    pub elec14: Csr<Scaled14>,

    pub angles: Vec<PackedAngle>,
    pub dihedrals: Vec<PackedTorsion>,
    pub impropers: Vec<PackedTorsion>,
}
