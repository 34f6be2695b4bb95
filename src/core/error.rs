//! Error types describing the failure modes of topology indexing and evaluation.
//!
//! These enums let library consumers bubble up a single [`FfError`] while
//! still inspecting fine-grained context (which bonded term, which atom
//! types) when they need to log or display a precise diagnostic.

use thiserror::Error;

/// Which bonded term family a parameter-resolution failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    AtomType,
    Bond,
    Angle,
    Dihedral,
    Improper,
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TermKind::AtomType => "atom type",
            TermKind::Bond => "bond",
            TermKind::Angle => "angle",
            TermKind::Dihedral => "dihedral",
            TermKind::Improper => "improper",
        };
        f.write_str(s)
    }
}

/// Root error emitted by every fallible operation in the evaluator.
///
/// Each variant corresponds to one failure mode: a bonded term (or atom
/// type) that could not be resolved against the parameter tables, a shape
/// mismatch between coordinates/box and the atom count, or a configuration
/// that is internally inconsistent.
#[derive(Debug, Error)]
pub enum FfError {
    /// A bonded term refers to an atom-type tuple absent from the parameter
    /// tables after exact, reversed, wildcard, and (for impropers)
    /// permutation-plus-center-relocation resolution.
    #[error("missing {kind} parameters for atom types {types:?}")]
    ParameterMissing { kind: TermKind, types: Vec<String> },

    /// Coordinates and box dimensions disagree with one another or with the
    /// atom count the topology was built with.
    #[error("invalid coordinate/box shape: {0}")]
    InvalidShape(String),

    /// The requested configuration is internally inconsistent (e.g. `rfa`
    /// enabled with a zero cutoff, or an unknown between-sets selector).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
