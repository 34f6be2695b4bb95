//! The upstream-shaped molecular topology: atoms, charges, and bonded
//! connectivity expressed as plain atom-index tuples.
//!
//! This is the typed input the force-field evaluator is constructed from. It
//! carries no resolved parameters and no derived structure (exclusions,
//! 1-4 lists, …) — that work belongs to [`crate::topology::indexer`].

/// A molecular topology as produced by an upstream structure-file reader or
/// atom-typing pipeline.
///
/// # Examples
///
/// ```
/// use ffeval::topology::Topology;
///
/// let topo = Topology::new(
///     vec!["OW".to_string(), "HW".to_string(), "HW".to_string()],
///     vec![-0.834, 0.417, 0.417],
///     vec![[0, 1], [0, 2]],
///     vec![[1, 0, 2]],
///     vec![],
///     vec![],
/// )
/// .unwrap();
/// assert_eq!(topo.n_atoms(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Topology {
    /// Atom-type label for each atom, interned into the unique-type table by
    /// the indexer.
    pub atom_types: Vec<String>,
    /// Partial charge for each atom, in elementary units.
    pub charges: Vec<f64>,
    /// Bonds as `[i, j]` atom-index pairs.
    pub bonds: Vec<[usize; 2]>,
    /// Angles as `[a, b, c]` atom-index triples, `b` the central atom.
    pub angles: Vec<[usize; 3]>,
    /// Proper dihedrals as `[a, b, c, d]` atom-index quadruples.
    pub dihedrals: Vec<[usize; 4]>,
    /// Impropers as `[a, b, c, d]` atom-index quadruples. The chemical center
    /// is conventionally at position 2 (`c`); the indexer relocates it when
    /// that convention is not honored.
    pub impropers: Vec<[usize; 4]>,
}

/// Error returned by [`Topology::new`] when the atom/bond/angle/dihedral
/// indices are internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("atom_types has {types} entries but charges has {charges}")]
    ChargeCountMismatch { types: usize, charges: usize },
    #[error("{term} references atom index {index}, but there are only {n_atoms} atoms")]
    AtomIndexOutOfBounds {
        term: &'static str,
        index: usize,
        n_atoms: usize,
    },
}

impl Topology {
    /// Builds a topology, validating that every referenced atom index is in
    /// bounds and that `atom_types` and `charges` agree in length.
    pub fn new(
        atom_types: Vec<String>,
        charges: Vec<f64>,
        bonds: Vec<[usize; 2]>,
        angles: Vec<[usize; 3]>,
        dihedrals: Vec<[usize; 4]>,
        impropers: Vec<[usize; 4]>,
    ) -> Result<Self, TopologyError> {
        if atom_types.len() != charges.len() {
            return Err(TopologyError::ChargeCountMismatch {
                types: atom_types.len(),
                charges: charges.len(),
            });
        }
        let n_atoms = atom_types.len();

        let check = |term: &'static str, idx: usize| -> Result<(), TopologyError> {
            if idx >= n_atoms {
                Err(TopologyError::AtomIndexOutOfBounds {
                    term,
                    index: idx,
                    n_atoms,
                })
            } else {
                Ok(())
            }
        };
        for b in &bonds {
            check("bond", b[0])?;
            check("bond", b[1])?;
        }
        for a in &angles {
            for &idx in a {
                check("angle", idx)?;
            }
        }
        for d in &dihedrals {
            for &idx in d {
                check("dihedral", idx)?;
            }
        }
        for i in &impropers {
            for &idx in i {
                check("improper", idx)?;
            }
        }

        Ok(Self {
            atom_types,
            charges,
            bonds,
            angles,
            dihedrals,
            impropers,
        })
    }

    /// Number of atoms in the topology.
    pub fn n_atoms(&self) -> usize {
        self.atom_types.len()
    }
}
