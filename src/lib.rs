//! Evaluates classical molecular-mechanics force-field energies and forces
//! for one or many coordinate frames: Lennard-Jones and Coulomb non-bonded
//! interactions (with NBFix overrides and an optional reaction-field
//! cutoff), harmonic bond and angle terms, and periodic-Fourier torsions
//! covering both proper dihedrals and impropers.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use ffeval::Vec3;
//! use ffeval::topology::{ParameterSet, Topology};
//! use ffeval::topology::params::AtomTypeParams;
//! use ffeval::{Evaluator, EvaluatorConfig, Frame};
//!
//! let topo = Topology::new(
//!     vec!["AR".to_string(), "AR".to_string()],
//!     vec![0.0, 0.0],
//!     vec![],
//!     vec![],
//!     vec![],
//!     vec![],
//! )
//! .unwrap();
//!
//! let mut atom_types = HashMap::new();
//! atom_types.insert(
//!     "AR".to_string(),
//!     AtomTypeParams { sigma: 3.4, epsilon: 0.238, sigma_14: 3.4, epsilon_14: 0.238 },
//! );
//! let params = ParameterSet { atom_types, ..Default::default() };
//!
//! let evaluator = Evaluator::new(&topo, &params, EvaluatorConfig::default()).unwrap();
//! let frame = Frame::non_periodic(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0)]);
//! let energies = evaluator.evaluate_energies(&[frame]).unwrap();
//! assert!(energies[0][1].is_finite()); // vdw component
//! ```

pub mod core;
pub mod evaluator;
pub mod kernels;
pub mod topology;

pub use crate::core::{FfError, TermKind};
pub use crate::evaluator::{
    BetweenSets, EnergyRow, EvaluationOutput, Evaluator, EvaluatorConfig, Frame, FormattedEnergies,
};
pub use crate::topology::{ParameterSet, PackedTopology, Topology, TopologyError};

pub use nalgebra::Vector3 as Vec3;
