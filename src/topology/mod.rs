//! Topology input types, parameter tables, resolution (indexing), and the
//! packed arrays the kernels consume.

pub mod indexer;
pub mod model;
pub mod packed;
pub mod params;

pub use model::{Topology, TopologyError};
pub use packed::PackedTopology;
pub use params::ParameterSet;
