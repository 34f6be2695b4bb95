//! Physical constants and unit conventions shared by every kernel.
//!
//! All energies are in kcal/mol, distances in Å, charges in elementary units,
//! and angles in radians once past the parameter-table boundary.

/// Coulomb prefactor `k_e = 1/(4π ε₀) · e² · N_A / (4184 · 10⁻¹⁰)`, expressed so
/// that `k_e * q_i * q_j / r` comes out in kcal/mol for `r` in Å and `q` in
/// elementary charge units.
///
/// Derived from `1/(4π ε₀)` converted to kcal·Å/(mol·e²) units and folded to
/// a single compile-time constant.
pub const COULOMB_KE: f64 = 332.063_6;

/// Default solvent dielectric used by the reaction-field approximation when
/// the caller does not override it.
pub const DEFAULT_SOLVENT_DIELECTRIC: f64 = 78.5;
