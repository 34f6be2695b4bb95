//! Non-bonded pair kernels: Lennard-Jones, Coulomb (with optional
//! reaction-field approximation), and the harmonic bond stretch that shares
//! the same pairwise loop.
//!
//! Every kernel here returns `(potential, dV/dr)`. The radial derivative,
//! not a vector, is all the pair loop needs: it's accumulated across the
//! bonded/LJ/electrostatic contributions for a pair and then projected onto
//! the unit separation vector once, in `Evaluator`.

use crate::core::constants::COULOMB_KE;
use crate::topology::params::AtomTypeParams;
use crate::topology::packed::ResolvedNbFix;

/// Reaction-field parameters, present only when the cutoff electrostatics
/// mode is reaction-field rather than plain truncated Coulomb.
#[derive(Debug, Clone, Copy)]
pub struct ReactionField {
    pub cutoff: f64,
    pub solvent_dielectric: f64,
}

/// Combines two atom types' Lennard-Jones parameters under the
/// Lorentz-Berthelot rule, or returns an NBFix override when one applies,
/// selecting the 1-4 variant of either source when `found14` is set.
pub fn combine_lj(
    type_i: &AtomTypeParams,
    type_j: &AtomTypeParams,
    nbfix: Option<&ResolvedNbFix>,
    found14: bool,
) -> (f64, f64) {
    if let Some(nb) = nbfix {
        return if found14 {
            (nb.epsilon_14, nb.sigma_14)
        } else {
            (nb.epsilon, nb.sigma)
        };
    }
    let (si, ei, sj, ej) = if found14 {
        (type_i.sigma_14, type_i.epsilon_14, type_j.sigma_14, type_j.epsilon_14)
    } else {
        (type_i.sigma, type_i.epsilon, type_j.sigma, type_j.epsilon)
    };
    (f64::sqrt(ei * ej), 0.5 * (si + sj))
}

/// Lennard-Jones energy and radial force for a pair at distance `r`, with
/// combined `epsilon`/`sigma` and a 1-4 scaling divisor (`1.0` if not a 1-4
/// pair).
pub fn lennard_jones(r: f64, epsilon: f64, sigma: f64, scale: f64) -> (f64, f64) {
    let s2 = sigma * sigma;
    let s6 = s2 * s2 * s2;
    let s12 = s6 * s6;
    let a = epsilon * 4.0 * s12;
    let b = epsilon * 4.0 * s6;

    let rinv = 1.0 / r;
    let rinv2 = rinv * rinv;
    let rinv6 = rinv2 * rinv2 * rinv2;
    let rinv12 = rinv6 * rinv6;

    let pot = (a * rinv12 - b * rinv6) / scale;
    let dpot_dr = (-12.0 * a * rinv12 + 6.0 * b * rinv6) * rinv / scale;
    (pot, dpot_dr)
}

/// Harmonic bond stretch energy and radial force at distance `r`.
pub fn harmonic_bond(r: f64, k: f64, r0: f64) -> (f64, f64) {
    let x = r - r0;
    (k * x * x, 2.0 * k * x)
}

/// Coulomb energy and radial force for a pair at distance `r`, with charges
/// `qi`/`qj`, a 1-4 scaling divisor, and an optional reaction-field cutoff
/// correction (Tironi et al., J. Chem. Phys. 102, 5451 (1995)).
pub fn coulomb(r: f64, qi: f64, qj: f64, scale: f64, rf: Option<ReactionField>) -> (f64, f64) {
    match rf {
        Some(ReactionField {
            cutoff,
            solvent_dielectric,
        }) => {
            let denom = 2.0 * solvent_dielectric + 1.0;
            let krf = (1.0 / cutoff.powi(3)) * (solvent_dielectric - 1.0) / denom;
            let crf = (1.0 / cutoff) * (3.0 * solvent_dielectric) / denom;
            let common = COULOMB_KE * qi * qj / scale;
            let r2 = r * r;
            let pot = common * ((1.0 / r) + krf * r2 - crf);
            let dpot_dr = common * (2.0 * krf * r - 1.0 / r2);
            (pot, dpot_dr)
        }
        None => {
            let pot = COULOMB_KE * qi * qj / r / scale;
            (pot, -pot / r)
        }
    }
}
