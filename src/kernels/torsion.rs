//! Torsion kernel shared by proper dihedrals and impropers: a periodic or
//! harmonic-improper potential in the dihedral angle `phi`, with forces
//! distributed across the four-atom chain by the standard (OpenMM-style)
//! chain rule.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::core::geometry::min_image_bonded;
use crate::topology::packed::TorsionComponent;

/// The dihedral angle `phi` over the chain `p0-p1-p2-p3`, computed with the
/// numerically robust `atan2` form (Blondel & Karplus 1996), plus the three
/// (minimum-image) chain vectors needed for the force distribution.
fn dihedral_angle_full(
    pos: [Vector3<f64>; 4],
    box_lengths: Vector3<f64>,
) -> (f64, Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    let r12 = min_image_bonded(pos[1] - pos[0], box_lengths);
    let r23 = min_image_bonded(pos[2] - pos[1], box_lengths);
    let r34 = min_image_bonded(pos[3] - pos[2], box_lengths);

    let cross1 = r12.cross(&r23);
    let cross2 = r23.cross(&r34);

    let y = r23.norm() * r12.dot(&cross2);
    let x = cross1.dot(&cross2);
    let phi = y.atan2(x);

    (phi, r12, r23, r34)
}

/// Evaluates a (possibly multi-term) torsion over four chained atoms,
/// returning the total potential and the per-atom force in `[p0, p1, p2,
/// p3]` order.
///
/// A component with `n > 0` contributes the periodic Fourier form `k * (1 +
/// cos(n*phi - phase))`; a component with `n <= 0` contributes the
/// harmonic-improper form `k * wrap(phi - phase)^2`, wrapping the angle
/// difference into `(-pi, pi]` first.
pub fn torsion(
    components: &[TorsionComponent],
    pos: [Vector3<f64>; 4],
    box_lengths: Vector3<f64>,
) -> (f64, [Vector3<f64>; 4]) {
    let (phi, r12, r23, r34) = dihedral_angle_full(pos, box_lengths);

    let mut pot = 0.0;
    let mut d_pot_d_phi = 0.0;
    for c in components {
        if c.n > 0 {
            let arg = c.n as f64 * phi - c.phase;
            pot += c.k * (1.0 + arg.cos());
            d_pot_d_phi += -(c.n as f64) * c.k * arg.sin();
        } else {
            let mut diff = phi - c.phase;
            if diff < -PI {
                diff += 2.0 * PI;
            } else if diff > PI {
                diff -= 2.0 * PI;
            }
            pot += c.k * diff * diff;
            d_pot_d_phi += 2.0 * c.k * diff;
        }
    }

    let cross1 = r12.cross(&r23);
    let cross2 = r23.cross(&r34);
    let norm2_r23 = r23.dot(&r23);
    let norm_r23 = norm2_r23.sqrt();
    let norm_cross1 = cross1.dot(&cross1);
    let norm_cross2 = cross2.dot(&cross2);

    let factor0 = (-d_pot_d_phi * norm_r23) / norm_cross1;
    let factor3 = (d_pot_d_phi * norm_r23) / norm_cross2;
    let factor1 = r12.dot(&r23) / norm2_r23;
    let factor2 = r34.dot(&r23) / norm2_r23;

    let force1 = cross1 * factor0;
    let force4 = cross2 * factor3;
    let s = force1 * factor1 - force4 * factor2;

    let forces = [-force1, force1 + s, force4 - s, -force4];
    (pot, forces)
}
