//! Harmonic angle-bend kernel.

use nalgebra::Vector3;

use crate::core::geometry::min_image_bonded;

/// Evaluates a harmonic angle term over atoms `(a, b, c)` with `b` central,
/// returning the potential and the per-atom force in `[a, b, c]` order.
///
/// `cos(theta)` is clamped to `[-1, 1]` before `acos` to absorb floating-point
/// drift at near-linear geometries; when `sin(theta)` underflows to zero the
/// force is taken as zero rather than dividing by it.
pub fn harmonic_angle(
    pos_a: Vector3<f64>,
    pos_b: Vector3<f64>,
    pos_c: Vector3<f64>,
    k: f64,
    theta0: f64,
    box_lengths: Vector3<f64>,
) -> (f64, [Vector3<f64>; 3]) {
    let r21 = min_image_bonded(pos_a - pos_b, box_lengths);
    let r23 = min_image_bonded(pos_c - pos_b, box_lengths);

    let norm21 = r21.norm();
    let norm23 = r23.norm();
    let norm21_inv = 1.0 / norm21;
    let norm23_inv = 1.0 / norm23;

    let mut cos_theta = r21.dot(&r23) * norm21_inv * norm23_inv;
    cos_theta = cos_theta.clamp(-1.0, 1.0);
    let theta = cos_theta.acos();

    let delta = theta - theta0;
    let pot = k * delta * delta;

    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let coef = if sin_theta != 0.0 {
        -2.0 * k * delta / sin_theta
    } else {
        0.0
    };

    let force_a = (r21 * (cos_theta * norm21_inv) - r23 * norm23_inv) * (coef * norm21_inv);
    let force_c = (r23 * (cos_theta * norm23_inv) - r21 * norm21_inv) * (coef * norm23_inv);
    let force_b = -(force_a + force_c);

    (pot, [force_a, force_b, force_c])
}
