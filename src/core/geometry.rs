//! Periodic-box minimum-image conventions used by every kernel.
//!
//! A rectangular cell of side lengths `L`; for any axis with `Lₖ > 0` the
//! minimum image along that axis is `d − Lₖ · round(d/Lₖ)`. An axis with
//! `Lₖ ≤ 0` is treated as non-periodic and `d` passes through unchanged.

use nalgebra::Vector3;

/// Minimum-image displacement for a non-bonded pair vector `d = a - b`.
#[inline]
pub fn min_image(d: Vector3<f64>, box_lengths: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        wrap_component(d.x, box_lengths.x),
        wrap_component(d.y, box_lengths.y),
        wrap_component(d.z, box_lengths.z),
    )
}

/// Minimum-image displacement for a bonded pair vector (bond, angle, torsion
/// chain links). Connected atoms are assumed to lie within one image of each
/// other, so this never needs to wrap by more than one box length; the
/// formula is identical to [`min_image`] but kept as a distinct entry point
/// in case bonded and non-bonded wrapping ever need to diverge.
#[inline]
pub fn min_image_bonded(d: Vector3<f64>, box_lengths: Vector3<f64>) -> Vector3<f64> {
    min_image(d, box_lengths)
}

#[inline]
fn wrap_component(d: f64, l: f64) -> f64 {
    if l > 0.0 { d - l * (d / l).round() } else { d }
}
