use crate::math::{Real, Vector};
use na::ComplexField;
use num::Zero;

/// Divides `num` by `denom`, returning zero instead of NaN or an infinity when `denom` is zero.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use kbvh3d::utils::safe_div;
///
/// assert_eq!(safe_div(3.0, 2.0), 1.5);
/// assert_eq!(safe_div(0.0, 0.0), 0.0);
/// assert_eq!(safe_div(1.0, 0.0), 0.0);
/// # }
/// ```
#[inline]
pub fn safe_div(num: Real, denom: Real) -> Real {
    if denom.is_zero() {
        0.0
    } else {
        num / denom
    }
}

/// Splits `v` into its direction and its norm.
///
/// A zero vector yields a zero direction (not NaN) and a zero norm.
#[inline]
pub fn safe_normalize(v: Vector<Real>) -> (Vector<Real>, Real) {
    let norm = ComplexField::sqrt(v.norm_squared());
    (v.map(|e| safe_div(e, norm)), norm)
}
