//! Bounding sphere.

use crate::bounding_volume::{BoundingVolume, VolumeKind};
use crate::math::{Point, Real, DIM};
use crate::utils::safe_normalize;
use crate::VolumeError;
use approx::{AbsDiffEq, RelativeEq};

/// A Bounding Sphere.
///
/// In the batched API a bounding sphere is the 4 scalars `[center_x, center_y, center_z, radius]`.
///
/// Merging bounding spheres is conservative: the result always encloses its inputs, but it
/// is generally larger than the minimal enclosing sphere.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }
}

impl BoundingVolume for BoundingSphere {
    const KIND: VolumeKind = VolumeKind::Sphere;
    const DOFS: usize = DIM + 1;

    #[inline]
    fn from_slice(components: &[Real]) -> Self {
        BoundingSphere::new(
            Point::new(components[0], components[1], components[2]),
            components[3],
        )
    }

    #[inline]
    fn write_to_slice(&self, out: &mut [Real]) {
        out[..DIM].copy_from_slice(self.center.coords.as_slice());
        out[DIM] = self.radius;
    }

    #[inline]
    fn center(&self) -> Point<Real> {
        *self.center()
    }

    /// Spheres that only touch do not intersect.
    #[inline]
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let separation = (other.center - self.center).norm();
        separation < self.radius + other.radius
    }

    #[inline]
    fn contains(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance = delta_pos.norm();

        distance + other.radius <= self.radius
    }

    #[inline]
    fn merge(&mut self, other: &BoundingSphere) {
        *self = self.merged(other);
    }

    // The center is the midpoint of the two centers, shifted along the separating axis by half
    // the radius difference. The radius is `separation + r1 + r2`.
    #[inline]
    fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let (axis, separation) = safe_normalize(other.center - self.center);
        let shift = axis * (other.radius - self.radius);
        let center = (self.center.coords + other.center.coords + shift) * 0.5;

        BoundingSphere::new(center.into(), separation + self.radius + other.radius)
    }

    // The center is the center of the AABB of all the input centers. The radius is the largest
    // distance from that center to the far side of an input sphere.
    fn merged_all(volumes: &[BoundingSphere]) -> Result<BoundingSphere, VolumeError> {
        let (first, rest) = volumes
            .split_first()
            .ok_or(VolumeError::EmptyVolumeSet)?;

        let (mut mins, mut maxs) = (first.center, first.center);
        for sphere in rest {
            mins = mins.inf(&sphere.center);
            maxs = maxs.sup(&sphere.center);
        }

        let center = na::center(&mins, &maxs);
        let radius = volumes
            .iter()
            .map(|sphere| (sphere.center - center).norm() + sphere.radius)
            .fold(-Real::MAX, Real::max);

        Ok(BoundingSphere::new(center, radius))
    }
}

impl AbsDiffEq for BoundingSphere {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        <Real as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.radius.abs_diff_eq(&other.radius, epsilon)
    }
}

impl RelativeEq for BoundingSphere {
    fn default_max_relative() -> Self::Epsilon {
        <Real as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self.radius.relative_eq(&other.radius, epsilon, max_relative)
    }
}
