//! Axis Aligned Bounding Box.

use crate::bounding_volume::{BoundingVolume, VolumeKind};
use crate::math::{Point, Real, Vector, DIM, TWO_DIM};
use crate::VolumeError;
use approx::{AbsDiffEq, RelativeEq};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is the simplest bounding volume, defined by its minimum and maximum corners.
/// It's called "axis-aligned" because its edges are always parallel to the coordinate axes.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis
/// - **maxs**: The point with the largest coordinates on each axis
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z` for every
///   AABB produced by this crate (not enforced on user input)
///
/// # Flat representation
///
/// In the batched API an AABB is the 6 scalars `[min_x, min_y, min_z, max_x, max_y, max_z]`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use kbvh3d::bounding_volume::{Aabb, BoundingVolume};
/// use nalgebra::Point3;
///
/// let a = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(0.0, 0.0, 0.0));
/// let b = Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 1.0, 1.0));
/// let ab = a.merged(&b);
///
/// assert_eq!(ab.mins, Point3::new(-1.0, -1.0, -1.0));
/// assert_eq!(ab.maxs, Point3::new(2.0, 1.0, 1.0));
/// assert!(ab.contains(&a) && ab.contains(&b));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// The resulting AABB has `mins` set to maximum values and `maxs` set to
    /// minimum values. This is useful as an initial value for AABB merging.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns an invalid AABB (see [`Aabb::new_invalid`]) if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Returns the center point of this AABB.
    ///
    /// The center is the midpoint between `mins` and `maxs`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Returns the full extents of this AABB, i.e., its size along each axis.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }
}

impl BoundingVolume for Aabb {
    const KIND: VolumeKind = VolumeKind::Aabb;
    const DOFS: usize = TWO_DIM;

    #[inline]
    fn from_slice(components: &[Real]) -> Self {
        Aabb::new(
            Point::new(components[0], components[1], components[2]),
            Point::new(components[3], components[4], components[5]),
        )
    }

    #[inline]
    fn write_to_slice(&self, out: &mut [Real]) {
        out[..DIM].copy_from_slice(self.mins.coords.as_slice());
        out[DIM..TWO_DIM].copy_from_slice(self.maxs.coords.as_slice());
    }

    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    /// Closed-interval overlap test: boxes that only touch do intersect.
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    fn merged_all(volumes: &[Aabb]) -> Result<Aabb, VolumeError> {
        let (first, rest) = volumes
            .split_first()
            .ok_or(VolumeError::EmptyVolumeSet)?;
        let mut result = *first;

        for aabb in rest {
            result.merge(aabb);
        }

        Ok(result)
    }
}

impl AbsDiffEq for Aabb {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        <Real as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.mins.abs_diff_eq(&other.mins, epsilon) && self.maxs.abs_diff_eq(&other.maxs, epsilon)
    }
}

impl RelativeEq for Aabb {
    fn default_max_relative() -> Self::Epsilon {
        <Real as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.mins.relative_eq(&other.mins, epsilon, max_relative)
            && self.maxs.relative_eq(&other.maxs, epsilon, max_relative)
    }
}
