use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume};
use crate::VolumeError;
use core::fmt;
use core::str::FromStr;

/// The kind of the bounding volumes stored in a flat array.
///
/// All the volumes processed together share one kind. String tags (`"aabb"`, `"sphere"`) can be
/// parsed with [`str::parse`], which fails with [`VolumeError::InvalidVolumeKind`] on any other
/// tag.
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use kbvh3d::bounding_volume::VolumeKind;
/// use kbvh3d::VolumeError;
///
/// assert_eq!("sphere".parse(), Ok(VolumeKind::Sphere));
/// assert_eq!(VolumeKind::Aabb.dofs(), 6);
/// assert_eq!(
///     "obb".parse::<VolumeKind>(),
///     Err(VolumeError::InvalidVolumeKind("obb".to_string()))
/// );
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    /// Axis-aligned bounding boxes, see [`Aabb`].
    Aabb,
    /// Bounding spheres, see [`BoundingSphere`].
    Sphere,
}

impl VolumeKind {
    /// The number of scalars needed to represent one volume of this kind.
    #[inline]
    pub const fn dofs(self) -> usize {
        match self {
            VolumeKind::Aabb => <Aabb as BoundingVolume>::DOFS,
            VolumeKind::Sphere => <BoundingSphere as BoundingVolume>::DOFS,
        }
    }

    /// The string tag of this kind.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            VolumeKind::Aabb => "aabb",
            VolumeKind::Sphere => "sphere",
        }
    }
}

/// The number of scalars needed to represent one volume of the given kind: 6 for
/// [`VolumeKind::Aabb`], 4 for [`VolumeKind::Sphere`].
#[inline]
pub fn degrees_of_freedom(kind: VolumeKind) -> usize {
    kind.dofs()
}

impl FromStr for VolumeKind {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("aabb") {
            Ok(VolumeKind::Aabb)
        } else if s.eq_ignore_ascii_case("sphere") {
            Ok(VolumeKind::Sphere)
        } else {
            Err(VolumeError::InvalidVolumeKind(s.into()))
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
