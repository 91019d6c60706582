use crate::bounding_volume::VolumeKind;
use crate::math::{Point, Real};
use crate::VolumeError;

/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of leaf geometry. It usually have constant time
/// intersection, inclusion test. Two bounding volume must also be mergeable into a bigger bounding
/// volume, and any non-empty set of them must be reducible into one volume enclosing the whole set.
///
/// Every bounding volume also has a flat representation of [`Self::DOFS`] scalars, used by the
/// batched API.
pub trait BoundingVolume: Copy + Send + Sync {
    /// The run-time tag of this kind of bounding volume.
    const KIND: VolumeKind;

    /// The number of scalars of the flat representation of this bounding volume.
    const DOFS: usize;

    /// Reads a bounding volume from the first [`Self::DOFS`] scalars of `components`.
    ///
    /// # Panics
    ///
    /// Panics if `components` holds less than [`Self::DOFS`] scalars.
    fn from_slice(components: &[Real]) -> Self;

    /// Writes the flat representation of this bounding volume into the first [`Self::DOFS`]
    /// scalars of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` holds less than [`Self::DOFS`] scalars.
    fn write_to_slice(&self, out: &mut [Real]);

    /// Returns a point inside of this bounding volume. This is ideally its center.
    fn center(&self) -> Point<Real>;

    /// Checks if this bounding volume intersect with another one.
    fn intersects(&self, _: &Self) -> bool;

    /// Checks if this bounding volume contains another one.
    fn contains(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one. The merge is done in-place.
    fn merge(&mut self, _: &Self);

    /// Merges this bounding volume with another one.
    fn merged(&self, _: &Self) -> Self;

    /// Computes one bounding volume enclosing all the given volumes.
    ///
    /// Fails with [`VolumeError::EmptyVolumeSet`] if `volumes` is empty.
    fn merged_all(volumes: &[Self]) -> Result<Self, VolumeError>;
}
