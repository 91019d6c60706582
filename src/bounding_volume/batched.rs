//! Bounding volume operations over flat arrays of volumes.
//!
//! Each function here takes arrays of shape `[A1, ..., An, N]` where `N` is the number of
//! degrees of freedom of the [`VolumeKind`]. The kind is resolved once per call and the
//! per-volume work is then done by the matching [`BoundingVolume`] implementation.

use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, VolumeKind};
use crate::math::{Real, DIM};
use crate::utils::shape::{check_last_dim, check_min_rank, check_same_shape, replace_trailing};
use crate::utils::Batch;
use crate::VolumeError;
use alloc::vec::Vec;

/// Checks that `shape` has at least `min_rank` dimensions, the last one matching `kind`.
pub(crate) fn check_volumes(
    name: &'static str,
    shape: &[usize],
    kind: VolumeKind,
    min_rank: usize,
) -> Result<(), VolumeError> {
    check_min_rank(name, shape, min_rank)?;
    check_last_dim(name, shape, kind.dofs())
}

/// Computes the center of each volume.
///
/// `volumes` has shape `[A1, ..., An, N]`; the result has shape `[A1, ..., An, 3]`.
pub fn center(volumes: &Batch<Real>, kind: VolumeKind) -> Result<Batch<Real>, VolumeError> {
    check_volumes("volumes", volumes.shape(), kind, 1)?;

    Ok(match kind {
        VolumeKind::Aabb => centers_of::<Aabb>(volumes),
        VolumeKind::Sphere => centers_of::<BoundingSphere>(volumes),
    })
}

/// Computes, for each pair of volumes, a volume enclosing both.
///
/// `volumes1` and `volumes2` must both have the same shape `[A1, ..., An, N]`, which is also
/// the shape of the result. The union of boxes is exact, the union of spheres is conservative.
pub fn pairwise_union(
    volumes1: &Batch<Real>,
    volumes2: &Batch<Real>,
    kind: VolumeKind,
) -> Result<Batch<Real>, VolumeError> {
    check_volumes("volumes1", volumes1.shape(), kind, 1)?;
    check_volumes("volumes2", volumes2.shape(), kind, 1)?;
    check_same_shape("volumes2", volumes1.shape(), volumes2.shape())?;

    Ok(match kind {
        VolumeKind::Aabb => unions_of::<Aabb>(volumes1, volumes2),
        VolumeKind::Sphere => unions_of::<BoundingSphere>(volumes1, volumes2),
    })
}

/// Computes, for each set of volumes, one volume enclosing the whole set.
///
/// `volumes` has shape `[A1, ..., An, M, N]`; the result has shape `[A1, ..., An, N]`.
/// Fails with [`VolumeError::EmptyVolumeSet`] if `M` is zero.
pub fn reduce_union(volumes: &Batch<Real>, kind: VolumeKind) -> Result<Batch<Real>, VolumeError> {
    check_volumes("volumes", volumes.shape(), kind, 2)?;

    let set_len = volumes.shape()[volumes.rank() - 2];
    if set_len == 0 {
        return Err(VolumeError::EmptyVolumeSet);
    }

    match kind {
        VolumeKind::Aabb => reduced_unions_of::<Aabb>(volumes, set_len),
        VolumeKind::Sphere => reduced_unions_of::<BoundingSphere>(volumes, set_len),
    }
}

/// Tests each pair of volumes for a non-empty intersection.
///
/// `volumes1` and `volumes2` must both have the same shape `[A1, ..., An, N]`; the result has
/// shape `[A1, ..., An]`. Boxes that touch intersect, spheres that touch do not.
pub fn intersects(
    volumes1: &Batch<Real>,
    volumes2: &Batch<Real>,
    kind: VolumeKind,
) -> Result<Batch<bool>, VolumeError> {
    check_volumes("volumes1", volumes1.shape(), kind, 1)?;
    check_volumes("volumes2", volumes2.shape(), kind, 1)?;
    check_same_shape("volumes2", volumes1.shape(), volumes2.shape())?;

    Ok(match kind {
        VolumeKind::Aabb => intersections_of::<Aabb>(volumes1, volumes2),
        VolumeKind::Sphere => intersections_of::<BoundingSphere>(volumes1, volumes2),
    })
}

fn centers_of<V: BoundingVolume>(volumes: &Batch<Real>) -> Batch<Real> {
    let mut data = Vec::with_capacity(volumes.len() / V::DOFS * DIM);

    for components in volumes.data().chunks_exact(V::DOFS) {
        let center = V::from_slice(components).center();
        data.extend_from_slice(center.coords.as_slice());
    }

    Batch::from_parts_unchecked(data, replace_trailing(volumes.shape(), 1, &[DIM]))
}

fn unions_of<V: BoundingVolume>(volumes1: &Batch<Real>, volumes2: &Batch<Real>) -> Batch<Real> {
    let mut data = alloc::vec![0.0; volumes1.len()];
    let pairs = volumes1
        .data()
        .chunks_exact(V::DOFS)
        .zip(volumes2.data().chunks_exact(V::DOFS));

    for (out, (a, b)) in data.chunks_exact_mut(V::DOFS).zip(pairs) {
        V::from_slice(a)
            .merged(&V::from_slice(b))
            .write_to_slice(out);
    }

    Batch::from_parts_unchecked(data, volumes1.shape().to_vec())
}

fn reduced_unions_of<V: BoundingVolume>(
    volumes: &Batch<Real>,
    set_len: usize,
) -> Result<Batch<Real>, VolumeError> {
    let mut data = alloc::vec![0.0; volumes.len() / set_len];
    let mut set = Vec::with_capacity(set_len);

    for (out, components) in data
        .chunks_exact_mut(V::DOFS)
        .zip(volumes.data().chunks_exact(set_len * V::DOFS))
    {
        set.clear();
        set.extend(components.chunks_exact(V::DOFS).map(V::from_slice));
        V::merged_all(&set)?.write_to_slice(out);
    }

    Ok(Batch::from_parts_unchecked(
        data,
        replace_trailing(volumes.shape(), 2, &[V::DOFS]),
    ))
}

fn intersections_of<V: BoundingVolume>(
    volumes1: &Batch<Real>,
    volumes2: &Batch<Real>,
) -> Batch<bool> {
    let data = volumes1
        .data()
        .chunks_exact(V::DOFS)
        .zip(volumes2.data().chunks_exact(V::DOFS))
        .map(|(a, b)| V::from_slice(a).intersects(&V::from_slice(b)))
        .collect();

    Batch::from_parts_unchecked(data, volumes1.batch_shape(1).to_vec())
}
