use super::kary_bvh_tree::checked_node_count;
use crate::bounding_volume::batched::check_volumes;
use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, VolumeKind};
use crate::math::Real;
use crate::partitioning::KaryBvh;
use crate::utils::shape::{num_elements, replace_trailing};
use crate::utils::Batch;
use crate::VolumeError;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds one complete `k`-ary tree per set of leaf volumes.
///
/// `leaf_volumes` has shape `[A1, ..., An, M, N]`: `A1 * ... * An` independent sets of `M`
/// volumes of the given kind. Returns:
/// - the trees, of shape `[A1, ..., An, T, N]`, each flattened level by level starting with the
///   root (see [`KaryBvh`] for the node layout and the padding of the leaf level).
/// - the leaf permutations, of shape `[A1, ..., An, M]`, mapping each real leaf of the last tree
///   level to its index in `leaf_volumes`.
///
/// Fails before doing any work if `k < 2`, if `leaf_volumes` has a rank lower than 2, if its
/// last dimension does not match `kind`, if `M` is zero, or if the trees are too large to be
/// allocated. With the `parallel` feature, the
/// trees are built on the rayon thread pool.
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use kbvh3d::bounding_volume::VolumeKind;
/// use kbvh3d::partitioning::construct_bvh;
/// use kbvh3d::utils::Batch;
///
/// let spheres = Batch::new(
///     vec![0.0, 0.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0],
///     vec![1, 2, 4],
/// )
/// .unwrap();
/// let (tree, perm) = construct_bvh(&spheres, VolumeKind::Sphere, 2).unwrap();
///
/// assert_eq!(tree.shape(), &[1, 3, 4]);
/// // The root encloses both spheres.
/// assert_eq!(&tree.data()[..4], &[2.0, 0.0, 0.0, 3.0]);
/// assert_eq!(perm.data(), &[0, 1]);
/// # }
/// ```
pub fn construct_bvh(
    leaf_volumes: &Batch<Real>,
    kind: VolumeKind,
    k: usize,
) -> Result<(Batch<Real>, Batch<u32>), VolumeError> {
    if k < 2 {
        return Err(VolumeError::InvalidArgument(
            "the branching factor must be at least 2",
        ));
    }

    check_volumes("leaf_volumes", leaf_volumes.shape(), kind, 2)?;

    let num_leaves = leaf_volumes.shape()[leaf_volumes.rank() - 2];
    if num_leaves == 0 {
        return Err(VolumeError::EmptyVolumeSet);
    }

    match kind {
        VolumeKind::Aabb => construct_batch::<Aabb>(leaf_volumes, num_leaves, k),
        VolumeKind::Sphere => construct_batch::<BoundingSphere>(leaf_volumes, num_leaves, k),
    }
}

fn construct_batch<V: BoundingVolume>(
    leaf_volumes: &Batch<Real>,
    num_leaves: usize,
    k: usize,
) -> Result<(Batch<Real>, Batch<u32>), VolumeError> {
    let batch_shape = leaf_volumes.batch_shape(2);
    let num_trees = num_elements(batch_shape);
    let len = checked_node_count::<V>(num_leaves, k)?;
    let num_scalars = num_trees
        .checked_mul(len)
        .and_then(|nodes| nodes.checked_mul(V::DOFS))
        .ok_or(VolumeError::InvalidArgument(
            "the tree size overflows usize",
        ))?;

    log::debug!(
        "building {num_trees} {k}-ary trees of {} {} leaves ({len} nodes each)",
        num_leaves,
        V::KIND,
    );

    let build = |leaves: &[Real]| {
        let leaves: Vec<V> = leaves.chunks_exact(V::DOFS).map(V::from_slice).collect();
        KaryBvh::from_leaves(&leaves, k)
    };

    let instance_len = num_leaves * V::DOFS;

    #[cfg(feature = "parallel")]
    let trees: Vec<KaryBvh<V>> = leaf_volumes
        .data()
        .par_chunks_exact(instance_len)
        .map(build)
        .collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let trees: Vec<KaryBvh<V>> = leaf_volumes
        .data()
        .chunks_exact(instance_len)
        .map(build)
        .collect::<Result<_, _>>()?;

    let mut nodes = alloc::vec![0.0; num_scalars];
    let mut permutations = Vec::with_capacity(num_trees * num_leaves);

    for (tree, out) in trees.iter().zip(nodes.chunks_exact_mut(len * V::DOFS)) {
        for (node, out) in tree.nodes().iter().zip(out.chunks_exact_mut(V::DOFS)) {
            node.write_to_slice(out);
        }

        permutations.extend_from_slice(tree.leaf_permutation());
    }

    let tree_shape = replace_trailing(leaf_volumes.shape(), 2, &[len, V::DOFS]);
    let permutation_shape = replace_trailing(leaf_volumes.shape(), 2, &[num_leaves]);

    Ok((
        Batch::from_parts_unchecked(nodes, tree_shape),
        Batch::from_parts_unchecked(permutations, permutation_shape),
    ))
}
