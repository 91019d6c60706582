use crate::bounding_volume::BoundingVolume;
use crate::utils::morton;
use crate::VolumeError;
use alloc::vec::Vec;

/// The number of levels above the leaves of a complete `branching`-ary tree with `num_leaves`
/// leaves, i.e., the smallest `d` such that `branching^d >= num_leaves`.
///
/// Trees with zero or one leaf have a depth of zero.
///
/// # Panics
///
/// Panics if `branching < 2`.
pub fn tree_depth(num_leaves: usize, branching: usize) -> usize {
    assert!(branching >= 2, "The branching factor must be at least 2.");

    let mut depth = 0;
    let mut capacity = 1usize;

    while capacity < num_leaves {
        capacity = capacity.saturating_mul(branching);
        depth += 1;
    }

    depth
}

/// The total number of nodes of a complete `branching`-ary tree with `num_leaves` leaves,
/// padding leaves included: `1 + branching + ... + branching^depth`.
///
/// # Panics
///
/// Panics if `branching < 2` or if the number of nodes overflows `usize`. See
/// [`checked_tree_len`] for a non-panicking version.
pub fn tree_len(num_leaves: usize, branching: usize) -> usize {
    match checked_tree_len(num_leaves, branching) {
        Some(len) => len,
        None => panic!("The number of nodes of the tree overflows usize."),
    }
}

/// The total number of nodes of a complete `branching`-ary tree with `num_leaves` leaves, or
/// `None` if it overflows `usize`.
///
/// # Panics
///
/// Panics if `branching < 2`.
pub fn checked_tree_len(num_leaves: usize, branching: usize) -> Option<usize> {
    checked_level_start(tree_depth(num_leaves, branching) + 1, branching)
}

/// The number of nodes of a tree over `num_leaves` leaves of type `V`, provided the whole tree
/// can be allocated.
pub(super) fn checked_node_count<V>(
    num_leaves: usize,
    branching: usize,
) -> Result<usize, VolumeError> {
    checked_tree_len(num_leaves, branching)
        .filter(|len| {
            len.checked_mul(size_of::<V>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(VolumeError::InvalidArgument(
            "the tree size overflows usize",
        ))
}

/// Index of the first node of the given level in the flattened tree, i.e., the number of nodes
/// of all the levels above it.
fn checked_level_start(level: usize, branching: usize) -> Option<usize> {
    let mut start = 0usize;
    let mut width = 1usize;

    for i in 0..level {
        if i > 0 {
            width = width.checked_mul(branching)?;
        }
        start = start.checked_add(width)?;
    }

    Some(start)
}

/// Index of the first node of the given level in the flattened tree.
///
/// Only called on levels of trees whose size is known to fit in a `usize`.
#[inline]
pub(super) fn level_start(level: usize, branching: usize) -> usize {
    checked_level_start(level, branching).unwrap_or(usize::MAX)
}

/// A complete k-ary bounding volume hierarchy, flattened in level order.
///
/// The nodes are stored root first, then the `k` children of the root, then their `k * k`
/// children, and so on down to the leaf level. The children of the node `i` of level `l` are
/// the nodes `i * k .. (i + 1) * k` of level `l + 1`.
///
/// Leaves are ordered along a Morton curve of their centers. When their number is not a power
/// of `k`, the last sorted leaf is repeated to fill the leaf level; these padding leaves are not
/// part of [`Self::leaf_permutation`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KaryBvh<V> {
    pub(super) nodes: Vec<V>,
    pub(super) leaf_permutation: Vec<u32>,
    pub(super) branching: usize,
    pub(super) depth: usize,
}

impl<V: BoundingVolume> KaryBvh<V> {
    /// Builds the hierarchy of the given leaves with the branching factor `branching`.
    ///
    /// Fails with [`VolumeError::InvalidArgument`] if `branching < 2`, if there are more
    /// leaves than `u32` can index or if the tree is too large to be allocated, and with [`VolumeError::EmptyVolumeSet`] if `leaves` is
    /// empty.
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use kbvh3d::bounding_volume::{Aabb, BoundingVolume};
    /// use kbvh3d::partitioning::KaryBvh;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let leaves: Vec<_> = (0..5)
    ///     .map(|i| Aabb::from_half_extents(Point3::new(i as f32, 0.0, 0.0), Vector3::repeat(0.5)))
    ///     .collect();
    /// let bvh = KaryBvh::from_leaves(&leaves, 2).unwrap();
    ///
    /// // 5 leaves are padded to 8: 1 + 2 + 4 + 8 nodes.
    /// assert_eq!(bvh.nodes().len(), 15);
    /// assert_eq!(bvh.leaves().len(), 5);
    /// assert!(leaves.iter().all(|leaf| bvh.root().contains(leaf)));
    /// # }
    /// ```
    pub fn from_leaves(leaves: &[V], branching: usize) -> Result<Self, VolumeError> {
        if branching < 2 {
            return Err(VolumeError::InvalidArgument(
                "the branching factor must be at least 2",
            ));
        }

        if leaves.is_empty() {
            return Err(VolumeError::EmptyVolumeSet);
        }

        if u32::try_from(leaves.len() - 1).is_err() {
            return Err(VolumeError::InvalidArgument(
                "the number of leaves must fit in a u32 index",
            ));
        }

        let len = checked_node_count::<V>(leaves.len(), branching)?;

        // Sort the leaves along the Morton curve. The sort is stable so leaves
        // sharing a key keep their input order.
        let centers: Vec<_> = leaves.iter().map(|leaf| leaf.center()).collect();
        let keys = morton::morton_keys(&centers);
        let mut leaf_permutation: Vec<u32> = (0..leaves.len() as u32).collect();
        leaf_permutation.sort_by_key(|&i| keys[i as usize]);

        let depth = tree_depth(leaves.len(), branching);
        let leaf_level_start = level_start(depth, branching);

        // Internal nodes are placeholders until the reduction below overwrites them.
        let last_leaf = leaves[leaf_permutation[leaf_permutation.len() - 1] as usize];
        let mut nodes = Vec::with_capacity(len);
        nodes.resize(leaf_level_start, last_leaf);
        nodes.extend(leaf_permutation.iter().map(|&i| leaves[i as usize]));
        nodes.resize(len, last_leaf);

        // Reduce every group of `branching` siblings into its parent, from the
        // deepest level up to the root.
        let mut children_start = leaf_level_start;

        for level in (0..depth).rev() {
            let parents_start = level_start(level, branching);
            let (parents, children) = nodes.split_at_mut(children_start);
            let parents = &mut parents[parents_start..];

            for (parent, siblings) in parents.iter_mut().zip(children.chunks_exact(branching)) {
                *parent = V::merged_all(siblings)?;
            }

            log::trace!("reduced level {} into {} nodes", level + 1, parents.len());
            children_start = parents_start;
        }

        Ok(Self {
            nodes,
            leaf_permutation,
            branching,
            depth,
        })
    }
}

impl<V> KaryBvh<V> {
    /// All the nodes of this tree, root first, padding leaves included.
    #[inline]
    pub fn nodes(&self) -> &[V] {
        &self.nodes
    }

    /// For each real leaf, in tree order, its index in the slice given at construction.
    #[inline]
    pub fn leaf_permutation(&self) -> &[u32] {
        &self.leaf_permutation
    }

    /// The number of children of each internal node.
    #[inline]
    pub fn branching(&self) -> usize {
        self.branching
    }

    /// The number of levels above the leaf level.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of levels of this tree, the leaf level included.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.depth + 1
    }

    /// The number of real leaves, padding excluded.
    #[inline]
    pub fn num_leaves(&self) -> usize {
        self.leaf_permutation.len()
    }

    /// The root of this tree.
    #[inline]
    pub fn root(&self) -> &V {
        &self.nodes[0]
    }

    /// The nodes of the given level, `0` being the root level.
    pub fn level(&self, level: usize) -> Option<&[V]> {
        if level > self.depth {
            return None;
        }

        let start = level_start(level, self.branching);
        Some(&self.nodes[start..start + self.branching.pow(level as u32)])
    }

    /// The leaf level, padding leaves included.
    #[inline]
    pub fn padded_leaves(&self) -> &[V] {
        &self.nodes[level_start(self.depth, self.branching)..]
    }

    /// The real leaves, in tree order.
    #[inline]
    pub fn leaves(&self) -> &[V] {
        &self.padded_leaves()[..self.num_leaves()]
    }

    /// Splits this tree into its flattened nodes and its leaf permutation.
    pub fn into_parts(self) -> (Vec<V>, Vec<u32>) {
        (self.nodes, self.leaf_permutation)
    }
}
