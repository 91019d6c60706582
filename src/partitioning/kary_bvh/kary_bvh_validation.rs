use super::kary_bvh_tree::{checked_tree_len, tree_depth};
use crate::bounding_volume::BoundingVolume;
use crate::partitioning::KaryBvh;
use alloc::vec;
use core::fmt;

impl<V: BoundingVolume + PartialEq + fmt::Debug> KaryBvh<V> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (the node count matches a complete
    /// tree over its leaves and the leaf permutation is a bijection) and geometrically correct
    /// (every internal node contains each of its children, padding leaves repeat the last real
    /// leaf).
    pub fn assert_well_formed(&self) {
        let num_leaves = self.num_leaves();
        assert!(num_leaves > 0, "A tree must have at least one leaf.");
        assert_eq!(self.depth, tree_depth(num_leaves, self.branching));
        assert_eq!(
            Some(self.nodes.len()),
            checked_tree_len(num_leaves, self.branching)
        );

        let mut seen = vec![false; num_leaves];
        for &i in &self.leaf_permutation {
            let i = i as usize;
            assert!(i < num_leaves, "Leaf index {i} out of bounds.");
            assert!(!seen[i], "Leaf index {i} appears twice.");
            seen[i] = true;
        }

        let leaves = self.padded_leaves();
        let last_leaf = &leaves[num_leaves - 1];
        for padding in &leaves[num_leaves..] {
            assert_eq!(padding, last_leaf, "Padding leaves must repeat the last leaf.");
        }

        for level in 0..self.depth {
            let parents = self.level(level).unwrap();
            let children = self.level(level + 1).unwrap();

            for (i, (parent, siblings)) in parents
                .iter()
                .zip(children.chunks_exact(self.branching))
                .enumerate()
            {
                for child in siblings {
                    assert!(
                        parent.contains(child),
                        "Node {i} of level {level} does not contain its child: {parent:?} vs. {child:?}"
                    );
                }
            }
        }
    }
}
