//! Spatial partitioning tools.

pub use self::kary_bvh::{checked_tree_len, construct_bvh, tree_depth, tree_len, KaryBvh};

mod kary_bvh;
