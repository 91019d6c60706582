pub use kary_bvh_batch::construct_bvh;
pub use kary_bvh_tree::{checked_tree_len, tree_depth, tree_len, KaryBvh};

mod kary_bvh_batch;
mod kary_bvh_tree;
mod kary_bvh_validation;
