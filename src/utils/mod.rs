//! Various unsorted geometrical and logical operators.

pub use self::batch::Batch;
pub use self::safe_ops::{safe_div, safe_normalize};

mod batch;
pub mod morton;
mod safe_ops;
pub mod shape;
