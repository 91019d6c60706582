//! Shape checks for the batched array inputs.

use crate::VolumeError;
use alloc::vec::Vec;

/// Fails with [`VolumeError::InsufficientRank`] if `shape` has fewer than `min_rank` dimensions.
#[inline]
pub fn check_min_rank(
    name: &'static str,
    shape: &[usize],
    min_rank: usize,
) -> Result<(), VolumeError> {
    if shape.len() < min_rank {
        Err(VolumeError::InsufficientRank {
            name,
            expected: min_rank,
            found: shape.len(),
        })
    } else {
        Ok(())
    }
}

/// Fails if `shape` has no dimension, or if its last dimension is not `expected`.
#[inline]
pub fn check_last_dim(
    name: &'static str,
    shape: &[usize],
    expected: usize,
) -> Result<(), VolumeError> {
    check_min_rank(name, shape, 1)?;
    let found = shape[shape.len() - 1];

    if found != expected {
        Err(VolumeError::DimensionMismatch {
            name,
            expected,
            found,
        })
    } else {
        Ok(())
    }
}

/// Fails with [`VolumeError::ShapeMismatch`] if `found` differs from `expected`.
#[inline]
pub fn check_same_shape(
    name: &'static str,
    expected: &[usize],
    found: &[usize],
) -> Result<(), VolumeError> {
    if expected != found {
        Err(VolumeError::ShapeMismatch {
            name,
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    } else {
        Ok(())
    }
}

/// The number of elements of an array of the given shape, saturating at `usize::MAX`.
///
/// A zero-sized dimension yields zero even when the other dimensions overflow.
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().fold(1, |acc, &dim| acc.saturating_mul(dim))
}

/// Copies `shape` with its last `trailing` dimensions replaced by `new_trailing`.
pub(crate) fn replace_trailing(
    shape: &[usize],
    trailing: usize,
    new_trailing: &[usize],
) -> Vec<usize> {
    let kept = shape.len().saturating_sub(trailing);
    let mut result = Vec::with_capacity(kept + new_trailing.len());
    result.extend_from_slice(&shape[..kept]);
    result.extend_from_slice(new_trailing);
    result
}
