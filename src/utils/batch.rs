use crate::utils::shape::num_elements;
use crate::VolumeError;
use alloc::vec::Vec;

/// An owned, row-major, n-dimensional array.
///
/// This is the data carrier of the batched API: a set of bounding volumes of
/// shape `[A1, ..., An, N]` is stored as a flat buffer of `A1 * ... * An * N`
/// scalars, the last dimension holding the components of one volume.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Batch<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Batch<T> {
    /// Wraps `data` into an array of the given `shape`.
    ///
    /// Fails with [`VolumeError::LengthMismatch`] if `data.len()` is not the product of `shape`.
    /// A product that overflows `usize` is reported as `usize::MAX`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, VolumeError> {
        let expected = num_elements(&shape);

        if data.len() != expected {
            return Err(VolumeError::LengthMismatch {
                name: "data",
                expected,
                found: data.len(),
            });
        }

        Ok(Self { data, shape })
    }

    /// Wraps `data` into a rank-1 array.
    pub fn from_vec(data: Vec<T>) -> Self {
        let shape = alloc::vec![data.len()];
        Self { data, shape }
    }

    pub(crate) fn from_parts_unchecked(data: Vec<T>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), num_elements(&shape));
        Self { data, shape }
    }

    /// The size of each dimension of this array.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The number of dimensions of this array.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// The flat, row-major content of this array.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The total number of elements of this array.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Does this array contain no element?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The leading dimensions of this array, i.e., all but its last `trailing` dimensions.
    #[inline]
    pub fn batch_shape(&self, trailing: usize) -> &[usize] {
        &self.shape[..self.shape.len().saturating_sub(trailing)]
    }

    /// Splits this array into its flat content and its shape.
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>) {
        (self.data, self.shape)
    }
}
