//! Update tensor representation and combination.
//!
//! See the [mask module] documentation since this is a private module anyways.
//!
//! [mask module]: crate::mask

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::mask::MaskingError;

/// The numeric kind of an update tensor.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integers, combined with wrapping arithmetic.
    I64,
    /// Single-precision floats, combined with IEEE arithmetic.
    F32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum TensorData {
    I64(Vec<i64>),
    F32(Vec<f32>),
}

/// A shaped numeric array of rank 0 (scalar) up to 4.
///
/// The contained data is immutable: combining two tensors returns a new
/// one and leaves both inputs untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    shape: Vec<usize>,
    data: TensorData,
}

impl Tensor {
    /// Creates an integer tensor from a shape and its row-major data.
    ///
    /// # Errors
    /// Fails with [`MaskingError::ShapeMismatch`] if the number of
    /// elements does not match the shape. A rank-0 shape holds exactly
    /// one element.
    pub fn from_i64(shape: Vec<usize>, data: Vec<i64>) -> Result<Self, MaskingError> {
        if element_count(&shape) != data.len() {
            return Err(MaskingError::ShapeMismatch);
        }
        Ok(Self {
            shape,
            data: TensorData::I64(data),
        })
    }

    /// Creates a float tensor from a shape and its row-major data.
    ///
    /// # Errors
    /// Fails with [`MaskingError::ShapeMismatch`] if the number of
    /// elements does not match the shape. A rank-0 shape holds exactly
    /// one element.
    pub fn from_f32(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, MaskingError> {
        if element_count(&shape) != data.len() {
            return Err(MaskingError::ShapeMismatch);
        }
        Ok(Self {
            shape,
            data: TensorData::F32(data),
        })
    }

    /// Gets the shape of this tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Gets the numeric kind of this tensor.
    pub fn data_type(&self) -> DataType {
        match self.data {
            TensorData::I64(_) => DataType::I64,
            TensorData::F32(_) => DataType::F32,
        }
    }

    /// Gets the number of elements of this tensor.
    pub fn len(&self) -> usize {
        match &self.data {
            TensorData::I64(data) => data.len(),
            TensorData::F32(data) => data.len(),
        }
    }

    /// Checks whether this tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the integer data, if this is an integer tensor.
    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.data {
            TensorData::I64(data) => Some(data),
            TensorData::F32(_) => None,
        }
    }

    /// Gets the float data, if this is a float tensor.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            TensorData::F32(data) => Some(data),
            TensorData::I64(_) => None,
        }
    }

    /// Returns the elementwise sum of this tensor and `other` as a new
    /// tensor.
    ///
    /// # Errors
    /// Fails with [`MaskingError::ShapeMismatch`] if the shapes or the
    /// numeric kinds disagree.
    pub fn add(&self, other: &Self) -> Result<Self, MaskingError> {
        self.combine(other, i64::wrapping_add, |a, b| a + b)
    }

    /// Returns the elementwise difference of this tensor and `other` as
    /// a new tensor.
    ///
    /// # Errors
    /// Fails with [`MaskingError::ShapeMismatch`] if the shapes or the
    /// numeric kinds disagree.
    pub fn sub(&self, other: &Self) -> Result<Self, MaskingError> {
        self.combine(other, i64::wrapping_sub, |a, b| a - b)
    }

    fn combine(
        &self,
        other: &Self,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f32, f32) -> f32,
    ) -> Result<Self, MaskingError> {
        if self.shape != other.shape {
            return Err(MaskingError::ShapeMismatch);
        }
        let data = match (&self.data, &other.data) {
            (TensorData::I64(lhs), TensorData::I64(rhs)) => TensorData::I64(
                lhs.iter()
                    .zip(rhs)
                    .map(|(a, b)| int_op(*a, *b))
                    .collect(),
            ),
            (TensorData::F32(lhs), TensorData::F32(rhs)) => TensorData::F32(
                lhs.iter()
                    .zip(rhs)
                    .map(|(a, b)| float_op(*a, *b))
                    .collect(),
            ),
            _ => return Err(MaskingError::ShapeMismatch),
        };
        Ok(Self {
            shape: self.shape.clone(),
            data,
        })
    }
}

/// The number of elements a shape describes; a rank-0 scalar has one.
pub(crate) fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shape() {
        let scalar = Tensor::from_i64(vec![], vec![7]).unwrap();
        assert_eq!(scalar.shape(), &[] as &[usize]);
        assert_eq!(scalar.len(), 1);

        assert_eq!(
            Tensor::from_i64(vec![], vec![1, 2]).unwrap_err(),
            MaskingError::ShapeMismatch,
        );
    }

    #[test]
    fn test_shape_element_count() {
        assert!(Tensor::from_f32(vec![2, 3], vec![0_f32; 6]).is_ok());
        assert_eq!(
            Tensor::from_f32(vec![2, 3], vec![0_f32; 5]).unwrap_err(),
            MaskingError::ShapeMismatch,
        );
    }

    #[test]
    fn test_add_sub_roundtrip_i64() {
        let update = Tensor::from_i64(vec![4], vec![i64::MAX, i64::MIN, 0, 42]).unwrap();
        let mask = Tensor::from_i64(vec![4], vec![1, -1, i64::MAX, i64::MIN]).unwrap();
        // wrapping arithmetic: adding and subtracting the same mask is exact
        let masked = update.add(&mask).unwrap();
        assert_eq!(masked.sub(&mask).unwrap(), update);
    }

    #[test]
    fn test_combine_leaves_inputs_untouched() {
        let update = Tensor::from_f32(vec![2], vec![1.0, 2.0]).unwrap();
        let mask = Tensor::from_f32(vec![2], vec![0.5, 0.25]).unwrap();
        let before = update.clone();
        let _ = update.add(&mask).unwrap();
        assert_eq!(update, before);
    }

    #[test]
    fn test_combine_shape_mismatch() {
        let lhs = Tensor::from_i64(vec![2], vec![1, 2]).unwrap();
        let rhs = Tensor::from_i64(vec![2, 1], vec![1, 2]).unwrap();
        assert_eq!(lhs.add(&rhs).unwrap_err(), MaskingError::ShapeMismatch);
    }

    #[test]
    fn test_combine_kind_mismatch() {
        let lhs = Tensor::from_i64(vec![2], vec![1, 2]).unwrap();
        let rhs = Tensor::from_f32(vec![2], vec![1.0, 2.0]).unwrap();
        assert_eq!(lhs.add(&rhs).unwrap_err(), MaskingError::ShapeMismatch);
    }
}
