//! Deterministic mask tensor generation.
//!
//! See the [mask module] documentation since this is a private module anyways.
//!
//! [mask module]: crate::mask

use num::bigint::BigUint;
use rand::{Rng, RngCore};

use crate::{
    crypto::prng::mask_prng,
    mask::{
        tensor::{element_count, DataType, Tensor},
        MaskingError,
    },
};

/// The highest tensor rank masks are derived for.
pub const MAX_RANK: usize = 4;

/// Derives a pseudo-random mask tensor from an integer seed.
///
/// The derivation is deterministic: identical seed, shape and numeric
/// kind yield bit-identical tensors on every participant and every call.
/// Each call constructs its own explicitly seeded generator; no global
/// PRNG state is involved.
///
/// # Errors
/// Fails with [`MaskingError::UnsupportedRank`] for shapes of rank
/// greater than [`MAX_RANK`], and with [`MaskingError::ShapeMismatch`]
/// for non-scalar shapes with a zero dimension.
pub fn derive_mask(
    seed: &BigUint,
    shape: &[usize],
    data_type: DataType,
) -> Result<Tensor, MaskingError> {
    if shape.len() > MAX_RANK {
        return Err(MaskingError::UnsupportedRank(shape.len()));
    }
    let len = element_count(shape);
    if len == 0 {
        return Err(MaskingError::ShapeMismatch);
    }

    let mut prng = mask_prng(seed);
    match data_type {
        DataType::I64 => {
            let data = (0..len).map(|_| prng.next_u64() as i64).collect();
            Tensor::from_i64(shape.to_vec(), data)
        }
        DataType::F32 => {
            let data = (0..len).map(|_| prng.gen::<f32>()).collect();
            Tensor::from_f32(shape.to_vec(), data)
        }
    }
}
