//! PRNG utilities for the crypto primitives.
//!
//! See the [crypto module] documentation since this is a private module anyways.
//!
//! [crypto module]: crate::crypto

use num::{bigint::BigUint, traits::identities::Zero};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generates a pseudo-random integer.
///
/// Draws from a uniform distribution over the integers between zero
/// (included) and `max_int` (excluded). Employs the `ChaCha20` stream
/// cipher as a PRNG.
pub fn generate_integer(prng: &mut ChaCha20Rng, max_int: &BigUint) -> BigUint {
    if max_int.is_zero() {
        return BigUint::zero();
    }
    let mut bytes = max_int.to_bytes_le();
    let mut rand_int = max_int.clone();
    while &rand_int >= max_int {
        prng.fill_bytes(&mut bytes);
        rand_int = BigUint::from_bytes_le(&bytes);
    }
    rand_int
}

/// Creates a `ChaCha20` PRNG keyed by an integer seed.
///
/// The seed is laid out little-endian into the 32-byte ChaCha20 key,
/// zero-padded or truncated to fit. Two participants holding the same
/// integer therefore construct bit-identical generators, which is the
/// backbone of pairwise mask cancellation.
pub fn mask_prng(seed: &BigUint) -> ChaCha20Rng {
    let bytes = seed.to_bytes_le();
    let mut key = [0_u8; 32];
    let len = bytes.len().min(key.len());
    key[..len].copy_from_slice(&bytes[..len]);
    ChaCha20Rng::from_seed(key)
}
