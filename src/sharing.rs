//! Threshold (t-of-n) splitting of secret integers.
//!
//! A secret is split by evaluating a random polynomial of degree `t - 1`
//! with the secret as constant term at the points `1..=n`, one point per
//! holder. Any `t` holders can hand their shares to a coordinator for
//! reconstruction; fewer reveal nothing about the secret. This crate
//! only produces and stores shares, it never recombines them —
//! reconstruction is a coordinator-side concern.
//!
//! Shares are plain unreduced integers: the polynomial sum is NOT taken
//! modulo the group modulus, so a reconstructing party must interpolate
//! over the integers rather than a finite field.

use std::collections::HashSet;

use num::bigint::BigUint;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::{crypto::prng::generate_integer, ParticipantId, ShareDict};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors related to threshold splitting.
pub enum SharingError {
    #[error("invalid threshold {threshold} for {holders} holders")]
    InvalidThreshold { threshold: usize, holders: usize },

    #[error("holder {0} appears more than once")]
    DuplicateHolder(ParticipantId),
}

/// Splits a secret into one share per holder, any `threshold` of which
/// suffice for reconstruction.
///
/// The `threshold - 1` polynomial coefficients are drawn uniformly from
/// `[0, modulus)`. The share for the `k`-th holder (1-indexed position
/// in `holders`) is the polynomial evaluated at `k`; the returned
/// dictionary is keyed by holder identity, so callers must preserve the
/// `holders` ordering to know which point a share belongs to.
///
/// # Errors
/// Fails with [`SharingError::InvalidThreshold`] if `threshold` is zero
/// or exceeds the number of holders, and with
/// [`SharingError::DuplicateHolder`] if a holder is listed twice; a
/// split is never silently truncated and a holder never receives two
/// polynomial points.
pub fn split(
    secret: &BigUint,
    threshold: usize,
    holders: &[ParticipantId],
    modulus: &BigUint,
    prng: &mut ChaCha20Rng,
) -> Result<ShareDict, SharingError> {
    if threshold < 1 || holders.len() < threshold {
        return Err(SharingError::InvalidThreshold {
            threshold,
            holders: holders.len(),
        });
    }
    let mut seen = HashSet::with_capacity(holders.len());
    for holder in holders {
        if !seen.insert(holder) {
            return Err(SharingError::DuplicateHolder(*holder));
        }
    }
    let coefficients = (0..threshold - 1)
        .map(|_| generate_integer(prng, modulus))
        .collect::<Vec<_>>();
    Ok(eval_shares(secret, &coefficients, holders))
}

/// Evaluates the share polynomial with fixed coefficients at the points
/// `1..=holders.len()`.
///
/// `share_k = secret + Σ_j coefficients[j] * k^(j+1)` over the unreduced
/// integers.
pub fn eval_shares(
    secret: &BigUint,
    coefficients: &[BigUint],
    holders: &[ParticipantId],
) -> ShareDict {
    holders
        .iter()
        .enumerate()
        .map(|(position, holder)| {
            let point = BigUint::from(position + 1);
            let mut power = BigUint::from(1_u8);
            let mut share = secret.clone();
            for coefficient in coefficients {
                power *= &point;
                share += coefficient * &power;
            }
            (*holder, share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn holders(n: u64) -> Vec<ParticipantId> {
        (1..=n).map(ParticipantId::from).collect()
    }

    #[test]
    fn test_invalid_threshold() {
        let secret = BigUint::from(7_u8);
        let modulus = BigUint::from(17_u8);
        let mut prng = ChaCha20Rng::from_seed([0_u8; 32]);

        assert_eq!(
            split(&secret, 0, &holders(5), &modulus, &mut prng).unwrap_err(),
            SharingError::InvalidThreshold {
                threshold: 0,
                holders: 5,
            },
        );
        assert_eq!(
            split(&secret, 4, &holders(3), &modulus, &mut prng).unwrap_err(),
            SharingError::InvalidThreshold {
                threshold: 4,
                holders: 3,
            },
        );
    }

    #[test]
    fn test_duplicate_holder() {
        let secret = BigUint::from(7_u8);
        let modulus = BigUint::from(17_u8);
        let mut prng = ChaCha20Rng::from_seed([0_u8; 32]);

        let duplicated = [1_u64, 1, 2]
            .iter()
            .map(|id| ParticipantId::from(*id))
            .collect::<Vec<_>>();
        assert_eq!(
            split(&secret, 2, &duplicated, &modulus, &mut prng).unwrap_err(),
            SharingError::DuplicateHolder(ParticipantId::from(1)),
        );
    }

    #[test]
    fn test_share_per_holder() {
        let secret = BigUint::from(7_u8);
        let modulus = BigUint::from(17_u8);
        let mut prng = ChaCha20Rng::from_seed([0_u8; 32]);
        let holders = holders(5);

        let shares = split(&secret, 3, &holders, &modulus, &mut prng).unwrap();
        assert_eq!(shares.len(), 5);
        for holder in &holders {
            assert!(shares.contains_key(holder));
        }
    }

    #[test]
    fn test_unit_threshold_replicates_secret() {
        let secret = BigUint::from(42_u8);
        let modulus = BigUint::from(17_u8);
        let mut prng = ChaCha20Rng::from_seed([0_u8; 32]);

        let shares = split(&secret, 1, &holders(4), &modulus, &mut prng).unwrap();
        assert!(shares.values().all(|share| share == &secret));
    }

    #[test]
    fn test_polynomial_evaluation() {
        // secret 7 with coefficients [2, 3]: share_k = 7 + 2k + 3k^2
        let secret = BigUint::from(7_u8);
        let coefficients = vec![BigUint::from(2_u8), BigUint::from(3_u8)];
        let holders = holders(5);

        let shares = eval_shares(&secret, &coefficients, &holders);
        for (position, holder) in holders.iter().enumerate() {
            let k = position as u64 + 1;
            assert_eq!(shares[holder], BigUint::from(7 + 2 * k + 3 * k * k));
        }
    }

    #[test]
    fn test_shares_are_unreduced() {
        // with modulus 17 a reduced share could never reach 7 + 2*5 + 3*25
        let secret = BigUint::from(7_u8);
        let coefficients = vec![BigUint::from(2_u8), BigUint::from(3_u8)];
        let holders = holders(5);

        let shares = eval_shares(&secret, &coefficients, &holders);
        assert_eq!(shares[&ParticipantId::from(5)], BigUint::from(92_u8));
        assert!(shares[&ParticipantId::from(5)] > BigUint::from(17_u8));
    }
}
