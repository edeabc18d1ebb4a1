//! Diffie–Hellman key agreement over a configurable cyclic group.
//!
//! See the [crypto module] documentation since this is a private module anyways.
//!
//! [crypto module]: crate::crypto

use num::bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::{
    crypto::prng::generate_integer,
    sharing::{self, SharingError},
    ParticipantId,
    ShareDict,
};

/// The parameters of the multiplicative cyclic group.
///
/// All participants of a round must hold identical parameters; changing
/// them invalidates every previously derived shared secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupParams {
    /// The generator of the group.
    pub base: BigUint,
    /// The modulus of the group.
    pub modulus: BigUint,
}

impl GroupParams {
    /// Creates group parameters from a generator and a modulus.
    pub fn new(base: BigUint, modulus: BigUint) -> Self {
        Self { base, modulus }
    }
}

impl Default for GroupParams {
    /// The provisional toy group used until real parameters are
    /// distributed and installed via reconfiguration.
    fn default() -> Self {
        Self {
            base: BigUint::from(2_u8),
            modulus: BigUint::from(17_u8),
        }
    }
}

/// A Diffie–Hellman key pair over a cyclic group.
///
/// The secret exponent never leaves this type; shared secrets are derived
/// through [`shared_secret()`].
///
/// [`shared_secret()`]: DhKeyPair::shared_secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhKeyPair {
    public: BigUint,
    secret: BigUint,
}

impl DhKeyPair {
    /// Generates a new key pair under the given group parameters.
    ///
    /// The secret is drawn uniformly from `[0, modulus)` with zero
    /// remapped to one, since a zero exponent collapses the discrete-log
    /// problem.
    pub fn generate(params: &GroupParams) -> Self {
        let mut prng = ChaCha20Rng::from_entropy();
        let mut secret = generate_integer(&mut prng, &params.modulus);
        if secret == BigUint::from(0_u8) {
            secret = BigUint::from(1_u8);
        }
        let public = params.base.modpow(&secret, &params.modulus);
        Self { public, secret }
    }

    /// Gets the public key.
    pub fn public(&self) -> &BigUint {
        &self.public
    }

    /// Recomputes the public key for new group parameters, keeping the
    /// existing secret.
    pub fn reconfigure(&mut self, params: &GroupParams) {
        self.public = params.base.modpow(&self.secret, &params.modulus);
    }

    /// Derives the secret shared with the holder of `peer_public`.
    ///
    /// Both sides of a pair obtain the same value:
    /// `peer_public^secret mod modulus`.
    pub fn shared_secret(&self, peer_public: &BigUint, params: &GroupParams) -> BigUint {
        peer_public.modpow(&self.secret, &params.modulus)
    }

    /// Splits the secret exponent into threshold shares without exposing
    /// it.
    ///
    /// # Errors
    /// Fails with [`SharingError::InvalidThreshold`] if `threshold` is
    /// zero or exceeds the number of holders, and with
    /// [`SharingError::DuplicateHolder`] if a holder is listed twice.
    pub fn split_secret(
        &self,
        threshold: usize,
        holders: &[ParticipantId],
        modulus: &BigUint,
        prng: &mut ChaCha20Rng,
    ) -> Result<ShareDict, SharingError> {
        sharing::split(&self.secret, threshold, holders, modulus, prng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prime_params() -> GroupParams {
        // 2^31 - 1 is prime
        GroupParams::new(BigUint::from(5_u8), BigUint::from(2_147_483_647_u32))
    }

    #[test]
    fn test_secret_never_zero() {
        let params = GroupParams::default();
        for _ in 0..200 {
            let keys = DhKeyPair::generate(&params);
            assert_ne!(keys.secret, BigUint::from(0_u8));
            assert!(keys.secret < params.modulus);
        }
    }

    #[test]
    fn test_public_key_from_secret() {
        let params = prime_params();
        let keys = DhKeyPair::generate(&params);
        assert_eq!(
            keys.public,
            params.base.modpow(&keys.secret, &params.modulus),
        );
    }

    #[test]
    fn test_shared_secret_symmetry() {
        for params in [GroupParams::default(), prime_params()] {
            for _ in 0..10 {
                let alice = DhKeyPair::generate(&params);
                let bob = DhKeyPair::generate(&params);
                assert_eq!(
                    alice.shared_secret(bob.public(), &params),
                    bob.shared_secret(alice.public(), &params),
                );
            }
        }
    }

    #[test]
    fn test_reconfigure_keeps_secret() {
        let mut keys = DhKeyPair::generate(&GroupParams::default());
        let secret = keys.secret.clone();
        let params = prime_params();
        keys.reconfigure(&params);
        assert_eq!(keys.secret, secret);
        assert_eq!(
            keys.public,
            params.base.modpow(&secret, &params.modulus),
        );
    }

    #[test]
    fn test_reconfigured_pairs_still_agree() {
        let provisional = GroupParams::default();
        let mut alice = DhKeyPair::generate(&provisional);
        let mut bob = DhKeyPair::generate(&provisional);

        let params = prime_params();
        alice.reconfigure(&params);
        bob.reconfigure(&params);
        assert_eq!(
            alice.shared_secret(bob.public(), &params),
            bob.shared_secret(alice.public(), &params),
        );
    }
}
