//! Key agreement over a cyclic group and deterministic PRNG helpers.
//!
//! The key agreement is plain Diffie–Hellman over a configurable
//! multiplicative group: each participant publishes `base^secret mod
//! modulus` and derives the same shared secret from any peer's public key
//! by commutativity of exponentiation. The PRNG helpers turn such shared
//! secrets into explicitly seeded `ChaCha20` generators, so mask
//! derivation is deterministic and auditable across participants.
//!
//! # Examples
//! ```
//! # use secagg_core::crypto::{DhKeyPair, GroupParams};
//! let params = GroupParams::default();
//! let alice = DhKeyPair::generate(&params);
//! let bob = DhKeyPair::generate(&params);
//! assert_eq!(
//!     alice.shared_secret(bob.public(), &params),
//!     bob.shared_secret(alice.public(), &params),
//! );
//! ```

pub(crate) mod dh;
pub(crate) mod prng;

pub use self::{
    dh::{DhKeyPair, GroupParams},
    prng::{generate_integer, mask_prng},
};
