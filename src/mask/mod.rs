//! Deterministic mask tensors and per-round masking sessions.
//!
//! # Update tensors
//! A [`Tensor`] is a shaped numeric array of rank 0 (scalar) up to 4, in
//! one of two numeric kinds ([`DataType::I64`] or [`DataType::F32`]). It
//! is the unit of exchange with the excluded training step: the trainer
//! hands the session a raw update tensor, the session hands back a masked
//! tensor of identical shape and kind. Tensors are never mutated in
//! place; every combination returns a fresh tensor. Integer tensors
//! combine with wrapping arithmetic, so masks cancel exactly in the
//! group of integers modulo `2^64`.
//!
//! # Mask derivation
//! [`derive_mask()`] is a deterministic pseudo-random tensor generator:
//! identical seed, shape and numeric kind yield bit-identical output on
//! every participant and every call. Seeded by a pairwise shared secret
//! it produces the pairwise mask; seeded by a participant's private
//! per-round seed it produces the self-mask.
//!
//! # Masking sessions
//! A [`MaskingSession`] orchestrates one round for one participant: it
//! owns the key pair and the self-mask seed, collects peer public key
//! announcements, masks update tensors, and splits and stores threshold
//! shares of its secret material.
//!
//! ```
//! # use secagg_core::{crypto::GroupParams, mask::{MaskingSession, Tensor}};
//! let params = GroupParams::default();
//! let mut alice = MaskingSession::new(1.into(), params.clone());
//! let mut bob = MaskingSession::new(2.into(), params);
//! alice.store_public_key(2.into(), bob.public_key().clone());
//! bob.store_public_key(1.into(), alice.public_key().clone());
//!
//! let update = Tensor::from_i64(vec![2], vec![40, 2]).unwrap();
//! let masked = alice.mask(&update, &[2.into()]).unwrap();
//! assert_eq!(masked.shape(), update.shape());
//! ```
//!
//! [`derive_mask()`]: crate::mask::derive_mask

pub(crate) mod generator;
pub(crate) mod masking;
pub(crate) mod tensor;

use thiserror::Error;

use crate::ParticipantId;

pub use self::{
    generator::{derive_mask, MAX_RANK},
    masking::MaskingSession,
    tensor::{DataType, Tensor},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors related to mask derivation and the masking of updates.
pub enum MaskingError {
    #[error("tensors of rank {0} are not supported")]
    UnsupportedRank(usize),

    #[error("the tensor shapes or numeric kinds are inconsistent")]
    ShapeMismatch,

    #[error("no public key is known for peer {0}")]
    MissingPeerKey(ParticipantId),

    #[error("peer {0} appears more than once in the roster")]
    DuplicatePeer(ParticipantId),
}
