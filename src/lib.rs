#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Pairwise-masking secure aggregation for federated learning.
//!
//! A set of mutually distrusting participants each contribute a numeric
//! update tensor, and a coordinator learns only the sum of all
//! contributions, never an individual one. Every pair of participants
//! agrees on a shared secret via Diffie–Hellman key agreement over a
//! configurable cyclic group and derives the same pseudo-random mask
//! tensor from it. The participant with the smaller identifier subtracts
//! the mask while the other adds it, so all pairwise masks cancel exactly
//! when the coordinator sums the masked updates. Each participant
//! additionally adds a self-mask derived from a private per-round seed,
//! which protects its contribution even against full collusion of the
//! remaining participants.
//!
//! To survive participant dropout, the secret key and the self-mask seed
//! are split into t-of-n threshold shares which peers store for eventual
//! reconstruction by a coordinator. Reconstruction itself is a
//! coordinator-side concern and not part of this crate.
//!
//! This crate only produces and consumes public keys, masked update
//! tensors and secret shares. Training, dataset handling and the
//! transport that carries the payloads between participants are the
//! caller's responsibility.

pub mod crypto;
pub mod mask;
pub mod message;
pub mod settings;
pub mod sharing;

use std::collections::HashMap;

use derive_more::{Display, From, Into};
use num::bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An opaque, totally ordered participant identifier.
///
/// The ordering is load-bearing: it decides which side of a pair adds
/// its pairwise mask and which side subtracts it.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct ParticipantId(u64);

/// A dictionary mapping each participant to its announced public key.
pub type PublicKeyDict = HashMap<ParticipantId, BigUint>;

/// A dictionary mapping each holder to its share of one split secret.
pub type ShareDict = HashMap<ParticipantId, BigUint>;

/// A dictionary mapping each peer to the pair of shares received from it.
pub type SecretShareDict = HashMap<ParticipantId, message::SharePair>;
