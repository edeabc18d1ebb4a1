//! Payload shapes carried by the external transport.
//!
//! This crate defines no wire encoding of its own; the surrounding
//! transport decides how these payloads are serialized and delivered.
//! All types derive [`serde::Serialize`] and [`serde::Deserialize`] so
//! any `serde` format works out of the box.

use std::collections::{BTreeMap, HashMap};

use num::bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{mask::Tensor, ParticipantId};

/// A public key announcement, broadcast to all peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyAnnouncement {
    /// The announcing participant.
    pub participant_id: ParticipantId,
    /// Its Diffie–Hellman public key.
    pub public_key: BigUint,
}

/// The pair of threshold shares one holder receives from one peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePair {
    /// The holder's share of the peer's secret key.
    pub secret_key: BigUint,
    /// The holder's share of the peer's self-mask seed.
    pub self_mask_seed: BigUint,
}

/// The threshold shares of one participant's secret material, sent
/// point-to-point so that each holder stores only its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretShares {
    /// The participant whose secrets were split.
    pub from: ParticipantId,
    /// One share pair per holder.
    pub shares: HashMap<ParticipantId, SharePair>,
}

/// A masked model update: named tensors, one per layer.
///
/// A `BTreeMap` keeps the layer order stable across participants.
pub type MaskedUpdate = BTreeMap<String, Tensor>;
