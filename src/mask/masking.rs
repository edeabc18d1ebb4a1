//! Per-round masking sessions.
//!
//! See the [mask module] documentation since this is a private module anyways.
//!
//! [mask module]: crate::mask

use std::collections::HashSet;

use num::bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::{
    crypto::{prng::generate_integer, DhKeyPair, GroupParams},
    mask::{
        generator::derive_mask,
        tensor::{DataType, Tensor},
        MaskingError,
    },
    message::{MaskedUpdate, PublicKeyAnnouncement, SecretShares, SharePair},
    sharing::{self, SharingError},
    ParticipantId,
    PublicKeyDict,
    SecretShareDict,
};

/// One participant's state for one aggregation round.
///
/// The session owns the participant's key pair and its private self-mask
/// seed, collects the public keys announced by peers, masks raw update
/// tensors and splits the secret material into threshold shares. It
/// never touches the network: the caller feeds it collected payloads and
/// forwards what it produces.
pub struct MaskingSession {
    id: ParticipantId,
    params: GroupParams,
    keys: DhKeyPair,
    self_mask_seed: BigUint,
    peer_keys: PublicKeyDict,
    peer_shares: SecretShareDict,
}

impl MaskingSession {
    /// Creates a session for one participant under the given group
    /// parameters, generating a fresh key pair and self-mask seed.
    pub fn new(id: ParticipantId, params: GroupParams) -> Self {
        let keys = DhKeyPair::generate(&params);
        let mut prng = ChaCha20Rng::from_entropy();
        let self_mask_seed = generate_integer(&mut prng, &params.modulus);
        Self {
            id,
            params,
            keys,
            self_mask_seed,
            peer_keys: PublicKeyDict::new(),
            peer_shares: SecretShareDict::new(),
        }
    }

    /// Gets this participant's identity.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Gets this participant's public key.
    pub fn public_key(&self) -> &BigUint {
        self.keys.public()
    }

    /// Replaces the group parameters and recomputes the public key with
    /// the existing secret.
    ///
    /// Previously derived shared secrets and previously collected peer
    /// keys are stale after this; peers must re-announce.
    pub fn reconfigure(&mut self, params: GroupParams) {
        debug!("installing new group parameters");
        self.keys.reconfigure(&params);
        self.params = params;
        self.peer_keys.clear();
    }

    /// The announcement peers need to derive masks against this
    /// participant.
    pub fn announcement(&self) -> PublicKeyAnnouncement {
        PublicKeyAnnouncement {
            participant_id: self.id,
            public_key: self.keys.public().clone(),
        }
    }

    /// Stores an announced peer public key, overwriting any previous one.
    pub fn store_public_key(&mut self, id: ParticipantId, public_key: BigUint) {
        trace!(peer = %id, "storing peer public key");
        self.peer_keys.insert(id, public_key);
    }

    /// Masks a raw update tensor against the given peers.
    ///
    /// For every peer in `peers`, the pairwise mask is derived from the
    /// shared secret and added if the peer's identifier is greater than
    /// this participant's, subtracted if smaller, and skipped if equal.
    /// The self-mask is always added last. The input tensor is left
    /// untouched; a fresh masked tensor is returned.
    ///
    /// # Errors
    /// Fails with [`MaskingError::MissingPeerKey`] if a peer has not
    /// announced its public key and with [`MaskingError::DuplicatePeer`]
    /// if a peer is listed twice: silently skipping the former or
    /// double-masking against the latter would break cancellation at the
    /// coordinator. Also fails for unsupported shapes, see
    /// [`derive_mask()`].
    ///
    /// [`derive_mask()`]: crate::mask::derive_mask
    pub fn mask(&self, update: &Tensor, peers: &[ParticipantId]) -> Result<Tensor, MaskingError> {
        let shape = update.shape();
        let data_type = update.data_type();
        debug!(peers = peers.len(), "masking update tensor");

        let mut seen = HashSet::with_capacity(peers.len());
        let mut masked = update.clone();
        for peer in peers {
            if !seen.insert(*peer) {
                return Err(MaskingError::DuplicatePeer(*peer));
            }
            if *peer == self.id {
                continue;
            }
            let public_key = self
                .peer_keys
                .get(peer)
                .ok_or(MaskingError::MissingPeerKey(*peer))?;
            let shared = self.keys.shared_secret(public_key, &self.params);
            let mask = derive_mask(&shared, shape, data_type)?;
            masked = if *peer > self.id {
                masked.add(&mask)?
            } else {
                masked.sub(&mask)?
            };
        }
        masked.add(&derive_mask(&self.self_mask_seed, shape, data_type)?)
    }

    /// Masks a named collection of update tensors, layer by layer.
    pub fn mask_update(
        &self,
        update: &MaskedUpdate,
        peers: &[ParticipantId],
    ) -> Result<MaskedUpdate, MaskingError> {
        update
            .iter()
            .map(|(name, tensor)| Ok((name.clone(), self.mask(tensor, peers)?)))
            .collect()
    }

    /// The mask derived from this participant's private self-mask seed.
    ///
    /// The coordinator can only remove it from the sum after threshold
    /// reconstruction of the seed.
    pub fn self_mask(&self, shape: &[usize], data_type: DataType) -> Result<Tensor, MaskingError> {
        derive_mask(&self.self_mask_seed, shape, data_type)
    }

    /// Splits this participant's secret key and self-mask seed into
    /// threshold shares, one [`SharePair`] per holder.
    ///
    /// This participant's own pair is stored alongside the ingested peer
    /// pairs as well as included in the returned message.
    ///
    /// # Errors
    /// Fails with [`SharingError::InvalidThreshold`] if `threshold` is
    /// zero or exceeds the number of holders, and with
    /// [`SharingError::DuplicateHolder`] if a holder is listed twice.
    pub fn share_own_secrets(
        &mut self,
        threshold: usize,
        holders: &[ParticipantId],
    ) -> Result<SecretShares, SharingError> {
        debug!(threshold, holders = holders.len(), "splitting secret material");
        let mut prng = ChaCha20Rng::from_entropy();
        let key_shares =
            self.keys
                .split_secret(threshold, holders, &self.params.modulus, &mut prng)?;
        let mut seed_shares = sharing::split(
            &self.self_mask_seed,
            threshold,
            holders,
            &self.params.modulus,
            &mut prng,
        )?;

        let shares = key_shares
            .into_iter()
            .filter_map(|(holder, secret_key)| {
                seed_shares.remove(&holder).map(|self_mask_seed| {
                    let pair = SharePair {
                        secret_key,
                        self_mask_seed,
                    };
                    (holder, pair)
                })
            })
            .collect::<SecretShareDict>();

        if let Some(own) = shares.get(&self.id) {
            self.peer_shares.insert(self.id, own.clone());
        }
        Ok(SecretShares {
            from: self.id,
            shares,
        })
    }

    /// Stores the share pair received from a peer.
    ///
    /// Re-ingesting from the same peer overwrites the previous entry;
    /// the external transport may deliver at least once.
    pub fn ingest_shares(&mut self, from: ParticipantId, shares: SharePair) {
        trace!(peer = %from, "storing peer share pair");
        self.peer_shares.insert(from, shares);
    }

    /// Extracts and stores this participant's entry from a full share
    /// message, if present.
    pub fn ingest(&mut self, message: &SecretShares) {
        if let Some(pair) = message.shares.get(&self.id) {
            self.ingest_shares(message.from, pair.clone());
        }
    }

    /// Gets the share pairs stored so far, keyed by the peer they came
    /// from.
    pub fn stored_shares(&self) -> &SecretShareDict {
        &self.peer_shares
    }
}
