//! Configuration consumed by an aggregation round.
//!
//! The settings mirror the options a round coordinator distributes to
//! all participants: the threshold parameters of the secret sharing, the
//! cyclic group and the total participant count. Deserialize them from
//! any `serde` source and [`validate()`] before use.
//!
//! ```
//! # use secagg_core::settings::SessionSettings;
//! let settings: SessionSettings = serde_json::from_str(
//!     r#"{"t": 3, "k": 5, "base": 2, "mod": 100103, "no_models": 5}"#,
//! ).unwrap();
//! settings.validate().unwrap();
//! ```
//!
//! [`validate()`]: SessionSettings::validate

use num::bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::GroupParams;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors related to invalid round settings.
pub enum InvalidSettingsError {
    #[error("the threshold must be at least 1")]
    Threshold,

    #[error("the share count must be at least the threshold")]
    ShareCount,

    #[error("the group generator must be at least 2")]
    Base,

    #[error("the group modulus must be at least 2")]
    Modulus,

    #[error("the participant count must be at least 1")]
    Participants,
}

/// The recognized options for one aggregation round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// The threshold `t`: how many shares suffice to reconstruct a
    /// secret.
    pub t: usize,
    /// The total share count.
    #[serde(alias = "n")]
    pub k: usize,
    /// The generator of the cyclic group.
    pub base: u64,
    /// The modulus of the cyclic group.
    #[serde(rename = "mod")]
    pub modulus: u64,
    /// The total participant count.
    pub no_models: usize,
}

impl SessionSettings {
    /// Checks the settings for consistency.
    ///
    /// # Errors
    /// Fails with the first violated constraint: `t >= 1`, `k >= t`,
    /// `base >= 2`, `modulus >= 2`, `no_models >= 1`.
    pub fn validate(&self) -> Result<(), InvalidSettingsError> {
        if self.t < 1 {
            return Err(InvalidSettingsError::Threshold);
        }
        if self.k < self.t {
            return Err(InvalidSettingsError::ShareCount);
        }
        if self.base < 2 {
            return Err(InvalidSettingsError::Base);
        }
        if self.modulus < 2 {
            return Err(InvalidSettingsError::Modulus);
        }
        if self.no_models < 1 {
            return Err(InvalidSettingsError::Participants);
        }
        Ok(())
    }

    /// The group parameters these settings describe.
    pub fn group_params(&self) -> GroupParams {
        GroupParams::new(BigUint::from(self.base), BigUint::from(self.modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            t: 3,
            k: 5,
            base: 2,
            modulus: 100_103,
            no_models: 5,
        }
    }

    #[test]
    fn test_parse() {
        let parsed: SessionSettings = serde_json::from_str(
            r#"{"t": 3, "k": 5, "base": 2, "mod": 100103, "no_models": 5}"#,
        )
        .unwrap();
        assert_eq!(parsed, settings());
        parsed.validate().unwrap();
    }

    #[test]
    fn test_parse_share_count_alias() {
        let parsed: SessionSettings = serde_json::from_str(
            r#"{"t": 3, "n": 5, "base": 2, "mod": 100103, "no_models": 5}"#,
        )
        .unwrap();
        assert_eq!(parsed.k, 5);
    }

    #[test]
    fn test_validate() {
        let mut invalid = settings();
        invalid.t = 0;
        assert_eq!(invalid.validate(), Err(InvalidSettingsError::Threshold));

        let mut invalid = settings();
        invalid.k = 2;
        assert_eq!(invalid.validate(), Err(InvalidSettingsError::ShareCount));

        let mut invalid = settings();
        invalid.base = 1;
        assert_eq!(invalid.validate(), Err(InvalidSettingsError::Base));

        let mut invalid = settings();
        invalid.modulus = 0;
        assert_eq!(invalid.validate(), Err(InvalidSettingsError::Modulus));

        let mut invalid = settings();
        invalid.no_models = 0;
        assert_eq!(invalid.validate(), Err(InvalidSettingsError::Participants));
    }

    #[test]
    fn test_group_params() {
        let params = settings().group_params();
        assert_eq!(params.base, BigUint::from(2_u8));
        assert_eq!(params.modulus, BigUint::from(100_103_u32));
    }
}
