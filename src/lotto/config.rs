// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lottery configuration
//!
//! Defaults reproduce the deployed contract: a 0.1 ether ticket, a 0.2 ether
//! payout (stake plus an equal prize from the pool), a one block minimum
//! offset, the 256 block hash window and a win whenever the lowest byte of
//! the target block hash is zero.

use crate::lotto::error::{invalid_config_error, LottoError, LottoResult};
use crate::lotto::ticket::Word;
use crate::lotto::utils::WEI_PER_ETHER;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of recent blocks whose hashes the host can return
pub const DEFAULT_HASH_WINDOW: u64 = 256;

/// Which target block hashes honor a claim
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinPredicate {
    /// The lowest-order byte of the hash is zero
    #[default]
    LowestByteZero,
    /// The hash equals the committed word
    WordEquals,
}

impl WinPredicate {
    pub fn holds(&self, hash: &Word, word: &Word) -> bool {
        match self {
            WinPredicate::LowestByteZero => hash.as_bytes()[31] == 0,
            WinPredicate::WordEquals => hash == word,
        }
    }
}

/// What happens when the target block hash does not honor a claim
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// The ticket is consumed and the deposit stays in the pool
    #[default]
    Forfeit,
    /// The call is rejected and the ticket survives
    Revert,
}

/// What happens when the target block hash has left the window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleTicketPolicy {
    /// The unavailable hash reads as the zero word. Only a ticket committed
    /// to that zero word is honored; any other claim is rejected.
    #[default]
    ZeroHash,
    /// The call is rejected
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LottoConfig {
    /// Exact payment required per ticket, in wei
    pub unit_amount: u128,
    /// Amount paid to an honored claim, in wei
    pub payout_amount: u128,
    /// Smallest accepted ahead offset
    pub min_ahead: u64,
    /// Number of recent blocks whose hashes are queryable
    pub hash_window: u64,
    pub win_predicate: WinPredicate,
    pub miss_policy: MissPolicy,
    pub stale_ticket_policy: StaleTicketPolicy,
}

impl Default for LottoConfig {
    fn default() -> Self {
        Self {
            unit_amount: WEI_PER_ETHER / 10,
            payout_amount: WEI_PER_ETHER / 5,
            min_ahead: 1,
            hash_window: DEFAULT_HASH_WINDOW,
            win_predicate: WinPredicate::default(),
            miss_policy: MissPolicy::default(),
            stale_ticket_policy: StaleTicketPolicy::default(),
        }
    }
}

impl LottoConfig {
    /// Set the ticket price; the payout follows at twice the price
    pub fn with_unit_amount(mut self, unit_amount: u128) -> Self {
        self.unit_amount = unit_amount;
        self.payout_amount = unit_amount.saturating_mul(2);
        self
    }

    pub fn with_payout_amount(mut self, payout_amount: u128) -> Self {
        self.payout_amount = payout_amount;
        self
    }

    pub fn with_min_ahead(mut self, min_ahead: u64) -> Self {
        self.min_ahead = min_ahead;
        self
    }

    pub fn with_hash_window(mut self, hash_window: u64) -> Self {
        self.hash_window = hash_window;
        self
    }

    pub fn with_win_predicate(mut self, win_predicate: WinPredicate) -> Self {
        self.win_predicate = win_predicate;
        self
    }

    pub fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    pub fn with_stale_ticket_policy(mut self, policy: StaleTicketPolicy) -> Self {
        self.stale_ticket_policy = policy;
        self
    }

    /// Check the configuration for values the contract cannot operate with
    pub fn validate(&self) -> LottoResult<()> {
        if self.unit_amount == 0 {
            return Err(invalid_config_error("unit_amount must be positive"));
        }
        if self.min_ahead == 0 {
            return Err(invalid_config_error("min_ahead must be at least 1"));
        }
        if self.hash_window == 0 {
            return Err(invalid_config_error("hash_window must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> LottoResult<Self> {
        let config: LottoConfig = serde_json::from_str(json)
            .map_err(|e| invalid_config_error(&format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> LottoResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LottoError::InvalidConfig {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LottoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payout_amount, 2 * config.unit_amount);
        assert_eq!(config.hash_window, 256);
        assert_eq!(config.win_predicate, WinPredicate::LowestByteZero);
    }

    #[test]
    fn test_win_predicates() {
        let mut hash = [0x11u8; 32];
        hash[31] = 0;
        let hash = Word(hash);
        let word = Word::from_utf8("hello world");

        assert!(WinPredicate::LowestByteZero.holds(&hash, &word));
        assert!(!WinPredicate::WordEquals.holds(&hash, &word));
        assert!(WinPredicate::WordEquals.holds(&hash, &hash));
        assert!(!WinPredicate::LowestByteZero.holds(&Word([0x11; 32]), &word));

        let config = LottoConfig::from_json_str(r#"{"win_predicate": "word_equals"}"#).unwrap();
        assert_eq!(config.win_predicate, WinPredicate::WordEquals);
    }

    #[test]
    fn test_from_json_partial() {
        let config = LottoConfig::from_json_str(
            r#"{"hash_window": 128, "miss_policy": "revert", "stale_ticket_policy": "reject"}"#,
        )
        .unwrap();
        assert_eq!(config.hash_window, 128);
        assert_eq!(config.miss_policy, MissPolicy::Revert);
        assert_eq!(config.stale_ticket_policy, StaleTicketPolicy::Reject);
        assert_eq!(config.unit_amount, LottoConfig::default().unit_amount);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(LottoConfig::from_json_str(r#"{"min_ahead": 0}"#).is_err());
        assert!(LottoConfig::from_json_str(r#"{"hash_window": 0}"#).is_err());
        assert!(LottoConfig::from_json_str("not json").is_err());
        assert!(LottoConfig::from_file("/nonexistent/lotto.json").is_err());
    }

    #[test]
    fn test_with_unit_amount_scales_payout() {
        let config = LottoConfig::default().with_unit_amount(7);
        assert_eq!(config.payout_amount, 14);
    }
}
