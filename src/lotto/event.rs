// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! `LogToldYouSo(address indexed who, bytes32 braggingRights)`

use crate::lotto::host_functions::crypto::keccak256;
use crate::lotto::ticket::Word;
use crate::lotto::traits::{Address, LogEvent};

/// Canonical event signature
pub const TOLD_YOU_SO_SIGNATURE: &str = "LogToldYouSo(address,bytes32)";

/// Event emitted when a claim is honored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToldYouSoEvent {
    pub who: Address,
    pub bragging_rights: Word,
}

impl ToldYouSoEvent {
    /// topic0 of every `LogToldYouSo` entry
    pub fn topic() -> [u8; 32] {
        keccak256(TOLD_YOU_SO_SIGNATURE.as_bytes())
    }

    /// Encode as (data, topics) for a LOG2 entry
    pub fn encode(&self) -> (Vec<u8>, [[u8; 32]; 2]) {
        let mut who_topic = [0u8; 32];
        who_topic[12..].copy_from_slice(&self.who);
        (self.bragging_rights.0.to_vec(), [Self::topic(), who_topic])
    }

    /// Decode from a log entry; None when the entry is another event
    pub fn decode(log: &LogEvent) -> Option<Self> {
        if log.topics.len() != 2 || log.topics[0] != Self::topic() || log.data.len() != 32 {
            return None;
        }
        if log.topics[1][..12] != [0u8; 12] {
            return None;
        }

        let mut who = [0u8; 20];
        who.copy_from_slice(&log.topics[1][12..]);
        Some(Self {
            who,
            bragging_rights: Word::from_slice(&log.data),
        })
    }
}
