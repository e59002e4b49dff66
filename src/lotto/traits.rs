// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lottery Host Traits
//!
//! This module defines the host interface the lottery contract executes
//! against. The host owns everything the contract does not: the block
//! counter, the historical block-hash source, account balances and the event
//! log. Implementations can be backed by a mock chain, a test double, or a
//! real node adapter.

use crate::lotto::error::LottoResult;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// 20-byte account address
pub type Address = [u8; 20];

/// Log event emitted by a contract
/// Represents an EVM log entry with contract address, data, and topics
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    /// Address of the contract that emitted the event
    pub contract_address: Address,
    /// Event data (arbitrary bytes)
    pub data: Vec<u8>,
    /// Event topics (up to 4 topics, each 32 bytes)
    pub topics: Vec<[u8; 32]>,
}

/// Convert a BigUint to a 32-byte array (big-endian, zero-padded)
/// Values wider than 256 bits keep their least significant 32 bytes
pub fn bigint_to_bytes32(value: &BigUint) -> [u8; 32] {
    let mut result = [0u8; 32];
    let bytes = value.to_bytes_be();

    if bytes.len() > 32 {
        result.copy_from_slice(&bytes[bytes.len() - 32..]);
    } else {
        let start_pos = 32 - bytes.len();
        result[start_pos..].copy_from_slice(&bytes);
    }

    result
}

/// Convert a wei amount to a 32-byte big-endian word
pub fn u128_to_bytes32(value: u128) -> [u8; 32] {
    bigint_to_bytes32(&BigUint::from(value))
}

/// Convert a 32-byte big-endian word to a wei amount
/// Returns None when the value does not fit in 128 bits
pub fn bytes32_to_u128(value: &[u8; 32]) -> Option<u128> {
    BigUint::from_bytes_be(value).to_u128()
}

/// Unified Lottery Host Interface
///
/// The trait is organized into logical groups:
/// - Account Operations: contract address, caller, call value, balances
/// - Block Operations: current block number, timestamp, historical hashes
/// - Value Operations: transfers out of the contract
/// - Log Operations: event emission
///
/// Mutating methods take `&self`; hosts keep their per-call state behind
/// interior mutability and decide at the end of the call whether to commit.
pub trait LottoHost {
    /// Get the current contract address
    fn get_address(&self) -> &Address;

    /// Get the caller address (msg.sender)
    fn get_caller(&self) -> &Address;

    /// Get the call value (msg.value) as a 32-byte big-endian word
    fn get_call_value(&self) -> &[u8; 32];

    /// Get the number of the block the call executes in
    fn get_block_number(&self) -> u64;

    /// Get the timestamp of the block the call executes in
    fn get_block_timestamp(&self) -> u64;

    /// Get the raw hash for a specific block number, if the host knows it.
    /// Window enforcement happens in [`crate::lotto::host_functions::block`].
    fn get_block_hash(&self, block_number: u64) -> Option<[u8; 32]>;

    /// Get the balance of an account in wei
    fn get_balance(&self, address: &Address) -> u128;

    /// Move `amount` wei from the executing contract to `to`
    fn transfer(&self, to: &Address, amount: u128) -> LottoResult<()>;

    /// Add an event to the event log
    fn emit_log_event(&self, event: LogEvent);
}
