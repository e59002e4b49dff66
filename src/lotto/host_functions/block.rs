// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Block Information Host Functions
//!
//! - [`get_block_number`] - Number of the block the call executes in
//! - [`get_block_timestamp`] - Block timestamp in seconds since Unix epoch
//! - [`get_block_hash`] - Hash of a recent block by number
//!
//! Block hashes are only available for the most recent `window` blocks.
//! The current block's own hash is never available.

use crate::lotto::traits::LottoHost;
use log::debug;

/// Get the current block number
pub fn get_block_number<T: LottoHost>(host: &T) -> u64 {
    host.get_block_number()
}

/// Get the current block timestamp
pub fn get_block_timestamp<T: LottoHost>(host: &T) -> u64 {
    host.get_block_timestamp()
}

/// Get a block hash for a specific block number
///
/// Returns:
/// - Some(hash) if `current - window <= block_num < current` and the host
///   knows the hash
/// - None if the block is the current one, in the future, too old, or unknown
pub fn get_block_hash<T: LottoHost>(host: &T, block_num: u64, window: u64) -> Option<[u8; 32]> {
    let current_block = host.get_block_number();

    if block_num >= current_block || current_block - block_num > window {
        debug!(
            "block hash {} unavailable at block {} (window {})",
            block_num, current_block, window
        );
        return None;
    }

    host.get_block_hash(block_num)
}
