// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lottery Host Functions Implementation
//!
//! Free functions over [`LottoHost`](crate::lotto::traits::LottoHost),
//! organized by functional category:
//!
//! - **Account**: Address, caller, call value and balance
//! - **Block**: Block number, timestamp and windowed block hashes
//! - **Crypto**: Keccak-256 hashing
//! - **Log**: Event logging and emission

pub mod account;
pub mod block;
pub mod crypto;
pub mod log;

// Account operations
pub use account::{get_address, get_call_value, get_caller, get_self_balance};

// Block operations
pub use block::{get_block_hash, get_block_number, get_block_timestamp};

// Crypto operations
pub use crypto::keccak256;

// Log operations
pub use log::{emit_log2, emit_log_event};
