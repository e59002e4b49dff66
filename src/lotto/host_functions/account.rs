// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Account host functions

use crate::lotto::error::{overflow_error, LottoResult};
use crate::lotto::traits::{bytes32_to_u128, Address, LottoHost};

/// Get the executing contract's address
pub fn get_address<T: LottoHost>(host: &T) -> Address {
    *host.get_address()
}

/// Get the caller address (msg.sender)
pub fn get_caller<T: LottoHost>(host: &T) -> Address {
    *host.get_caller()
}

/// Get the call value in wei
///
/// Fails when the 256-bit value does not fit the 128-bit wei amounts the
/// lottery works with.
pub fn get_call_value<T: LottoHost>(host: &T) -> LottoResult<u128> {
    bytes32_to_u128(host.get_call_value()).ok_or_else(|| overflow_error("call_value", "get_call_value"))
}

/// Get the executing contract's balance in wei
pub fn get_self_balance<T: LottoHost>(host: &T) -> u128 {
    host.get_balance(host.get_address())
}
