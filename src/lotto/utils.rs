// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lottery Utilities - Amount Conversion and Debug Formatting
//!
//! # Usage
//!
//! ```rust
//! use hashlotto_rust::lotto::utils::{format_ether, to_wei};
//!
//! let unit = to_wei("0.1").unwrap();
//! assert_eq!(unit, 100_000_000_000_000_000);
//! assert_eq!(format_ether(unit * 2), "0.2");
//! ```

use crate::lotto::error::{invalid_config_error, LottoResult};
use crate::lotto::traits::Address;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Number of wei in one ether
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

const ETHER_DECIMALS: usize = 18;

// ============================================================================
// Amount Conversion
// ============================================================================

/// Parse a decimal ether amount ("0.1", "2", "1.5") into wei
pub fn to_wei(ether: &str) -> LottoResult<u128> {
    let ether = ether.trim();
    let (whole, fraction) = match ether.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (ether, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid_config_error("empty ether amount"));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid_config_error(&format!(
            "ether amount '{}' has more than {} decimals",
            ether, ETHER_DECIMALS
        )));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid_config_error(&format!(
            "ether amount '{}' is not a decimal number",
            ether
        )));
    }

    let digits = format!("{}{:0<width$}", whole, fraction, width = ETHER_DECIMALS);
    let wei = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_else(BigUint::zero);

    wei.to_u128().ok_or_else(|| {
        invalid_config_error(&format!("ether amount '{}' does not fit in 128 bits", ether))
    })
}

/// Render a wei amount as a decimal ether string without trailing zeros
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;
    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction, width = ETHER_DECIMALS);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

// ============================================================================
// Debug Formatting
// ============================================================================

/// Format an address as a 0x-prefixed hex string
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wei() {
        assert_eq!(to_wei("0.1").unwrap(), WEI_PER_ETHER / 10);
        assert_eq!(to_wei("2").unwrap(), 2 * WEI_PER_ETHER);
        assert_eq!(to_wei(".5").unwrap(), WEI_PER_ETHER / 2);
        assert_eq!(to_wei("0.000000000000000001").unwrap(), 1);

        assert!(to_wei("").is_err());
        assert!(to_wei("0.0000000000000000001").is_err());
        assert!(to_wei("1e18").is_err());
        assert!(to_wei("-1").is_err());
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(0), "0");
        assert_eq!(format_ether(WEI_PER_ETHER / 5), "0.2");
        assert_eq!(format_ether(3 * WEI_PER_ETHER), "3");
        assert_eq!(format_ether(1), "0.000000000000000001");
    }

    #[test]
    fn test_format_address() {
        let mut addr = [0u8; 20];
        addr[19] = 0x2a;
        assert_eq!(
            format_address(&addr),
            "0x000000000000000000000000000000000000002a"
        );
    }
}
