// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Error Handling for Lottery Calls
//!
//! Every precondition violation is fatal to the individual call: the caller
//! receives a [`LottoError`] and the executing host discards all state
//! changes made by that call. There is no locally recoverable tier.
//!
//! # Error Categories
//!
//! - **Payment Errors** - Call value does not match the unit amount
//! - **Parameter Errors** - Offset below the configured minimum
//! - **Ticket Errors** - No ticket, target block not reached, wrong guess
//! - **Window Errors** - Target block hash no longer available
//! - **Pool Errors** - Contract cannot cover a payout or a transfer
//! - **Config Errors** - Invalid lottery configuration
//!
//! # Usage
//!
//! ```rust
//! use hashlotto_rust::lotto::error::*;
//!
//! let err = invalid_payment_error(100, 99, "mark_my_word");
//! assert_eq!(err.category(), "payment");
//! assert!(err.is_rejected_call());
//! ```

use thiserror::Error;

/// Result type for lottery operations
pub type LottoResult<T> = Result<T, LottoError>;

/// Errors that can occur while executing a lottery call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LottoError {
    #[error("[{function}] Invalid payment: expected {expected} wei, got {actual} wei")]
    InvalidPayment {
        expected: u128,
        actual: u128,
        function: String,
    },

    #[error("[{function}] Invalid ahead offset {ahead}: must be at least {min}")]
    InvalidOffset {
        ahead: u64,
        min: u64,
        function: String,
    },

    #[error("[{function}] No ticket held by 0x{who}")]
    NoTicket { who: String, function: String },

    #[error("[{function}] Too early: target block {target} not mined yet (current block {current})")]
    TooEarly {
        target: u64,
        current: u64,
        function: String,
    },

    #[error("[{function}] Hash of block {target} unavailable at block {current} (window {window})")]
    HashUnavailable {
        target: u64,
        current: u64,
        window: u64,
        function: String,
    },

    #[error("[{function}] Hash of block {target} does not honor the ticket")]
    WrongGuess { target: u64, function: String },

    #[error("[{function}] Insufficient balance: needed {needed} wei, available {available} wei")]
    InsufficientFunds {
        needed: u128,
        available: u128,
        function: String,
    },

    #[error("[{function}] Arithmetic overflow in '{operation}'")]
    Overflow { operation: String, function: String },

    #[error("Invalid lottery configuration: {message}")]
    InvalidConfig { message: String },
}

/// Helper function to create an invalid payment error
pub fn invalid_payment_error(expected: u128, actual: u128, function: &str) -> LottoError {
    LottoError::InvalidPayment {
        expected,
        actual,
        function: function.to_string(),
    }
}

/// Helper function to create an invalid offset error
pub fn invalid_offset_error(ahead: u64, min: u64, function: &str) -> LottoError {
    LottoError::InvalidOffset {
        ahead,
        min,
        function: function.to_string(),
    }
}

/// Helper function to create a missing ticket error
pub fn no_ticket_error(who: &[u8; 20], function: &str) -> LottoError {
    LottoError::NoTicket {
        who: hex::encode(who),
        function: function.to_string(),
    }
}

/// Helper function to create a premature resolution error
pub fn too_early_error(target: u64, current: u64, function: &str) -> LottoError {
    LottoError::TooEarly {
        target,
        current,
        function: function.to_string(),
    }
}

/// Helper function to create a stale ticket error
pub fn hash_unavailable_error(target: u64, current: u64, window: u64, function: &str) -> LottoError {
    LottoError::HashUnavailable {
        target,
        current,
        window,
        function: function.to_string(),
    }
}

/// Helper function to create a wrong guess error
pub fn wrong_guess_error(target: u64, function: &str) -> LottoError {
    LottoError::WrongGuess {
        target,
        function: function.to_string(),
    }
}

/// Helper function to create an insufficient funds error
pub fn insufficient_funds_error(needed: u128, available: u128, function: &str) -> LottoError {
    LottoError::InsufficientFunds {
        needed,
        available,
        function: function.to_string(),
    }
}

/// Helper function to create an overflow error
pub fn overflow_error(operation: &str, function: &str) -> LottoError {
    LottoError::Overflow {
        operation: operation.to_string(),
        function: function.to_string(),
    }
}

/// Helper function to create a configuration error
pub fn invalid_config_error(message: &str) -> LottoError {
    LottoError::InvalidConfig {
        message: message.to_string(),
    }
}

impl LottoError {
    /// Get the operation name where this error occurred
    pub fn function(&self) -> &str {
        match self {
            LottoError::InvalidPayment { function, .. } => function,
            LottoError::InvalidOffset { function, .. } => function,
            LottoError::NoTicket { function, .. } => function,
            LottoError::TooEarly { function, .. } => function,
            LottoError::HashUnavailable { function, .. } => function,
            LottoError::WrongGuess { function, .. } => function,
            LottoError::InsufficientFunds { function, .. } => function,
            LottoError::Overflow { function, .. } => function,
            LottoError::InvalidConfig { .. } => "config",
        }
    }

    /// Get error category as string
    pub fn category(&self) -> &'static str {
        match self {
            LottoError::InvalidPayment { .. } => "payment",
            LottoError::InvalidOffset { .. } => "parameter",
            LottoError::NoTicket { .. } => "ticket",
            LottoError::TooEarly { .. } => "ticket",
            LottoError::WrongGuess { .. } => "ticket",
            LottoError::HashUnavailable { .. } => "window",
            LottoError::InsufficientFunds { .. } => "pool",
            LottoError::Overflow { .. } => "arithmetic",
            LottoError::InvalidConfig { .. } => "config",
        }
    }

    /// Whether the error rejects a submitted call (as opposed to a
    /// misconfigured deployment)
    pub fn is_rejected_call(&self) -> bool {
        !matches!(self, LottoError::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_properties() {
        let payment = invalid_payment_error(100, 99, "mark_my_word");
        assert_eq!(payment.function(), "mark_my_word");
        assert_eq!(payment.category(), "payment");
        assert!(payment.is_rejected_call());

        let config = invalid_config_error("hash_window must be positive");
        assert_eq!(config.function(), "config");
        assert!(!config.is_rejected_call());
    }

    #[test]
    fn test_error_display() {
        let error = too_early_error(12, 10, "told_you_so");
        let display_str = format!("{}", error);
        assert!(display_str.contains("told_you_so"));
        assert!(display_str.contains("12"));
        assert!(display_str.contains("current block 10"));

        let error = no_ticket_error(&[0xab; 20], "told_you_so");
        assert!(error.to_string().contains(&"ab".repeat(20)));
    }
}
