// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod lotto;
pub mod rpc;
pub mod tests;

// Re-export main lottery types for convenience
pub use lotto::contract::{HashLotto, Resolution};
pub use lotto::traits::LogEvent;
pub use lotto::{LottoError, LottoResult};
pub use rpc::{EvmControl, TransportError};

/// Initialise `env_logger` for binaries and test harnesses that opt into the
/// `logging` feature. Safe to call more than once.
#[cfg(feature = "logging")]
pub fn init_logger(is_test: bool) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(is_test)
        .try_init();
}
