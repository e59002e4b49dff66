// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Node endpoint configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const RPC_URL_ENV: &str = "HASHLOTTO_RPC_URL";
pub const RPC_TIMEOUT_ENV: &str = "HASHLOTTO_RPC_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RpcConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Read `HASHLOTTO_RPC_URL` and `HASHLOTTO_RPC_TIMEOUT_MS`, falling back
    /// to the local development node. Unparseable timeouts fall back too.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            url: lookup(RPC_URL_ENV).unwrap_or(defaults.url),
            timeout_ms: lookup(RPC_TIMEOUT_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_overrides_and_fallbacks() {
        let config = RpcConfig::from_lookup(|key| match key {
            RPC_URL_ENV => Some("http://node:7545".to_string()),
            RPC_TIMEOUT_ENV => Some("nope".to_string()),
            _ => None,
        });
        assert_eq!(config.url, "http://node:7545");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);

        let config = RpcConfig::from_lookup(|_| None);
        assert_eq!(config, RpcConfig::default());
    }
}
