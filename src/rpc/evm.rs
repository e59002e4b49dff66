// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! `evm_*` control calls
//!
//! # Usage
//!
//! ```rust,no_run
//! use hashlotto_rust::rpc::{EvmControl, HttpTransport};
//!
//! let evm = EvmControl::new(HttpTransport::from_env()?);
//! let snapshot = evm.snapshot()?;
//! evm.mine_many(257)?;
//! evm.revert(snapshot)?;
//! # Ok::<(), hashlotto_rust::rpc::TransportError>(())
//! ```

use crate::rpc::error::{TransportError, TransportResult};
use crate::rpc::request::JsonRpcRequest;
use crate::rpc::transport::JsonRpcTransport;
use log::debug;
use serde_json::Value;

pub const EVM_SNAPSHOT: &str = "evm_snapshot";
pub const EVM_REVERT: &str = "evm_revert";
pub const EVM_INCREASE_TIME: &str = "evm_increaseTime";
pub const EVM_MINE: &str = "evm_mine";
pub const WEB3_CLIENT_VERSION: &str = "web3_clientVersion";

/// Client marker reported by TestRPC-compatible nodes
pub const TESTRPC_MARKER: &str = "EthereumJS TestRPC";

/// Stateless adapter over a node's test-control methods
#[derive(Clone, Debug)]
pub struct EvmControl<T> {
    transport: T,
}

impl<T: JsonRpcTransport> EvmControl<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Take a snapshot of the node state; resolves with the snapshot id
    pub fn snapshot(&self) -> TransportResult<Value> {
        self.call(EVM_SNAPSHOT, vec![])
    }

    /// Revert to the snapshot with the given id
    pub fn revert(&self, snapshot_id: Value) -> TransportResult<Value> {
        self.call(EVM_REVERT, vec![snapshot_id])
    }

    /// Advance the node clock by `offset` seconds
    pub fn increase_time(&self, offset: u64) -> TransportResult<Value> {
        self.call(EVM_INCREASE_TIME, vec![Value::from(offset)])
    }

    /// Mine one block
    pub fn mine(&self) -> TransportResult<Value> {
        self.call(EVM_MINE, vec![])
    }

    /// Mine `times` blocks one request at a time
    pub fn mine_many(&self, times: u64) -> TransportResult<()> {
        for _ in 0..times {
            self.mine()?;
        }
        Ok(())
    }

    /// The node's client version string
    pub fn client_version(&self) -> TransportResult<Value> {
        self.call(WEB3_CLIENT_VERSION, vec![])
    }

    /// Whether the node identifies itself as a TestRPC-compatible node
    pub fn is_test_rpc(&self) -> TransportResult<bool> {
        let version = self.client_version()?;
        Ok(version
            .as_str()
            .map_or(false, |v| v.contains(TESTRPC_MARKER)))
    }

    /// Issue a single request and return its raw `result` field
    pub fn call(&self, method: &str, params: Vec<Value>) -> TransportResult<Value> {
        let request = JsonRpcRequest::new(method, params);
        debug!("{} {:?} (id {})", method, request.params, request.id);

        let response = self.transport.send(&request)?;
        if let Some(error) = response.error {
            return Err(TransportError::Rpc {
                method: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
