// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! In-process JSON-RPC node
//!
//! Serves the development-node control methods straight from a
//! [`ContractExecutor`], so the test-control shim can run without a network.
//! The executor sits behind a mutex: each request, and each closure passed to
//! [`MockRpcNode::with_executor`], holds the lock for its whole
//! read-modify-write.
//!
//! Supported methods: `evm_snapshot`, `evm_revert`, `evm_increaseTime`,
//! `evm_mine`, `eth_blockNumber`, `eth_getBalance`, `web3_clientVersion`.

use crate::contract_executor::ContractExecutor;
use crate::mock_context::MockChain;
use hashlotto_rust::rpc::evm::{
    EVM_INCREASE_TIME, EVM_MINE, EVM_REVERT, EVM_SNAPSHOT, WEB3_CLIENT_VERSION,
};
use hashlotto_rust::rpc::{
    JsonRpcRequest, JsonRpcResponse, JsonRpcTransport, TransportError, TransportResult,
};
use log::debug;
use serde_json::Value;
use std::sync::Mutex;

pub const CLIENT_VERSION: &str = "EthereumJS TestRPC/v2.0.0-mock/hashlotto";

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// A development node answering JSON-RPC requests in process
pub struct MockRpcNode {
    executor: Mutex<ContractExecutor>,
}

impl MockRpcNode {
    pub fn new(chain: MockChain) -> Self {
        Self {
            executor: Mutex::new(ContractExecutor::new(chain)),
        }
    }

    /// Run `f` against the node state under the node lock
    pub fn with_executor<R, F>(&self, f: F) -> TransportResult<R>
    where
        F: FnOnce(&mut ContractExecutor) -> R,
    {
        let mut executor = self
            .executor
            .lock()
            .map_err(|_| TransportError::Node("node state lock poisoned".to_string()))?;
        Ok(f(&mut executor))
    }

    fn dispatch(
        executor: &mut ContractExecutor,
        request: &JsonRpcRequest,
    ) -> Result<Value, (i64, String)> {
        match request.method.as_str() {
            EVM_SNAPSHOT => Ok(Value::from(quantity(executor.snapshot() as u128))),
            EVM_REVERT => {
                let id = request
                    .params
                    .first()
                    .and_then(parse_quantity)
                    .ok_or_else(|| invalid_params(request))?;
                Ok(Value::from(executor.revert(id as u64)))
            }
            EVM_INCREASE_TIME => {
                let seconds = request
                    .params
                    .first()
                    .and_then(parse_quantity)
                    .ok_or_else(|| invalid_params(request))?;
                Ok(Value::from(executor.increase_time(seconds as u64)))
            }
            EVM_MINE => {
                executor.mine();
                Ok(Value::from("0x0"))
            }
            "eth_blockNumber" => Ok(Value::from(quantity(executor.block_number() as u128))),
            "eth_getBalance" => {
                let address = request
                    .params
                    .first()
                    .and_then(Value::as_str)
                    .and_then(parse_address)
                    .ok_or_else(|| invalid_params(request))?;
                Ok(Value::from(quantity(executor.balance(&address))))
            }
            WEB3_CLIENT_VERSION => Ok(Value::from(CLIENT_VERSION)),
            other => Err((
                METHOD_NOT_FOUND,
                format!("Method {} not supported", other),
            )),
        }
    }
}

impl JsonRpcTransport for MockRpcNode {
    fn send(&self, request: &JsonRpcRequest) -> TransportResult<JsonRpcResponse> {
        let outcome = self.with_executor(|executor| Self::dispatch(executor, request))?;
        debug!("{} -> {:?}", request.method, outcome);

        Ok(match outcome {
            Ok(result) => JsonRpcResponse::result(request.id, result),
            Err((code, message)) => JsonRpcResponse::error(request.id, code, &message),
        })
    }
}

fn invalid_params(request: &JsonRpcRequest) -> (i64, String) {
    (
        INVALID_PARAMS,
        format!("Invalid params for {}: {:?}", request.method, request.params),
    )
}

/// Hex quantity encoding ("0x0", "0x1f")
fn quantity(value: u128) -> String {
    format!("0x{:x}", value)
}

/// Accept both hex strings and plain JSON numbers
fn parse_quantity(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(digits) => u128::from_str_radix(digits, 16).ok(),
            None => s.parse().ok(),
        },
        _ => None,
    }
}

fn parse_address(text: &str) -> Option<[u8; 20]> {
    let bytes = hex::decode(text.strip_prefix("0x").unwrap_or(text)).ok()?;
    bytes.try_into().ok()
}
