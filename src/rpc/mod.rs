// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Node Test-Control Shim
//!
//! A thin JSON-RPC client for the `evm_*` control methods exposed by
//! development nodes (snapshot, revert, time travel, block mining).
//! Each call is a single request/response round trip: no retry, no caching.

pub mod config;
pub mod error;
pub mod evm;
pub mod request;
pub mod transport;

pub use config::RpcConfig;
pub use error::{TransportError, TransportResult};
pub use evm::EvmControl;
pub use request::{JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse};
pub use transport::{HttpTransport, JsonRpcTransport};
