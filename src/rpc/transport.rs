// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Transports carrying JSON-RPC envelopes to a node

use crate::rpc::config::RpcConfig;
use crate::rpc::error::TransportResult;
use crate::rpc::request::{JsonRpcRequest, JsonRpcResponse};
use log::trace;
use std::sync::Arc;

/// A request/response channel to a node's JSON-RPC endpoint
pub trait JsonRpcTransport {
    /// Send one request and wait for its response
    fn send(&self, request: &JsonRpcRequest) -> TransportResult<JsonRpcResponse>;
}

impl<T: JsonRpcTransport + ?Sized> JsonRpcTransport for &T {
    fn send(&self, request: &JsonRpcRequest) -> TransportResult<JsonRpcResponse> {
        (**self).send(request)
    }
}

impl<T: JsonRpcTransport + ?Sized> JsonRpcTransport for Arc<T> {
    fn send(&self, request: &JsonRpcRequest) -> TransportResult<JsonRpcResponse> {
        (**self).send(request)
    }
}

/// Blocking HTTP transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> TransportResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Transport for the node named by `HASHLOTTO_RPC_URL`
    pub fn from_env() -> TransportResult<Self> {
        Self::new(&RpcConfig::from_env())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl JsonRpcTransport for HttpTransport {
    fn send(&self, request: &JsonRpcRequest) -> TransportResult<JsonRpcResponse> {
        trace!("-> {} {}", self.url, request.method);
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()?
            .error_for_status()?
            .json::<JsonRpcResponse>()?;
        trace!("<- {} {:?}", request.method, response.result);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::error::TransportError;

    #[test]
    fn test_unreachable_node_is_http_error() {
        let config = RpcConfig {
            url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 2_000,
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url(), "http://127.0.0.1:1");

        let err = transport
            .send(&JsonRpcRequest::new("evm_mine", vec![]))
            .unwrap_err();
        assert!(matches!(err, TransportError::Http(_)));
    }
}
