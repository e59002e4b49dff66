// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Result type for control calls
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors propagated verbatim from the transport or the node
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request to node failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON-RPC payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node returned error {code} for '{method}': {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Node unavailable: {0}")]
    Node(String),
}

impl TransportError {
    /// Get error category as string
    pub fn category(&self) -> &'static str {
        match self {
            TransportError::Http(_) => "http",
            TransportError::Json(_) => "json",
            TransportError::Rpc { .. } => "rpc",
            TransportError::Node(_) => "node",
        }
    }
}
