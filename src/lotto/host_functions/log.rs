// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Logging and event host functions

use crate::lotto::error::{LottoError, LottoResult};
use crate::lotto::traits::{LogEvent, LottoHost};

/// Maximum number of topics per log entry (LOG4)
pub const MAX_TOPICS: usize = 4;

/// Emit a log event (LOG0 to LOG4)
/// Creates a log entry attributed to the executing contract
pub fn emit_log_event<T: LottoHost>(host: &T, data: &[u8], topics: &[[u8; 32]]) -> LottoResult<()> {
    if topics.len() > MAX_TOPICS {
        return Err(LottoError::Overflow {
            operation: format!("{} topics", topics.len()),
            function: "emit_log_event".to_string(),
        });
    }

    let log_event = LogEvent {
        contract_address: *host.get_address(),
        data: data.to_vec(),
        topics: topics.to_vec(),
    };

    host.emit_log_event(log_event);

    Ok(())
}

/// Emit a log event with two topics (LOG2)
pub fn emit_log2<T: LottoHost>(
    host: &T,
    data: &[u8],
    topic1: [u8; 32],
    topic2: [u8; 32],
) -> LottoResult<()> {
    emit_log_event(host, data, &[topic1, topic2])
}
