// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Mock chain, atomic contract executor and in-process JSON-RPC node for
//! running HashLotto end to end.

pub mod contract_executor;
pub mod mock_context;
pub mod mock_rpc;
