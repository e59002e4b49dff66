// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! HashLotto Commit-Reveal Ticket Engine
//!
//! This module provides the ticket/reveal state machine together with the
//! host interface it runs against. The contract never talks to a chain
//! directly: block numbers, historical block hashes, balances and event logs
//! all come from a [`traits::LottoHost`] implementation supplied by the caller.

pub mod config;
pub mod contract;
pub mod error;
pub mod event;
pub mod host_functions;
pub mod ticket;
pub mod traits;
pub mod utils;

// Re-export main types for convenience
pub use config::{LottoConfig, MissPolicy, StaleTicketPolicy, WinPredicate};
pub use error::{LottoError, LottoResult};
pub use event::ToldYouSoEvent;
pub use ticket::{Ticket, TicketStore, Word};
pub use traits::*;
