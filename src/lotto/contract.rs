// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! HashLotto State Machine
//!
//! A player commits a 32-byte word together with a block offset and pays the
//! unit amount (`mark_my_word`). Once the target block has been mined, the
//! player may claim (`told_you_so`): if the hash of the target block satisfies
//! the configured [`WinPredicate`](crate::lotto::config::WinPredicate) (by
//! default, its lowest byte is zero), the ticket is destroyed, a
//! `LogToldYouSo` event is emitted and the payout is transferred to the
//! player.
//!
//! # Resolution Rules
//!
//! - The target block must already be mined: `target < current`, where
//!   `current` is the block the claim executes in. A target equal to the
//!   latest mined block is therefore claimable.
//! - The target hash comes from the windowed host lookup. Outside the window
//!   the [`StaleTicketPolicy`] decides: under `ZeroHash` the unavailable hash
//!   reads as the zero word and honors only a ticket committed to that word;
//!   every other stale claim is rejected.
//! - A losing hash is governed by the [`MissPolicy`]. The default `Forfeit`
//!   consumes the ticket and keeps the deposit, with no event and no payout.
//!   Callers relying on a refund for a losing guess should deploy with
//!   `MissPolicy::Revert`.
//!
//! All checks run before any mutation; a host that executes calls atomically
//! additionally discards the credited call value of a rejected call.

use crate::lotto::config::{LottoConfig, MissPolicy, StaleTicketPolicy};
use crate::lotto::error::*;
use crate::lotto::event::ToldYouSoEvent;
use crate::lotto::host_functions::{
    emit_log2, get_block_hash, get_block_number, get_call_value, get_caller, get_self_balance,
};
use crate::lotto::ticket::{Ticket, TicketStore, Word};
use crate::lotto::traits::{Address, LottoHost};
use crate::lotto::utils::format_address;
use log::{debug, info, warn};

/// Outcome of a successful `told_you_so` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The word matched; `payout` wei went to the caller
    Honored { payout: u128 },
    /// The word did not match; the ticket was consumed without payout
    Forfeited { target: u64 },
}

/// The lottery contract state
#[derive(Clone, Debug)]
pub struct HashLotto {
    config: LottoConfig,
    tickets: TicketStore,
    pool: u128,
}

impl HashLotto {
    /// Construct the contract. The value sent with the deployment becomes
    /// the initial prize pool.
    pub fn deploy<H: LottoHost>(config: LottoConfig, host: &H) -> LottoResult<Self> {
        config.validate()?;
        let pool = get_call_value(host)?;

        info!(
            "HashLotto deployed at {} with pool {} wei (unit {} wei, window {})",
            format_address(host.get_address()),
            pool,
            config.unit_amount,
            config.hash_window
        );

        Ok(Self {
            config,
            tickets: TicketStore::new(),
            pool,
        })
    }

    /// Commit `word` against the block `ahead` blocks after the current one.
    /// Overwrites any ticket the caller already holds.
    pub fn mark_my_word<H: LottoHost>(
        &mut self,
        host: &H,
        word: Word,
        ahead: u64,
    ) -> LottoResult<Ticket> {
        const FUNCTION: &str = "mark_my_word";

        let value = get_call_value(host)?;
        if value != self.config.unit_amount {
            warn!(
                "{} rejected: paid {} wei, expected {} wei",
                FUNCTION, value, self.config.unit_amount
            );
            return Err(invalid_payment_error(self.config.unit_amount, value, FUNCTION));
        }

        if ahead < self.config.min_ahead {
            warn!("{} rejected: ahead {} below {}", FUNCTION, ahead, self.config.min_ahead);
            return Err(invalid_offset_error(ahead, self.config.min_ahead, FUNCTION));
        }

        let current = get_block_number(host);
        let target = current
            .checked_add(ahead)
            .ok_or_else(|| overflow_error("current + ahead", FUNCTION))?;

        let caller = get_caller(host);
        let ticket = Ticket::new(word, target);
        if let Some(previous) = self.tickets.put(caller, ticket) {
            debug!(
                "{} overwrote ticket for block {} held by {}",
                FUNCTION,
                previous.block_number,
                format_address(&caller)
            );
        }

        info!(
            "{} marked {} for block {}",
            format_address(&caller),
            word,
            target
        );

        Ok(ticket)
    }

    /// Claim the caller's ticket, bragging with `bragging_rights` on success
    pub fn told_you_so<H: LottoHost>(
        &mut self,
        host: &H,
        bragging_rights: Word,
    ) -> LottoResult<Resolution> {
        const FUNCTION: &str = "told_you_so";

        let caller = get_caller(host);
        let ticket = self.tickets.get(&caller);
        if ticket.is_empty() {
            warn!("{} rejected: {} holds no ticket", FUNCTION, format_address(&caller));
            return Err(no_ticket_error(&caller, FUNCTION));
        }

        let current = get_block_number(host);
        let target = ticket.block_number;
        if target >= current {
            warn!("{} rejected: block {} not mined at {}", FUNCTION, target, current);
            return Err(too_early_error(target, current, FUNCTION));
        }

        let honored = match get_block_hash(host, target, self.config.hash_window) {
            Some(hash) => self.config.win_predicate.holds(&Word(hash), &ticket.word),
            None => match self.config.stale_ticket_policy {
                StaleTicketPolicy::ZeroHash if ticket.word.is_zero() => true,
                _ => {
                    warn!("{} rejected: hash of block {} unavailable", FUNCTION, target);
                    return Err(hash_unavailable_error(
                        target,
                        current,
                        self.config.hash_window,
                        FUNCTION,
                    ));
                }
            },
        };

        if !honored {
            return match self.config.miss_policy {
                MissPolicy::Forfeit => {
                    self.tickets.take(&caller);
                    info!(
                        "{} forfeited ticket for block {}",
                        format_address(&caller),
                        target
                    );
                    Ok(Resolution::Forfeited { target })
                }
                MissPolicy::Revert => {
                    warn!("{} rejected: losing hash for block {}", FUNCTION, target);
                    Err(wrong_guess_error(target, FUNCTION))
                }
            };
        }

        let payout = self.config.payout_amount;
        let available = get_self_balance(host);
        if available < payout {
            warn!("{} rejected: pool holds {} wei, owes {}", FUNCTION, available, payout);
            return Err(insufficient_funds_error(payout, available, FUNCTION));
        }

        self.tickets.take(&caller);

        let event = ToldYouSoEvent {
            who: caller,
            bragging_rights,
        };
        let (data, [signature, who]) = event.encode();
        emit_log2(host, &data, signature, who)?;

        host.transfer(&caller, payout)?;

        info!(
            "{} told you so on block {}: paid {} wei",
            format_address(&caller),
            target,
            payout
        );

        Ok(Resolution::Honored { payout })
    }

    /// Read-only view of the ticket held by `who` (zero ticket if none)
    pub fn tickets(&self, who: &Address) -> Ticket {
        self.tickets.get(who)
    }

    /// Number of outstanding tickets
    pub fn outstanding(&self) -> usize {
        self.tickets.len()
    }

    /// The pool funded at deployment, in wei
    pub fn pool(&self) -> u128 {
        self.pool
    }

    pub fn config(&self) -> &LottoConfig {
        &self.config
    }
}
