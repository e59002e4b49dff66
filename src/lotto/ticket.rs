// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Tickets and the per-owner ticket store

use crate::lotto::traits::Address;
use std::collections::HashMap;
use std::fmt;

/// A 32-byte committed payload (`bytes32`)
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Word(pub [u8; 32]);

impl Word {
    /// The all-zero word
    pub const ZERO: Word = Word([0u8; 32]);

    /// Build a word from UTF-8 text, right-padded with zeros.
    /// Text longer than 32 bytes is truncated.
    pub fn from_utf8(text: &str) -> Self {
        Self::from_slice(text.as_bytes())
    }

    /// Build a word from raw bytes, right-padded with zeros
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut word = [0u8; 32];
        let len = bytes.len().min(32);
        word[..len].copy_from_slice(&bytes[..len]);
        Word(word)
    }

    /// Parse a hex literal such as `"0x0"` or `"0x68656c6c6f"`.
    /// Odd-length literals get a leading zero nibble; the decoded bytes are
    /// right-padded to 32 bytes. Returns None for invalid or oversized input.
    pub fn from_hex(literal: &str) -> Option<Self> {
        let digits = literal.strip_prefix("0x").unwrap_or(literal);
        let digits = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };

        let bytes = hex::decode(digits).ok()?;
        if bytes.len() > 32 {
            return None;
        }
        Some(Self::from_slice(&bytes))
    }

    /// Render as UTF-8 with trailing zero bytes stripped (lossy)
    pub fn to_utf8(&self) -> String {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Word(bytes)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A pending claim: the committed word and the block whose hash it must match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ticket {
    pub word: Word,
    pub block_number: u64,
}

impl Ticket {
    pub fn new(word: Word, block_number: u64) -> Self {
        Self { word, block_number }
    }

    /// The zero ticket stands for "no ticket held"
    pub fn is_empty(&self) -> bool {
        self.block_number == 0 && self.word.is_zero()
    }
}

/// Per-owner record of pending claims. At most one ticket per account.
#[derive(Clone, Debug, Default)]
pub struct TicketStore {
    tickets: HashMap<Address, Ticket>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the ticket held by `owner`, or the zero ticket
    pub fn get(&self, owner: &Address) -> Ticket {
        self.tickets.get(owner).copied().unwrap_or_default()
    }

    /// Store `ticket` for `owner`, returning the ticket it replaced
    pub fn put(&mut self, owner: Address, ticket: Ticket) -> Option<Ticket> {
        self.tickets.insert(owner, ticket)
    }

    /// Remove and return the ticket held by `owner`
    pub fn take(&mut self, owner: &Address) -> Option<Ticket> {
        self.tickets.remove(owner)
    }

    /// Number of outstanding tickets
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
