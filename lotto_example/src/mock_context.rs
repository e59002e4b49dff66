// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Mock Chain and Execution Context Implementation
//!
//! This module provides an automining development chain for testing the
//! lottery: every committed transaction mines one block, `mine` adds an empty
//! block, and balances are plain wei amounts. A [`TxContext`] is the host the
//! contract sees while a single call executes; it owns a working copy of the
//! chain that the executor commits or drops as a whole.

use hashlotto_rust::lotto::error::{insufficient_funds_error, LottoResult};
use hashlotto_rust::lotto::traits::{u128_to_bytes32, Address, LogEvent, LottoHost};
use hashlotto_rust::lotto::utils::WEI_PER_ETHER;
use sha3::{Digest, Keccak256};
use std::cell::RefCell;
use std::collections::HashMap;

/// Block information recorded for every mined block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    pub number: u64,
    pub timestamp: u64,
    pub parent_hash: [u8; 32],
    pub hash: [u8; 32],
}

impl BlockInfo {
    /// Mock block hash: keccak256(parent_hash ++ number)
    fn derive_hash(parent_hash: &[u8; 32], number: u64) -> [u8; 32] {
        let digest = Keccak256::new()
            .chain_update(parent_hash)
            .chain_update(number.to_be_bytes())
            .finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash
    }

    fn genesis(timestamp: u64) -> Self {
        let parent_hash = [0u8; 32];
        Self {
            number: 0,
            timestamp,
            parent_hash,
            hash: Self::derive_hash(&parent_hash, 0),
        }
    }
}

/// Deterministic test account `index` (last two bytes carry the index)
pub fn test_account(index: u16) -> Address {
    let mut addr = [0u8; 20];
    addr[0] = 0xac;
    addr[18..].copy_from_slice(&index.to_be_bytes());
    addr
}

/// Automining development chain
#[derive(Clone, Debug)]
pub struct MockChain {
    blocks: Vec<BlockInfo>,
    pinned_hashes: HashMap<u64, [u8; 32]>,
    balances: HashMap<Address, u128>,
    accounts: Vec<Address>,
    genesis_timestamp: u64,
    block_time: u64,
    time_offset: u64,
}

/// Builder for MockChain with fluent interface
pub struct MockChainBuilder {
    account_count: u16,
    account_balance: u128,
    genesis_timestamp: u64,
    block_time: u64,
    pinned_hashes: HashMap<u64, [u8; 32]>,
}

impl MockChainBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            account_count: 10,
            account_balance: 100 * WEI_PER_ETHER,
            genesis_timestamp: 1_640_995_200, // 2022-01-01 00:00:00 UTC
            block_time: 1,
            pinned_hashes: HashMap::new(),
        }
    }

    /// Set the number of prefunded accounts
    pub fn with_accounts(mut self, count: u16) -> Self {
        self.account_count = count;
        self
    }

    /// Set the balance of each prefunded account, in wei
    pub fn with_account_balance(mut self, wei: u128) -> Self {
        self.account_balance = wei;
        self
    }

    /// Set the genesis block timestamp
    pub fn with_genesis_timestamp(mut self, timestamp: u64) -> Self {
        self.genesis_timestamp = timestamp;
        self
    }

    /// Set the number of seconds between consecutive blocks
    pub fn with_block_time(mut self, seconds: u64) -> Self {
        self.block_time = seconds;
        self
    }

    /// Report `hash` for block `number` instead of the derived hash
    pub fn with_block_hash(mut self, number: u64, hash: [u8; 32]) -> Self {
        self.pinned_hashes.insert(number, hash);
        self
    }

    /// Build the MockChain
    pub fn build(self) -> MockChain {
        let accounts: Vec<Address> = (0..self.account_count).map(test_account).collect();
        let balances = accounts
            .iter()
            .map(|addr| (*addr, self.account_balance))
            .collect();

        MockChain {
            blocks: vec![BlockInfo::genesis(self.genesis_timestamp)],
            pinned_hashes: self.pinned_hashes,
            balances,
            accounts,
            genesis_timestamp: self.genesis_timestamp,
            block_time: self.block_time,
            time_offset: 0,
        }
    }
}

impl Default for MockChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for MockChain {
    fn default() -> Self {
        MockChainBuilder::new().build()
    }
}

impl MockChain {
    /// Create a new MockChain builder
    pub fn builder() -> MockChainBuilder {
        MockChainBuilder::new()
    }

    /// Number of the latest mined block
    pub fn height(&self) -> u64 {
        self.latest().number
    }

    pub fn latest(&self) -> &BlockInfo {
        // Genesis is created at build time and blocks are never removed
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block(&self, number: u64) -> Option<&BlockInfo> {
        self.blocks.get(number as usize)
    }

    /// Hash of a mined block, honoring pinned hashes
    pub fn block_hash(&self, number: u64) -> Option<[u8; 32]> {
        if number > self.height() {
            return None;
        }
        self.pinned_hashes
            .get(&number)
            .copied()
            .or_else(|| self.block(number).map(|b| b.hash))
    }

    /// Report `hash` for block `number` from now on
    pub fn pin_block_hash(&mut self, number: u64, hash: [u8; 32]) {
        self.pinned_hashes.insert(number, hash);
    }

    /// Timestamp the next block will carry
    pub fn next_timestamp(&self) -> u64 {
        self.genesis_timestamp + (self.height() + 1) * self.block_time + self.time_offset
    }

    /// Mine one block and return it
    pub fn mine(&mut self) -> &BlockInfo {
        let timestamp = self.next_timestamp();
        let parent = self.latest();
        let number = parent.number + 1;
        let parent_hash = parent.hash;

        self.blocks.push(BlockInfo {
            number,
            timestamp,
            parent_hash,
            hash: BlockInfo::derive_hash(&parent_hash, number),
        });
        self.latest()
    }

    /// Advance the clock by `seconds`; returns the total offset
    pub fn increase_time(&mut self, seconds: u64) -> u64 {
        self.time_offset = self.time_offset.saturating_add(seconds);
        self.time_offset
    }

    pub fn time_offset(&self) -> u64 {
        self.time_offset
    }

    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    pub fn balance(&self, address: &Address) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Move `amount` wei between two accounts
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> LottoResult<()> {
        let available = self.balance(from);
        if available < amount {
            return Err(insufficient_funds_error(amount, available, "transfer"));
        }
        *self.balances.entry(*from).or_default() -= amount;
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}

/// Host seen by the contract during one call
pub struct TxContext {
    chain: RefCell<MockChain>,
    address: Address,
    caller: Address,
    call_value: [u8; 32],
    block_number: u64,
    block_timestamp: u64,
    logs: RefCell<Vec<LogEvent>>,
}

impl TxContext {
    /// Open a call against a working copy of `chain`. The call executes in
    /// the block after the chain's latest one.
    pub fn new(chain: MockChain, address: Address, caller: Address, call_value: u128) -> Self {
        let block_number = chain.height() + 1;
        let block_timestamp = chain.next_timestamp();
        Self {
            chain: RefCell::new(chain),
            address,
            caller,
            call_value: u128_to_bytes32(call_value),
            block_number,
            block_timestamp,
            logs: RefCell::new(Vec::new()),
        }
    }

    /// Close the call, handing back the working chain and the emitted logs
    pub fn into_parts(self) -> (MockChain, Vec<LogEvent>) {
        (self.chain.into_inner(), self.logs.into_inner())
    }
}

impl LottoHost for TxContext {
    fn get_address(&self) -> &Address {
        &self.address
    }

    fn get_caller(&self) -> &Address {
        &self.caller
    }

    fn get_call_value(&self) -> &[u8; 32] {
        &self.call_value
    }

    fn get_block_number(&self) -> u64 {
        self.block_number
    }

    fn get_block_timestamp(&self) -> u64 {
        self.block_timestamp
    }

    fn get_block_hash(&self, block_number: u64) -> Option<[u8; 32]> {
        self.chain.borrow().block_hash(block_number)
    }

    fn get_balance(&self, address: &Address) -> u128 {
        self.chain.borrow().balance(address)
    }

    fn transfer(&self, to: &Address, amount: u128) -> LottoResult<()> {
        self.chain.borrow_mut().transfer(&self.address, to, amount)
    }

    fn emit_log_event(&self, event: LogEvent) {
        self.logs.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mining_links_hashes() {
        let mut chain = MockChain::default();
        assert_eq!(chain.height(), 0);

        let genesis_hash = chain.latest().hash;
        let first = chain.mine().clone();
        assert_eq!(first.number, 1);
        assert_eq!(first.parent_hash, genesis_hash);
        assert_ne!(first.hash, genesis_hash);
        assert_eq!(chain.block_hash(1), Some(first.hash));
        assert_eq!(chain.block_hash(2), None);
    }

    #[test]
    fn test_pinned_hash_wins() {
        let mut chain = MockChain::builder().with_block_hash(1, [0u8; 32]).build();
        assert_eq!(chain.block_hash(1), None);
        chain.mine();
        assert_eq!(chain.block_hash(1), Some([0u8; 32]));
    }

    #[test]
    fn test_increase_time_shifts_timestamps() {
        let mut chain = MockChain::builder()
            .with_genesis_timestamp(1_000)
            .with_block_time(15)
            .build();
        assert_eq!(chain.next_timestamp(), 1_015);
        assert_eq!(chain.increase_time(60), 60);
        assert_eq!(chain.increase_time(40), 100);
        assert_eq!(chain.mine().timestamp, 1_115);
    }

    #[test]
    fn test_tx_context_reads_working_chain() {
        let mut chain = MockChain::default();
        chain.mine();
        let from = chain.accounts()[0];
        let ctx = TxContext::new(chain, [0x42; 20], from, 5);

        assert_eq!(ctx.get_block_number(), 2);
        assert!(ctx.get_block_hash(1).is_some());
        assert!(ctx.transfer(&from, 1).is_err());

        let (chain, logs) = ctx.into_parts();
        assert_eq!(chain.height(), 1);
        assert!(logs.is_empty());
    }
}
