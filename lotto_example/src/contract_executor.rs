// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Contract Executor Module
//!
//! Deploys and calls HashLotto contracts on a [`MockChain`]. Every mutating
//! call is a transaction: it runs against copies of the chain and the
//! contract states and is committed, together with one freshly mined block,
//! only when it succeeds. A rejected call leaves no trace, including the
//! value it carried.

use crate::mock_context::{MockChain, TxContext};
use hashlotto_rust::lotto::config::LottoConfig;
use hashlotto_rust::lotto::contract::{HashLotto, Resolution};
use hashlotto_rust::lotto::error::LottoError;
use hashlotto_rust::lotto::ticket::{Ticket, Word};
use hashlotto_rust::lotto::traits::{Address, LogEvent};
use hashlotto_rust::lotto::utils::format_address;
use log::{debug, warn};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use thiserror::Error;

/// Why a transaction did not commit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Transaction reverted: {0}")]
    Reverted(#[from] LottoError),

    #[error("No contract deployed at {0}")]
    UnknownContract(String),
}

impl ExecutionError {
    /// The contract error behind a revert, if any
    pub fn lotto_error(&self) -> Option<&LottoError> {
        match self {
            ExecutionError::Reverted(err) => Some(err),
            ExecutionError::UnknownContract(_) => None,
        }
    }
}

/// Receipt of a committed transaction
#[derive(Clone, Debug, PartialEq)]
pub struct TxReceipt<T> {
    /// Block the transaction was mined in
    pub block_number: u64,
    /// Events emitted during execution
    pub logs: Vec<LogEvent>,
    /// Value returned by the contract call
    pub output: T,
}

/// World state captured by a snapshot
#[derive(Clone)]
struct WorldState {
    chain: MockChain,
    contracts: HashMap<Address, HashLotto>,
    nonce: u64,
}

/// Contract executor
pub struct ContractExecutor {
    world: WorldState,
    snapshots: Vec<(u64, WorldState)>,
    next_snapshot_id: u64,
}

impl ContractExecutor {
    /// Create a new contract executor on top of `chain`
    pub fn new(chain: MockChain) -> Self {
        Self {
            world: WorldState {
                chain,
                contracts: HashMap::new(),
                nonce: 0,
            },
            snapshots: Vec::new(),
            next_snapshot_id: 1,
        }
    }

    pub fn chain(&self) -> &MockChain {
        &self.world.chain
    }

    pub fn chain_mut(&mut self) -> &mut MockChain {
        &mut self.world.chain
    }

    pub fn accounts(&self) -> Vec<Address> {
        self.world.chain.accounts().to_vec()
    }

    pub fn balance(&self, address: &Address) -> u128 {
        self.world.chain.balance(address)
    }

    pub fn block_number(&self) -> u64 {
        self.world.chain.height()
    }

    /// Deploy a HashLotto funded with `value` wei
    pub fn deploy(
        &mut self,
        from: Address,
        value: u128,
        config: LottoConfig,
    ) -> Result<TxReceipt<Address>, ExecutionError> {
        let address = self.contract_address(&from);
        let receipt = self.execute(address, from, value, |contracts, ctx| {
            let lotto = HashLotto::deploy(config, ctx)?;
            contracts.insert(address, lotto);
            Ok(address)
        })?;
        self.world.nonce += 1;
        Ok(receipt)
    }

    /// Call `markMyWord(word, ahead)` with `value` wei
    pub fn mark_my_word(
        &mut self,
        contract: Address,
        from: Address,
        value: u128,
        word: Word,
        ahead: u64,
    ) -> Result<TxReceipt<Ticket>, ExecutionError> {
        self.ensure_deployed(&contract)?;
        self.execute(contract, from, value, |contracts, ctx| {
            lotto_mut(contracts, &contract)?.mark_my_word(ctx, word, ahead)
        })
    }

    /// Call `toldYouSo(braggingRights)`
    pub fn told_you_so(
        &mut self,
        contract: Address,
        from: Address,
        bragging_rights: Word,
    ) -> Result<TxReceipt<Resolution>, ExecutionError> {
        self.ensure_deployed(&contract)?;
        self.execute(contract, from, 0, |contracts, ctx| {
            lotto_mut(contracts, &contract)?.told_you_so(ctx, bragging_rights)
        })
    }

    /// Read-only `tickets(who)` view; mines nothing
    pub fn tickets(&self, contract: &Address, who: &Address) -> Result<Ticket, ExecutionError> {
        self.world
            .contracts
            .get(contract)
            .map(|lotto| lotto.tickets(who))
            .ok_or_else(|| ExecutionError::UnknownContract(format_address(contract)))
    }

    /// Deployed contract state, for inspection
    pub fn contract(&self, contract: &Address) -> Option<&HashLotto> {
        self.world.contracts.get(contract)
    }

    /// Mine an empty block; returns its number
    pub fn mine(&mut self) -> u64 {
        self.world.chain.mine().number
    }

    /// Advance the clock by `seconds`; returns the total offset
    pub fn increase_time(&mut self, seconds: u64) -> u64 {
        self.world.chain.increase_time(seconds)
    }

    /// Capture the whole world state; returns the snapshot id
    pub fn snapshot(&mut self) -> u64 {
        let id = self.next_snapshot_id;
        self.next_snapshot_id += 1;
        self.snapshots.push((id, self.world.clone()));
        debug!("snapshot {} at block {}", id, self.block_number());
        id
    }

    /// Restore snapshot `id`, dropping it and every later snapshot.
    /// Returns false when no such snapshot exists.
    pub fn revert(&mut self, id: u64) -> bool {
        let Some(position) = self.snapshots.iter().position(|(sid, _)| *sid == id) else {
            return false;
        };

        let mut dropped = self.snapshots.split_off(position);
        let (_, world) = dropped.swap_remove(0);
        self.world = world;
        debug!("reverted to snapshot {} at block {}", id, self.block_number());
        true
    }

    fn ensure_deployed(&self, contract: &Address) -> Result<(), ExecutionError> {
        if self.world.contracts.contains_key(contract) {
            Ok(())
        } else {
            Err(ExecutionError::UnknownContract(format_address(contract)))
        }
    }

    /// CREATE-style address: keccak256(sender ++ nonce)[12..]
    fn contract_address(&self, sender: &Address) -> Address {
        let digest = Keccak256::new()
            .chain_update(sender)
            .chain_update(self.world.nonce.to_be_bytes())
            .finalize();
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&digest[12..]);
        addr
    }

    /// Run one transaction atomically
    fn execute<T, F>(
        &mut self,
        to: Address,
        from: Address,
        value: u128,
        call: F,
    ) -> Result<TxReceipt<T>, ExecutionError>
    where
        F: FnOnce(&mut HashMap<Address, HashLotto>, &TxContext) -> Result<T, LottoError>,
    {
        let mut chain = self.world.chain.clone();
        chain.transfer(&from, &to, value)?;

        let mut contracts = self.world.contracts.clone();
        let ctx = TxContext::new(chain, to, from, value);

        let output = match call(&mut contracts, &ctx) {
            Ok(output) => output,
            Err(err) => {
                warn!("call from {} reverted: {}", format_address(&from), err);
                return Err(err.into());
            }
        };

        let (mut chain, logs) = ctx.into_parts();
        let block_number = chain.mine().number;

        self.world.chain = chain;
        self.world.contracts = contracts;

        Ok(TxReceipt {
            block_number,
            logs,
            output,
        })
    }
}

fn lotto_mut<'a>(
    contracts: &'a mut HashMap<Address, HashLotto>,
    contract: &Address,
) -> Result<&'a mut HashLotto, LottoError> {
    contracts.get_mut(contract).ok_or_else(|| LottoError::InvalidConfig {
        message: format!("no contract at {}", format_address(contract)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlotto_rust::lotto::utils::to_wei;

    fn unit() -> u128 {
        to_wei("0.1").unwrap()
    }

    #[test]
    fn test_deploy_mines_block_and_funds_pool() {
        let mut executor = ContractExecutor::new(MockChain::default());
        let owner = executor.accounts()[0];

        let receipt = executor
            .deploy(owner, unit(), LottoConfig::default())
            .expect("deploy should succeed");

        assert_eq!(receipt.block_number, 1);
        assert_eq!(executor.block_number(), 1);
        assert_eq!(executor.balance(&receipt.output), unit());
        assert!(executor.contract(&receipt.output).is_some());
    }

    #[test]
    fn test_failed_call_leaves_no_trace() {
        let mut executor = ContractExecutor::new(MockChain::default());
        let owner = executor.accounts()[0];
        let lotto = executor
            .deploy(owner, unit(), LottoConfig::default())
            .unwrap()
            .output;
        let owner_balance = executor.balance(&owner);

        let err = executor
            .mark_my_word(lotto, owner, unit() - 1, Word::from_utf8("x"), 1)
            .unwrap_err();
        assert!(matches!(
            err.lotto_error(),
            Some(LottoError::InvalidPayment { .. })
        ));

        assert_eq!(executor.block_number(), 1);
        assert_eq!(executor.balance(&owner), owner_balance);
        assert_eq!(executor.balance(&lotto), unit());
    }

    #[test]
    fn test_unknown_contract() {
        let mut executor = ContractExecutor::new(MockChain::default());
        let owner = executor.accounts()[0];
        let err = executor
            .told_you_so([0xee; 20], owner, Word::ZERO)
            .unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownContract(_)));
        assert!(executor.tickets(&[0xee; 20], &owner).is_err());
    }

    #[test]
    fn test_distinct_contract_addresses() {
        let mut executor = ContractExecutor::new(MockChain::default());
        let owner = executor.accounts()[0];
        let first = executor.deploy(owner, 0, LottoConfig::default()).unwrap();
        let second = executor.deploy(owner, 0, LottoConfig::default()).unwrap();
        assert_ne!(first.output, second.output);
    }

    #[test]
    fn test_snapshot_revert_drops_later_snapshots() {
        let mut executor = ContractExecutor::new(MockChain::default());
        let first = executor.snapshot();
        executor.mine();
        let second = executor.snapshot();
        executor.mine();

        assert!(executor.revert(first));
        assert_eq!(executor.block_number(), 0);
        assert!(!executor.revert(second));
        assert!(!executor.revert(first));
    }
}
