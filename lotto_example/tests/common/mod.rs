// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Test the public module
//! Contains all the functions and tools shared by all tests.

#![allow(unused_imports)]
#![allow(dead_code)]

pub use hashlotto_rust::lotto::config::{LottoConfig, MissPolicy, StaleTicketPolicy, WinPredicate};
pub use hashlotto_rust::lotto::ticket::{Ticket, Word};
pub use hashlotto_rust::lotto::traits::Address;
pub use hashlotto_rust::lotto::utils::{format_ether, to_wei};
pub use hashlotto_rust::lotto::{LottoError, ToldYouSoEvent};
pub use hashlotto_rust::rpc::EvmControl;
pub use hashlotto_rust::{HashLotto, Resolution};

pub use lotto_example::contract_executor::{ContractExecutor, ExecutionError, TxReceipt};
pub use lotto_example::mock_context::{MockChain, MockChainBuilder};
pub use lotto_example::mock_rpc::MockRpcNode;

/// Initialise test logging once per test binary
pub fn init_logging() {
    hashlotto_rust::init_logger(true);
}

/// Wei amount for a decimal ether string
pub fn wei(ether: &str) -> u128 {
    to_wei(ether).expect("valid ether amount")
}

/// A fresh node with a HashLotto deployed from accounts[0] with a 0.1 ether
/// pool
pub struct LottoFixture {
    pub evm: EvmControl<MockRpcNode>,
    pub accounts: Vec<Address>,
    pub lotto: Address,
}

impl LottoFixture {
    pub fn new(config: LottoConfig) -> Self {
        Self::with_chain(MockChain::default(), config)
    }

    pub fn with_chain(chain: MockChain, config: LottoConfig) -> Self {
        init_logging();

        let evm = EvmControl::new(MockRpcNode::new(chain));
        let (accounts, lotto) = evm
            .transport()
            .with_executor(|executor| {
                let accounts = executor.accounts();
                let receipt = executor
                    .deploy(accounts[0], wei("0.1"), config)
                    .expect("deploy should succeed");
                (accounts, receipt.output)
            })
            .expect("node available");

        Self {
            evm,
            accounts,
            lotto,
        }
    }

    /// Run `f` against the node's executor
    pub fn exec<R>(&self, f: impl FnOnce(&mut ContractExecutor) -> R) -> R {
        self.evm
            .transport()
            .with_executor(f)
            .expect("node available")
    }

    pub fn mark_my_word(
        &self,
        from: Address,
        value: u128,
        word: Word,
        ahead: u64,
    ) -> Result<TxReceipt<Ticket>, ExecutionError> {
        let lotto = self.lotto;
        self.exec(|e| e.mark_my_word(lotto, from, value, word, ahead))
    }

    pub fn told_you_so(
        &self,
        from: Address,
        bragging: &str,
    ) -> Result<TxReceipt<Resolution>, ExecutionError> {
        let lotto = self.lotto;
        self.exec(|e| e.told_you_so(lotto, from, Word::from_utf8(bragging)))
    }

    pub fn ticket(&self, who: &Address) -> Ticket {
        let lotto = self.lotto;
        self.exec(|e| e.tickets(&lotto, who))
            .expect("contract deployed")
    }

    pub fn contract_balance(&self) -> u128 {
        let lotto = self.lotto;
        self.exec(|e| e.balance(&lotto))
    }

    pub fn block_number(&self) -> u64 {
        self.exec(|e| e.block_number())
    }

    /// Mine `times` blocks through the control shim
    pub fn mine_many(&self, times: u64) {
        self.evm.mine_many(times).expect("evm_mine should succeed");
    }
}
