// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Test-Control Shim Integration Test
//!
//! Drives the in-process node through `EvmControl`:
//! - evm_snapshot / evm_revert restore tickets, balances and height
//! - evm_mine advances the chain by one block
//! - evm_increaseTime accumulates and shifts block timestamps
//! - JSON-RPC errors surface as transport errors

mod common;

use common::*;
use hashlotto_rust::rpc::TransportError;
use serde_json::json;

#[test]
fn test_mine_advances_height() {
    let fixture = LottoFixture::new(LottoConfig::default());
    let height = fixture.block_number();

    assert_eq!(fixture.evm.mine().unwrap(), json!("0x0"));
    fixture.mine_many(9);
    assert_eq!(fixture.block_number(), height + 10);

    let reported = fixture.evm.call("eth_blockNumber", vec![]).unwrap();
    assert_eq!(reported, json!(format!("0x{:x}", height + 10)));
}

#[test]
fn test_snapshot_and_revert_restore_lottery_state() {
    let fixture = LottoFixture::new(LottoConfig::default());
    let owner = fixture.accounts[0];
    let snapshot = fixture.evm.snapshot().unwrap();
    let height = fixture.block_number();

    fixture
        .mark_my_word(owner, wei("0.1"), Word::from_utf8("hello world"), 1)
        .unwrap();
    fixture.mine_many(5);
    assert_eq!(format_ether(fixture.contract_balance()), "0.2");

    assert_eq!(fixture.evm.revert(snapshot.clone()).unwrap(), json!(true));
    assert!(fixture.ticket(&owner).is_empty());
    assert_eq!(format_ether(fixture.contract_balance()), "0.1");
    assert_eq!(fixture.block_number(), height);

    // A snapshot is consumed by reverting to it
    assert_eq!(fixture.evm.revert(snapshot).unwrap(), json!(false));
}

#[test]
fn test_revert_drops_later_snapshots() {
    let fixture = LottoFixture::new(LottoConfig::default());
    let first = fixture.evm.snapshot().unwrap();
    fixture.mine_many(1);
    let second = fixture.evm.snapshot().unwrap();
    assert_ne!(first, second);

    assert_eq!(fixture.evm.revert(first).unwrap(), json!(true));
    assert_eq!(fixture.evm.revert(second).unwrap(), json!(false));
}

#[test]
fn test_increase_time_accumulates() {
    let fixture = LottoFixture::new(LottoConfig::default());
    let before = fixture.exec(|e| e.chain().next_timestamp());

    assert_eq!(fixture.evm.increase_time(3_600).unwrap(), json!(3_600));
    assert_eq!(fixture.evm.increase_time(60).unwrap(), json!(3_660));

    fixture.mine_many(1);
    let mined = fixture.exec(|e| e.chain().latest().timestamp);
    assert_eq!(mined, before + 3_660);
}

#[test]
fn test_unknown_method_is_a_transport_error() {
    let fixture = LottoFixture::new(LottoConfig::default());
    match fixture.evm.call("evm_setAutomine", vec![json!(false)]) {
        Err(TransportError::Rpc { method, code, .. }) => {
            assert_eq!(method, "evm_setAutomine");
            assert_eq!(code, -32601);
        }
        other => panic!("expected rpc error, got {:?}", other),
    }
}

#[test]
fn test_revert_without_params_is_rejected() {
    let fixture = LottoFixture::new(LottoConfig::default());
    let err = fixture.evm.call("evm_revert", vec![]).unwrap_err();
    assert_eq!(err.category(), "rpc");
}

#[test]
fn test_snapshot_isolates_each_scenario() {
    // Snapshot, run a scenario, revert, repeat
    let fixture = LottoFixture::new(LottoConfig::default());
    let owner = fixture.accounts[0];

    for word in ["first", "second", "third"] {
        let snapshot = fixture.evm.snapshot().unwrap();
        let receipt = fixture
            .mark_my_word(owner, wei("0.1"), Word::from_utf8(word), 1)
            .unwrap();
        assert_eq!(receipt.block_number, 2);
        assert_eq!(fixture.ticket(&owner).word.to_utf8(), word);
        assert_eq!(fixture.evm.revert(snapshot).unwrap(), json!(true));
    }

    assert!(fixture.ticket(&owner).is_empty());
}
