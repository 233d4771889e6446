//! Signed sends and nonce cancellation on the home adapter.

mod helpers;

use common::relay::RemoteRelayMsg;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_multi_test::Executor;
use mocks::{stablecoin, TestSigner};

use helpers::{setup, TestEnv};
use home_adapter::msg::{ExecuteMsg, NonceUsedResponse, QueryMsg, SignatureDigestResponse};

const TO: &str = "terra1remoteuser";
const MIN_GAS: u32 = 250_000;

fn relayer() -> Addr {
    Addr::unchecked("terra1relayer")
}

/// Fund `signer` and let the adapter pull from it.
fn fund_signer(env: &mut TestEnv, signer: &Addr, amount: u128) {
    env.app
        .execute_contract(
            env.user.clone(),
            env.token.clone(),
            &stablecoin::ExecuteMsg::Transfer {
                recipient: signer.to_string(),
                amount: Uint128::new(amount),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            signer.clone(),
            env.token.clone(),
            &stablecoin::ExecuteMsg::IncreaseAllowance {
                spender: env.adapter.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
        .unwrap();
}

fn digest(env: &TestEnv, amount: u128, deadline: u64, nonce: u64) -> [u8; 32] {
    let res: SignatureDigestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.adapter,
            &QueryMsg::SignatureDigest {
                to: TO.to_string(),
                amount: Uint128::new(amount),
                deadline,
                nonce,
                min_gas_limit: MIN_GAS,
            },
        )
        .unwrap();
    res.digest.as_slice().try_into().unwrap()
}

fn signed_send(
    signer: &Addr,
    amount: u128,
    signature: Binary,
    nonce: u64,
    deadline: u64,
) -> ExecuteMsg {
    ExecuteMsg::SendMessageWithSignature {
        signer: signer.to_string(),
        to: TO.to_string(),
        amount: Uint128::new(amount),
        signature,
        nonce,
        deadline,
        min_gas_limit: MIN_GAS,
    }
}

fn nonce_used(env: &TestEnv, signer: &Addr, nonce: u64) -> bool {
    let res: NonceUsedResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.adapter,
            &QueryMsg::NonceUsed {
                signer: signer.to_string(),
                nonce,
            },
        )
        .unwrap();
    res.used
}

fn deadline(env: &TestEnv) -> u64 {
    env.app.block_info().time.seconds() + 3600
}

#[test]
fn test_signed_send_debits_signer() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = deadline(&env);
    let signature = key.sign(&digest(&env, 200, deadline, 1));
    env.execute(&relayer(), &signed_send(&signer, 200, signature, 1, deadline))
        .unwrap();

    assert_eq!(env.balance(signer.as_str()), Uint128::new(300));
    assert_eq!(env.balance(env.adapter.as_str()), Uint128::new(200));
    assert!(nonce_used(&env, &signer, 1));

    let (sent, payload) = env.last_sent();
    assert_eq!(sent.min_gas_limit, MIN_GAS);
    assert_eq!(
        payload,
        RemoteRelayMsg::ReceiveMessage {
            user: TO.to_string(),
            spender: signer.to_string(),
            amount: Uint128::new(200),
        }
    );
}

#[test]
fn test_signed_send_cannot_be_replayed() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = deadline(&env);
    let signature = key.sign(&digest(&env, 100, deadline, 3));
    let msg = signed_send(&signer, 100, signature, 3, deadline);

    env.execute(&relayer(), &msg).unwrap();
    let err = env.execute(&relayer(), &msg).unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid nonce"));
    assert_eq!(env.balance(signer.as_str()), Uint128::new(400));
}

#[test]
fn test_signature_from_other_key_is_rejected() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let impostor = TestSigner::new(9);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = deadline(&env);
    let signature = impostor.sign(&digest(&env, 100, deadline, 1));
    let err = env
        .execute(&relayer(), &signed_send(&signer, 100, signature, 1, deadline))
        .unwrap_err();

    assert!(err.root_cause().to_string().contains("Invalid signature"));
    assert!(!nonce_used(&env, &signer, 1));
    assert_eq!(env.balance(signer.as_str()), Uint128::new(500));
}

#[test]
fn test_tampered_amount_is_rejected() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = deadline(&env);
    let signature = key.sign(&digest(&env, 100, deadline, 1));
    let err = env
        .execute(&relayer(), &signed_send(&signer, 400, signature, 1, deadline))
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid signature"));
}

#[test]
fn test_expired_signature_is_rejected() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = env.app.block_info().time.seconds() - 1;
    let signature = key.sign(&digest(&env, 100, deadline, 1));
    let err = env
        .execute(&relayer(), &signed_send(&signer, 100, signature, 1, deadline))
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Signature expired"));
}

#[test]
fn test_deadline_is_inclusive() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = env.app.block_info().time.seconds();
    let signature = key.sign(&digest(&env, 100, deadline, 1));
    env.execute(&relayer(), &signed_send(&signer, 100, signature, 1, deadline))
        .unwrap();
}

#[test]
fn test_cancelled_nonce_cannot_be_used() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);

    let deadline = deadline(&env);
    let signature = key.sign(&digest(&env, 100, deadline, 5));

    env.execute(&signer, &ExecuteMsg::CancelSignature { nonce: 5 })
        .unwrap();
    assert!(nonce_used(&env, &signer, 5));

    let err = env
        .execute(&relayer(), &signed_send(&signer, 100, signature, 5, deadline))
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid nonce"));

    let err = env
        .execute(&signer, &ExecuteMsg::CancelSignature { nonce: 5 })
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid nonce"));
}

#[test]
fn test_signed_send_requires_active() {
    let mut env = setup();
    let key = TestSigner::new(7);
    let signer = key.address();
    fund_signer(&mut env, &signer, 500);
    env.execute_as_owner(&ExecuteMsg::StopMessaging {
        min_gas_limit: 100_000,
    })
    .unwrap();

    let deadline = deadline(&env);
    let signature = key.sign(&digest(&env, 100, deadline, 1));
    let err = env
        .execute(&relayer(), &signed_send(&signer, 100, signature, 1, deadline))
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Messaging disabled"));
    assert!(!nonce_used(&env, &signer, 1));
}
