//! Migration to native issuance across both chains.

use common::relay::{HomeRelayMsg, RemoteRelayMsg};
use common::AdapterStatus;
use cosmwasm_std::{from_json, Addr, Uint128};
use cw_multi_test::Executor;
use e2e_tests::{BridgeSuite, INITIAL_BALANCE};
use mocks::{proxy_admin, stablecoin};

use home_adapter::msg::{ExecuteMsg as HomeExecuteMsg, MigrationResponse};
use remote_adapter::msg::ExecuteMsg as RemoteExecuteMsg;

fn role_caller() -> Addr {
    Addr::unchecked("terra1issuer")
}

fn burn_caller() -> Addr {
    Addr::unchecked("terra1burner")
}

fn migrate() -> HomeExecuteMsg {
    HomeExecuteMsg::MigrateToNative {
        role_caller: role_caller().to_string(),
        burn_caller: burn_caller().to_string(),
        receive_min_gas_limit: 400_000,
        set_burn_amount_min_gas_limit: 150_000,
    }
}

fn home_send(to: &str, amount: u128) -> HomeExecuteMsg {
    HomeExecuteMsg::SendMessage {
        to: to.to_string(),
        amount: Uint128::new(amount),
        min_gas_limit: 200_000,
    }
}

/// Bridge `amount` from the suite user to `to` on the remote chain.
fn bridge(suite: &mut BridgeSuite, to: &str, amount: u128) -> anyhow::Result<()> {
    let user = suite.user.clone();
    suite.home_execute(&user, &home_send(to, amount))?;
    suite.relay_to_remote()?;
    Ok(())
}

fn home_migration(suite: &BridgeSuite) -> anyhow::Result<MigrationResponse> {
    Ok(suite.app.wrap().query_wasm_smart(
        &suite.home_adapter,
        &home_adapter::msg::QueryMsg::Migration {},
    )?)
}

fn remote_minter(suite: &BridgeSuite) -> anyhow::Result<Option<cw20::MinterResponse>> {
    Ok(suite
        .app
        .wrap()
        .query_wasm_smart(&suite.remote_token, &stablecoin::QueryMsg::Minter {})?)
}

#[test]
fn test_full_migration() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();
    bridge(&mut suite, "terra1alice", 700)?;
    bridge(&mut suite, "terra1bob", 300)?;

    // Home starts upgrading and asks the remote side to deprecate.
    suite.home_execute(&owner, &migrate())?;
    assert_eq!(suite.home_status()?, AdapterStatus::Upgrading);

    // Remote gives up minting and reports its supply.
    assert_eq!(suite.relay_to_remote()?, 1);
    assert_eq!(suite.remote_status()?, AdapterStatus::Deprecated);
    assert_eq!(remote_minter(&suite)?, None);

    assert_eq!(suite.relay_to_home()?, 1);
    assert_eq!(suite.home_status()?, AdapterStatus::Deprecated);
    assert_eq!(home_migration(&suite)?.burn_amount, Uint128::new(1_000));

    suite.home_execute(&burn_caller(), &HomeExecuteMsg::BurnLockedTokens {})?;
    assert_eq!(suite.home_balance(suite.home_adapter.as_str())?, Uint128::zero());
    let migration = home_migration(&suite)?;
    assert_eq!(migration.burn_amount, Uint128::zero());
    assert_eq!(migration.burn_caller, None);

    // The issuer takes over the remote token.
    suite.remote_execute(
        &role_caller(),
        &RemoteExecuteMsg::TransferTokenRoles {
            new_owner: role_caller().to_string(),
        },
    )?;
    let roles: stablecoin::RolesResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.remote_token, &stablecoin::QueryMsg::Roles {})?;
    assert_eq!(roles.owner, role_caller().to_string());
    let admin: proxy_admin::OwnerResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.proxy_admin, &proxy_admin::QueryMsg::Owner {})?;
    assert_eq!(admin.owner, role_caller());

    // Holders keep their balances on the now native token.
    assert_eq!(suite.remote_balance("terra1alice")?, Uint128::new(700));
    assert_eq!(suite.remote_balance("terra1bob")?, Uint128::new(300));

    // Upgrades no longer need the adapter.
    let new_code = suite.app.store_code(stablecoin::contract());
    suite.app.execute_contract(
        role_caller(),
        suite.proxy_admin.clone(),
        &proxy_admin::ExecuteMsg::Upgrade {
            proxy: suite.remote_token.to_string(),
            new_code_id: new_code,
        },
        &[],
    )?;
    let info = suite.app.wrap().query_wasm_contract_info(&suite.remote_token)?;
    assert_eq!(info.code_id, new_code);

    // And the old owner lost the passthrough.
    let err = suite
        .remote_token_execute(&stablecoin::ExecuteMsg::Pause {})
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
    Ok(())
}

#[test]
fn test_in_flight_return_lands_before_snapshot() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();
    let user = suite.user.clone();
    bridge(&mut suite, "terra1alice", 500)?;

    // Alice sends part of it back just before the migration starts.
    let alice = Addr::unchecked("terra1alice");
    suite.app.execute_contract(
        alice.clone(),
        suite.remote_token.clone(),
        &stablecoin::ExecuteMsg::IncreaseAllowance {
            spender: suite.remote_adapter.to_string(),
            amount: Uint128::new(200),
            expires: None,
        },
        &[],
    )?;
    suite.remote_execute(
        &alice,
        &RemoteExecuteMsg::SendMessage {
            to: user.to_string(),
            amount: Uint128::new(200),
            min_gas_limit: 200_000,
        },
    )?;

    suite.home_execute(&owner, &migrate())?;
    suite.relay_to_remote()?;

    // Home is still upgrading when the return arrives, so it is released.
    assert_eq!(suite.relay_to_home()?, 2);
    assert_eq!(
        suite.home_balance(user.as_str())?,
        Uint128::new(INITIAL_BALANCE - 300)
    );
    assert_eq!(suite.home_status()?, AdapterStatus::Deprecated);
    assert_eq!(home_migration(&suite)?.burn_amount, Uint128::new(300));
    assert_eq!(
        suite.home_balance(suite.home_adapter.as_str())?,
        Uint128::new(300)
    );
    Ok(())
}

#[test]
fn test_burn_capped_by_escrow() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();
    bridge(&mut suite, "terra1alice", 400)?;

    // The master minter hands the role to someone else, who mints unbacked
    // supply.
    let rogue = Addr::unchecked("terra1rogue");
    suite.app.execute_contract(
        owner.clone(),
        suite.remote_token.clone(),
        &stablecoin::ExecuteMsg::ConfigureMinter {
            minter: rogue.to_string(),
        },
        &[],
    )?;
    suite.app.execute_contract(
        rogue.clone(),
        suite.remote_token.clone(),
        &stablecoin::ExecuteMsg::Mint {
            recipient: rogue.to_string(),
            amount: Uint128::new(250),
        },
        &[],
    )?;

    // The adapter is no longer the minter, so the trigger cannot land.
    suite.home_execute(&owner, &migrate())?;
    let err = suite.relay_to_remote().unwrap_err();
    assert!(err.root_cause().to_string().contains("is not a minter"));
    assert_eq!(suite.remote_status()?, AdapterStatus::Active);
    assert_eq!(suite.pending_to_remote()?.len(), 1);

    suite.app.execute_contract(
        owner,
        suite.remote_token.clone(),
        &stablecoin::ExecuteMsg::ConfigureMinter {
            minter: suite.remote_adapter.to_string(),
        },
        &[],
    )?;
    suite.relay_to_remote()?;
    suite.relay_to_home()?;

    // The snapshot includes the unbacked supply; the burn stops at the escrow.
    assert_eq!(home_migration(&suite)?.burn_amount, Uint128::new(650));
    let res = suite.home_execute(&burn_caller(), &HomeExecuteMsg::BurnLockedTokens {})?;
    assert!(res
        .events
        .iter()
        .flat_map(|e| e.attributes.iter())
        .any(|a| a.key == "burned" && a.value == "400"));
    assert_eq!(suite.home_balance(suite.home_adapter.as_str())?, Uint128::zero());
    Ok(())
}

#[test]
fn test_dropped_trigger_is_resent() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();

    suite.home_execute(&owner, &migrate())?;
    assert!(suite.drop_next_to_remote()?.is_some());
    assert_eq!(suite.remote_status()?, AdapterStatus::Active);

    suite.home_execute(&owner, &migrate())?;
    assert_eq!(suite.relay_to_remote()?, 1);
    assert_eq!(suite.relay_to_home()?, 1);

    assert_eq!(suite.remote_status()?, AdapterStatus::Deprecated);
    assert_eq!(suite.home_status()?, AdapterStatus::Deprecated);
    Ok(())
}

#[test]
fn test_replayed_trigger_is_rejected() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();

    suite.home_execute(&owner, &migrate())?;
    let trigger = suite
        .pending_to_remote()?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("no trigger queued"))?;
    let payload: RemoteRelayMsg = from_json(&trigger.message)?;
    assert!(matches!(
        payload,
        RemoteRelayMsg::ReceiveMigrateToNative { .. }
    ));

    suite.relay_to_remote()?;
    suite.relay_to_home()?;

    let err = suite.redeliver_to_remote(&trigger).unwrap_err();
    assert!(err.root_cause().to_string().contains("is not a minter"));
    assert!(suite.pending_to_home()?.is_empty());
    Ok(())
}

#[test]
fn test_late_transfer_bounces_between_deprecated_adapters() -> anyhow::Result<()> {
    let mut suite = BridgeSuite::new()?;
    let owner = suite.owner.clone();
    let user = suite.user.clone();

    // A transfer held up by the relay until after the migration.
    suite.home_execute(&user, &home_send("terra1alice", 100))?;
    let late = suite
        .drop_next_to_remote()?
        .ok_or_else(|| anyhow::anyhow!("no transfer queued"))?;

    suite.home_execute(&owner, &migrate())?;
    suite.relay_to_remote()?;
    suite.redeliver_to_remote(&late)?;

    // Nothing is minted; the amount heads back to the depositor.
    assert_eq!(suite.remote_balance("terra1alice")?, Uint128::zero());
    assert_eq!(suite.remote_supply()?, Uint128::zero());
    let pending = suite.pending_to_home()?;
    assert_eq!(pending.len(), 2);
    let bounce: HomeRelayMsg = from_json(&pending[1].message)?;
    assert_eq!(
        bounce,
        HomeRelayMsg::receive_message(user.as_str(), "terra1alice", Uint128::new(100))
    );
    assert_eq!(pending[1].min_gas_limit, e2e_tests::BOUNCE_GAS);

    // Home finalizes first, so the bounce is sent back once more and the
    // funds stay in escrow.
    suite.relay_to_home()?;
    assert_eq!(suite.home_status()?, AdapterStatus::Deprecated);
    assert_eq!(
        suite.home_balance(suite.home_adapter.as_str())?,
        Uint128::new(100)
    );
    let returned = suite
        .pending_to_remote()?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("no bounce queued"))?;
    let payload: RemoteRelayMsg = from_json(&returned.message)?;
    assert_eq!(
        payload,
        RemoteRelayMsg::receive_message("terra1alice", user.as_str(), Uint128::new(100))
    );
    Ok(())
}
