//! Migration to native issuance, home side.
//!
//! 1. `MigrateToNative` (owner): record the burn caller, enter `Upgrading`
//!    and ask the remote adapter to deprecate itself.
//! 2. The remote adapter snapshots its supply and relays `SetBurnAmount`.
//! 3. `SetBurnAmount`: store the snapshot and enter `Deprecated`.
//! 4. `BurnLockedTokens` (burn caller): burn up to the snapshot from escrow.

use common::messenger::{ensure_linked_sender, send_message_msg};
use common::relay::RemoteRelayMsg;
use common::token::{burn_msg, query_balance};
use common::AdapterStatus;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::admin::ensure_owner;
use crate::state::{CONFIG, MIGRATION, STATUS};

/// Start the migration, or resend the trigger while still upgrading.
pub fn execute_migrate_to_native(
    deps: DepsMut,
    info: MessageInfo,
    role_caller: String,
    burn_caller: String,
    receive_min_gas_limit: u32,
    set_burn_amount_min_gas_limit: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    // The role caller lives on the remote chain and is validated there.
    if role_caller.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "role caller must not be empty".to_string(),
        });
    }
    let burn_caller = deps.api.addr_validate(&burn_caller)?;

    let status = STATUS.load(deps.storage)?;
    if !status.can_start_migration() {
        return Err(ContractError::InvalidStatus { status });
    }

    MIGRATION.update(deps.storage, |mut migration| -> Result<_, ContractError> {
        migration.burn_caller = Some(burn_caller.clone());
        Ok(migration)
    })?;
    STATUS.save(deps.storage, &AdapterStatus::Upgrading)?;

    let relay = send_message_msg(
        &config.messenger,
        config.linked_adapter()?,
        &RemoteRelayMsg::ReceiveMigrateToNative {
            role_caller: role_caller.clone(),
            set_burn_amount_min_gas_limit,
        },
        receive_min_gas_limit,
    )?;

    Ok(Response::new()
        .add_message(relay)
        .add_attribute("action", "migrate_to_native")
        .add_attribute("previous_status", status.as_str())
        .add_attribute("role_caller", role_caller)
        .add_attribute("burn_caller", burn_caller)
        .add_attribute("receive_min_gas_limit", receive_min_gas_limit.to_string())
        .add_attribute(
            "set_burn_amount_min_gas_limit",
            set_burn_amount_min_gas_limit.to_string(),
        ))
}

/// Remote supply snapshot (linked adapter only). Finalizes the home side.
pub fn execute_set_burn_amount(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_linked_sender(
        &deps.querier,
        &info.sender,
        &config.messenger,
        config.linked_adapter()?,
    )?;

    let status = STATUS.load(deps.storage)?;
    if status != AdapterStatus::Upgrading {
        return Err(ContractError::NotUpgrading { status });
    }

    MIGRATION.update(deps.storage, |mut migration| -> Result<_, ContractError> {
        migration.burn_amount = amount;
        Ok(migration)
    })?;
    STATUS.save(deps.storage, &AdapterStatus::Deprecated)?;

    Ok(Response::new()
        .add_attribute("action", "set_burn_amount")
        .add_attribute("burn_amount", amount)
        .add_attribute("status", AdapterStatus::Deprecated.as_str()))
}

/// Burn `min(burn_amount, escrow balance)`. Completes the migration.
///
/// The escrow can hold less than the remote supply when tokens were minted on
/// the remote chain by someone other than this bridge.
pub fn execute_burn_locked_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut migration = MIGRATION.load(deps.storage)?;

    if migration.burn_caller.as_ref() != Some(&info.sender) {
        return Err(ContractError::NotBurnCaller);
    }
    let status = STATUS.load(deps.storage)?;
    if !status.is_deprecated() {
        return Err(ContractError::InvalidStatus { status });
    }

    let balance = query_balance(&deps.querier, &config.token, &env.contract.address)?;
    let burn_amount = migration.burn_amount.min(balance);

    migration.burn_amount = Uint128::zero();
    migration.burn_caller = None;
    MIGRATION.save(deps.storage, &migration)?;

    let mut response = Response::new();
    if !burn_amount.is_zero() {
        response = response.add_message(burn_msg(&config.token, burn_amount)?);
    }

    Ok(response
        .add_attribute("action", "burn_locked_tokens")
        .add_attribute("burn_caller", info.sender)
        .add_attribute("balance", balance)
        .add_attribute("burned", burn_amount))
}
