//! Messaging handlers.
//!
//! Outbound: tokens are pulled into escrow and a `receive_message` payload is
//! queued for the remote adapter.
//! Inbound: the escrow is released to the user, or the amount is recorded as
//! locked funds when the token refuses the transfer. A deprecated adapter
//! bounces the amount back to the depositor on the remote chain instead.

use common::ledger::{guarded_credit, take_locked_funds};
use common::messenger::{ensure_linked_sender, send_message_msg};
use common::relay::RemoteRelayMsg;
use common::token::{query_is_blacklisted, transfer_from_msg, transfer_msg};
use cosmwasm_std::{Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, STATUS};

// ============================================================================
// Outbound
// ============================================================================

/// Preconditions shared by the signed and unsigned send paths.
pub(crate) fn ensure_sendable(
    deps: Deps,
    config: &Config,
    to: &str,
    amount: Uint128,
) -> Result<(), ContractError> {
    if to.trim().is_empty() {
        return Err(ContractError::InvalidRecipient);
    }
    if query_is_blacklisted(&deps.querier, &config.token, to)? {
        return Err(ContractError::RecipientBlacklisted {
            address: to.to_string(),
        });
    }

    let status = STATUS.load(deps.storage)?;
    if !status.is_active() {
        return Err(ContractError::MessagingDisabled { status });
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Escrow `amount` from `spender` and queue the credit for `to`.
pub(crate) fn outbound_transfer(
    env: &Env,
    config: &Config,
    spender: &Addr,
    to: String,
    amount: Uint128,
    min_gas_limit: u32,
) -> Result<Response, ContractError> {
    let linked_adapter = config.linked_adapter()?;

    let escrow = transfer_from_msg(&config.token, spender, &env.contract.address, amount)?;
    let relay = send_message_msg(
        &config.messenger,
        linked_adapter,
        &RemoteRelayMsg::receive_message(&to, spender.as_str(), amount),
        min_gas_limit,
    )?;

    Ok(Response::new()
        .add_message(escrow)
        .add_message(relay)
        .add_attribute("action", "send_message")
        .add_attribute("spender", spender.as_str())
        .add_attribute("to", to)
        .add_attribute("amount", amount)
        .add_attribute("min_gas_limit", min_gas_limit.to_string()))
}

/// Send tokens to the remote chain on behalf of the caller.
pub fn execute_send_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    amount: Uint128,
    min_gas_limit: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_sendable(deps.as_ref(), &config, &to, amount)?;

    outbound_transfer(&env, &config, &info.sender, to, amount, min_gas_limit)
}

// ============================================================================
// Inbound
// ============================================================================

/// Message returning the amount to `spender` on the remote chain.
fn bounce_msg(
    config: &Config,
    user: &str,
    spender: &str,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    Ok(send_message_msg(
        &config.messenger,
        config.linked_adapter()?,
        &RemoteRelayMsg::receive_message(spender, user, amount),
        config.bounce_min_gas_limit,
    )?)
}

/// Release escrowed tokens to `user` (linked adapter only).
pub fn execute_receive_message(
    deps: DepsMut,
    info: MessageInfo,
    user: String,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_linked_sender(
        &deps.querier,
        &info.sender,
        &config.messenger,
        config.linked_adapter()?,
    )?;

    if STATUS.load(deps.storage)?.is_deprecated() {
        return Ok(Response::new()
            .add_message(bounce_msg(&config, &user, &spender, amount)?)
            .add_attribute("action", "bounce_message")
            .add_attribute("user", user)
            .add_attribute("spender", spender)
            .add_attribute("amount", amount));
    }

    let release = transfer_msg(&config.token, &user, amount)?;
    let credit = guarded_credit(deps.storage, release, &spender, &user, amount)?;

    Ok(Response::new()
        .add_submessage(credit)
        .add_attribute("action", "receive_message")
        .add_attribute("user", user)
        .add_attribute("spender", spender)
        .add_attribute("amount", amount))
}

/// Pay out funds recorded after a failed credit.
///
/// The entry is consumed before the payout. The payout is not guarded, so a
/// failing transfer reverts the whole call and the entry stays in place.
pub fn execute_withdraw_locked_funds(
    deps: DepsMut,
    spender: String,
    user: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = take_locked_funds(deps.storage, &spender, &user)?;

    let (payout, outcome) = if STATUS.load(deps.storage)?.is_deprecated() {
        (bounce_msg(&config, &user, &spender, amount)?, "bounced")
    } else {
        (transfer_msg(&config.token, &user, amount)?, "released")
    };

    Ok(Response::new()
        .add_message(payout)
        .add_attribute("action", "withdraw_locked_funds")
        .add_attribute("outcome", outcome)
        .add_attribute("spender", spender)
        .add_attribute("user", user)
        .add_attribute("amount", amount))
}
