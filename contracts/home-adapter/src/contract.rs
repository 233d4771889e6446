//! Home Adapter - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use common::ledger::{settle_pending_credit, CREDIT_REPLY_ID};
use common::AdapterStatus;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_burn_locked_tokens, execute_cancel_ownership_transfer,
    execute_cancel_signature, execute_migrate_to_native, execute_receive_message,
    execute_resume_messaging, execute_send_message, execute_send_message_with_signature,
    execute_set_burn_amount, execute_set_linked_adapter, execute_stop_messaging,
    execute_transfer_ownership, execute_withdraw_locked_funds,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_locked_funds, query_migration, query_nonce_used, query_pending_owner,
    query_signature_digest, query_status,
};
use crate::state::{Config, Migration, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MIGRATION, STATUS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let token = deps.api.addr_validate(&msg.token)?;
    let messenger = deps.api.addr_validate(&msg.messenger)?;

    if let Some(linked_adapter) = &msg.linked_adapter {
        if linked_adapter.trim().is_empty() {
            return Err(ContractError::InvalidAddress {
                reason: "linked adapter must not be empty".to_string(),
            });
        }
    }

    let config = Config {
        owner,
        token,
        messenger,
        linked_adapter: msg.linked_adapter,
        bounce_min_gas_limit: msg.bounce_min_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;
    STATUS.save(deps.storage, &AdapterStatus::Active)?;
    MIGRATION.save(deps.storage, &Migration::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", config.token)
        .add_attribute("messenger", config.messenger)
        .add_attribute(
            "linked_adapter",
            config.linked_adapter.unwrap_or_default(),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Messaging
        ExecuteMsg::SendMessage {
            to,
            amount,
            min_gas_limit,
        } => execute_send_message(deps, env, info, to, amount, min_gas_limit),
        ExecuteMsg::SendMessageWithSignature {
            signer,
            to,
            amount,
            signature,
            nonce,
            deadline,
            min_gas_limit,
        } => execute_send_message_with_signature(
            deps,
            env,
            signer,
            to,
            amount,
            signature,
            nonce,
            deadline,
            min_gas_limit,
        ),
        ExecuteMsg::CancelSignature { nonce } => execute_cancel_signature(deps, info, nonce),
        ExecuteMsg::ReceiveMessage {
            user,
            spender,
            amount,
        } => execute_receive_message(deps, info, user, spender, amount),
        ExecuteMsg::WithdrawLockedFunds { spender, user } => {
            execute_withdraw_locked_funds(deps, spender, user)
        }

        // Messaging control
        ExecuteMsg::StopMessaging { min_gas_limit } => {
            execute_stop_messaging(deps, info, min_gas_limit)
        }
        ExecuteMsg::ResumeMessaging { min_gas_limit } => {
            execute_resume_messaging(deps, info, min_gas_limit)
        }

        // Migration
        ExecuteMsg::MigrateToNative {
            role_caller,
            burn_caller,
            receive_min_gas_limit,
            set_burn_amount_min_gas_limit,
        } => execute_migrate_to_native(
            deps,
            info,
            role_caller,
            burn_caller,
            receive_min_gas_limit,
            set_burn_amount_min_gas_limit,
        ),
        ExecuteMsg::SetBurnAmount { amount } => execute_set_burn_amount(deps, info, amount),
        ExecuteMsg::BurnLockedTokens {} => execute_burn_locked_tokens(deps, env, info),

        // Admin
        ExecuteMsg::SetLinkedAdapter { linked_adapter } => {
            execute_set_linked_adapter(deps, info, linked_adapter)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
        ExecuteMsg::CancelOwnershipTransfer {} => execute_cancel_ownership_transfer(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Settles guarded credits: a rejected transfer becomes locked funds.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        CREDIT_REPLY_ID => Ok(settle_pending_credit(deps.storage, msg.result)?),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Status {} => to_json_binary(&query_status(deps)?),
        QueryMsg::LockedFunds { spender, user } => {
            to_json_binary(&query_locked_funds(deps, spender, user)?)
        }
        QueryMsg::NonceUsed { signer, nonce } => {
            to_json_binary(&query_nonce_used(deps, signer, nonce)?)
        }
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::SignatureDigest {
            to,
            amount,
            deadline,
            nonce,
            min_gas_limit,
        } => to_json_binary(&query_signature_digest(
            env,
            to,
            amount,
            deadline,
            nonce,
            min_gas_limit,
        )?),
        QueryMsg::Migration {} => to_json_binary(&query_migration(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
