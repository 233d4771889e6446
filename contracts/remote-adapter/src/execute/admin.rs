//! Admin operations handlers.
//!
//! This module handles:
//! - Stop/resume messaging relayed from the home adapter
//! - Linking the home adapter
//! - Ownership transfer (propose/accept/cancel)

use common::messenger::ensure_linked_sender;
use common::AdapterStatus;
use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, PENDING_OWNER, STATUS};

pub(crate) fn ensure_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ============================================================================
// Messaging Control
// ============================================================================

pub fn execute_receive_stop_messaging(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_messaging_status(deps, info, AdapterStatus::Paused)
}

pub fn execute_receive_resume_messaging(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_messaging_status(deps, info, AdapterStatus::Active)
}

fn set_messaging_status(
    deps: DepsMut,
    info: MessageInfo,
    target: AdapterStatus,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_linked_sender(
        &deps.querier,
        &info.sender,
        &config.messenger,
        config.linked_adapter()?,
    )?;

    let status = STATUS.load(deps.storage)?;
    if status.is_deprecated() {
        return Err(ContractError::AdapterDeprecated);
    }
    STATUS.save(deps.storage, &target)?;

    let action = match target {
        AdapterStatus::Paused => "receive_stop_messaging",
        _ => "receive_resume_messaging",
    };

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("previous_status", status.as_str())
        .add_attribute("status", target.as_str()))
}

// ============================================================================
// Linking
// ============================================================================

/// Record the home adapter address. Allowed once.
pub fn execute_set_linked_adapter(
    deps: DepsMut,
    info: MessageInfo,
    linked_adapter: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    if let Some(current) = &config.linked_adapter {
        return Err(ContractError::LinkedAdapterAlreadySet {
            linked_adapter: current.clone(),
        });
    }
    if linked_adapter.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "linked adapter must not be empty".to_string(),
        });
    }

    config.linked_adapter = Some(linked_adapter.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_linked_adapter")
        .add_attribute("linked_adapter", linked_adapter))
}

// ============================================================================
// Ownership Transfer
// ============================================================================

/// Propose a new owner.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("pending_owner", new_owner))
}

/// Accept pending ownership.
pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.owner = pending.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_ownership")
        .add_attribute("owner", pending))
}

/// Cancel pending ownership transfer.
pub fn execute_cancel_ownership_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "cancel_ownership_transfer"))
}
