//! Migration to native issuance, remote side.
//!
//! The trigger is not guarded by status. A second delivery fails when the
//! token refuses to remove a minter that is already gone.

use common::messenger::{ensure_linked_sender, send_message_msg};
use common::proxy_admin::{proxy_admin_msg, ProxyAdminExecuteMsg};
use common::relay::HomeRelayMsg;
use common::token::{query_total_supply, remove_minter_msg, transfer_ownership_msg};
use common::AdapterStatus;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{Migration, CONFIG, MIGRATION, STATUS};

/// Snapshot the supply, drop the minter role, report back and deprecate.
pub fn execute_receive_migrate_to_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    role_caller: String,
    set_burn_amount_min_gas_limit: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let linked_adapter = config.linked_adapter()?;
    ensure_linked_sender(&deps.querier, &info.sender, &config.messenger, linked_adapter)?;

    let role_caller = deps.api.addr_validate(&role_caller)?;
    let burn_amount = query_total_supply(&deps.querier, &config.token)?;
    let previous_status = STATUS.load(deps.storage)?;

    MIGRATION.save(
        deps.storage,
        &Migration {
            role_caller: Some(role_caller.clone()),
            burn_amount,
        },
    )?;
    STATUS.save(deps.storage, &AdapterStatus::Deprecated)?;

    let remove_minter = remove_minter_msg(&config.token, &env.contract.address)?;
    let report = send_message_msg(
        &config.messenger,
        linked_adapter,
        &HomeRelayMsg::SetBurnAmount {
            amount: burn_amount,
        },
        set_burn_amount_min_gas_limit,
    )?;

    Ok(Response::new()
        .add_message(remove_minter)
        .add_message(report)
        .add_attribute("action", "receive_migrate_to_native")
        .add_attribute("previous_status", previous_status.as_str())
        .add_attribute("role_caller", role_caller)
        .add_attribute("burn_amount", burn_amount)
        .add_attribute(
            "set_burn_amount_min_gas_limit",
            set_burn_amount_min_gas_limit.to_string(),
        ))
}

/// Hand token ownership and the proxy admin over (role caller only).
pub fn execute_transfer_token_roles(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let migration = MIGRATION.load(deps.storage)?;
    if migration.role_caller.as_ref() != Some(&info.sender) {
        return Err(ContractError::NotRoleCaller);
    }

    let new_owner = deps.api.addr_validate(&new_owner)?;

    let token_owner = transfer_ownership_msg(&config.token, &new_owner)?;
    let admin_owner = proxy_admin_msg(
        &config.proxy_admin,
        &ProxyAdminExecuteMsg::TransferOwnership {
            new_owner: new_owner.to_string(),
        },
    )?;

    Ok(Response::new()
        .add_message(token_owner)
        .add_message(admin_owner)
        .add_attribute("action", "transfer_token_roles")
        .add_attribute("role_caller", info.sender)
        .add_attribute("new_owner", new_owner))
}
