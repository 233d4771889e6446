//! Stablecoin capability.
//!
//! The bridged token speaks CW20 for balances and supply movements, and adds the
//! administrative surface of a regulated stablecoin: blacklisting, minter
//! management, ownership and upgrade hooks. Every mutating call may fail (for
//! example a blacklisted recipient or a paused token) so adapters never assume
//! success.

use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};
use serde::de::IgnoredAny;

use crate::error::CommonError;

/// Token calls the owner passthrough must never forward: they would hand
/// custody of the token to someone other than the role caller.
pub const FORBIDDEN_TOKEN_CALLS: [&str; 3] =
    ["transfer_ownership", "change_admin", "update_master_minter"];

/// Token calls that must be routed through the proxy admin.
pub const UPGRADE_TO: &str = "upgrade_to";
pub const UPGRADE_TO_AND_CALL: &str = "upgrade_to_and_call";

/// Administrative extension on top of `Cw20ExecuteMsg`.
#[cw_serde]
pub enum StablecoinExecuteMsg {
    ConfigureMinter { minter: String },
    RemoveMinter { minter: String },
    UpdateMasterMinter { new_master_minter: String },
    TransferOwnership { new_owner: String },
    ChangeAdmin { new_admin: String },
    Blacklist { account: String },
    Unblacklist { account: String },
    Pause {},
    Unpause {},
}

/// Upgrade requests addressed to the token. These are admin-guarded, so the
/// adapter forwards them to the proxy admin instead of the token itself.
#[cw_serde]
pub enum TokenUpgradeMsg {
    UpgradeTo { new_code_id: u64 },
    UpgradeToAndCall { new_code_id: u64, msg: Binary },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum StablecoinQueryMsg {
    #[returns(BlacklistedResponse)]
    IsBlacklisted { address: String },
}

#[cw_serde]
pub struct BlacklistedResponse {
    pub blacklisted: bool,
}

fn wasm_execute<T: serde::Serialize>(token: &Addr, msg: &T) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

// ============================================================================
// Messages
// ============================================================================

pub fn transfer_msg(token: &Addr, recipient: &str, amount: Uint128) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn mint_msg(token: &Addr, recipient: &str, amount: Uint128) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn burn_msg(token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    wasm_execute(token, &Cw20ExecuteMsg::Burn { amount })
}

pub fn remove_minter_msg(token: &Addr, minter: &Addr) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &StablecoinExecuteMsg::RemoveMinter {
            minter: minter.to_string(),
        },
    )
}

pub fn transfer_ownership_msg(token: &Addr, new_owner: &Addr) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &StablecoinExecuteMsg::TransferOwnership {
            new_owner: new_owner.to_string(),
        },
    )
}

// ============================================================================
// Queries
// ============================================================================

pub fn query_balance(querier: &QuerierWrapper, token: &Addr, address: &Addr) -> StdResult<Uint128> {
    let res: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: address.to_string(),
        },
    )?;
    Ok(res.balance)
}

pub fn query_total_supply(querier: &QuerierWrapper, token: &Addr) -> StdResult<Uint128> {
    let res: TokenInfoResponse = querier.query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(res.total_supply)
}

pub fn query_is_blacklisted(querier: &QuerierWrapper, token: &Addr, address: &str) -> StdResult<bool> {
    let res: BlacklistedResponse = querier.query_wasm_smart(
        token,
        &StablecoinQueryMsg::IsBlacklisted {
            address: address.to_string(),
        },
    )?;
    Ok(res.blacklisted)
}

// ============================================================================
// Passthrough selectors
// ============================================================================

/// Decoded selector (the top-level variant name) of a JSON-encoded token
/// execute message, e.g. `{"transfer_ownership":{...}}` -> `transfer_ownership`.
///
/// Keys are decoded the same way the token decodes them, escapes included.
/// Struct variants must carry exactly one top-level key; unit variants are
/// bare strings.
pub fn token_call_selector(msg: &[u8]) -> Result<String, CommonError> {
    let selector = match from_json::<String>(msg) {
        Ok(unit) => unit,
        Err(_) => {
            let object: BTreeMap<String, IgnoredAny> =
                from_json(msg).map_err(|err| CommonError::MalformedTokenCall {
                    reason: err.to_string(),
                })?;
            if object.len() != 1 {
                return Err(CommonError::MalformedTokenCall {
                    reason: format!("expected one top-level key, found {}", object.len()),
                });
            }
            object.into_keys().next().unwrap_or_default()
        }
    };

    if selector.is_empty() {
        return Err(CommonError::MalformedTokenCall {
            reason: "empty selector".to_string(),
        });
    }
    Ok(selector)
}

pub fn is_forbidden_token_call(selector: &str) -> bool {
    FORBIDDEN_TOKEN_CALLS.contains(&selector)
}

pub fn is_upgrade_call(selector: &str) -> bool {
    selector == UPGRADE_TO || selector == UPGRADE_TO_AND_CALL
}
