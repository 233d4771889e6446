//! Owner passthrough to the bridged token.

use common::proxy_admin::{proxy_admin_msg, ProxyAdminExecuteMsg};
use common::token::{is_forbidden_token_call, is_upgrade_call, token_call_selector, TokenUpgradeMsg};
use cosmwasm_std::{from_json, Binary, CosmosMsg, DepsMut, MessageInfo, Response, WasmMsg};

use crate::error::ContractError;
use crate::execute::admin::ensure_owner;
use crate::state::CONFIG;

/// Forward `msg` to the token.
///
/// Ownership, admin and master minter transfers are refused outright. Upgrade
/// requests are admin-guarded on the token, so they are rewritten as proxy
/// admin calls. Anything else reaches the token verbatim with the attached
/// funds.
pub fn execute_call_token_transaction(
    deps: DepsMut,
    info: MessageInfo,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let selector = token_call_selector(msg.as_slice())?;
    if is_forbidden_token_call(&selector) {
        return Err(ContractError::ForbiddenTokenCall { selector });
    }

    let (forward, route) = if is_upgrade_call(&selector) {
        let upgrade: TokenUpgradeMsg = from_json(&msg)?;
        let call = ProxyAdminExecuteMsg::from_token_upgrade(&config.token, upgrade);
        (proxy_admin_msg(&config.proxy_admin, &call)?, "proxy_admin")
    } else {
        let call = CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg,
            funds: info.funds,
        });
        (call, "token")
    };

    Ok(Response::new()
        .add_message(forward)
        .add_attribute("action", "call_token_transaction")
        .add_attribute("selector", selector)
        .add_attribute("route", route))
}
