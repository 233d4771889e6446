//! Delegated admin of the bridged token contract.
//!
//! The proxy admin holds the wasm admin rights of the token and performs the
//! actual `WasmMsg::Migrate`. The remote adapter owns it until the migration
//! hands it over to the role caller.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, StdResult, WasmMsg};

use crate::token::TokenUpgradeMsg;

#[cw_serde]
pub enum ProxyAdminExecuteMsg {
    Upgrade {
        proxy: String,
        new_code_id: u64,
    },
    UpgradeAndCall {
        proxy: String,
        new_code_id: u64,
        msg: Binary,
    },
    TransferOwnership {
        new_owner: String,
    },
}

impl ProxyAdminExecuteMsg {
    /// Translate a token upgrade request into the equivalent proxy admin call.
    pub fn from_token_upgrade(token: &Addr, upgrade: TokenUpgradeMsg) -> Self {
        match upgrade {
            TokenUpgradeMsg::UpgradeTo { new_code_id } => ProxyAdminExecuteMsg::Upgrade {
                proxy: token.to_string(),
                new_code_id,
            },
            TokenUpgradeMsg::UpgradeToAndCall { new_code_id, msg } => {
                ProxyAdminExecuteMsg::UpgradeAndCall {
                    proxy: token.to_string(),
                    new_code_id,
                    msg,
                }
            }
        }
    }
}

pub fn proxy_admin_msg(proxy_admin: &Addr, msg: &ProxyAdminExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: proxy_admin.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}
