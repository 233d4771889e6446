//! Mock proxy admin.
//!
//! Must be instantiated first and set as the wasm admin of the stablecoin, so
//! its `WasmMsg::Migrate` calls are accepted by the chain.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Item;
use thiserror::Error;

pub use common::proxy_admin::ProxyAdminExecuteMsg as ExecuteMsg;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[derive(Error, Debug, PartialEq)]
pub enum ProxyAdminError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the proxy admin owner")]
    Unauthorized,
}

const OWNER: Item<Addr> = Item::new("owner");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ProxyAdminError> {
    let owner = deps.api.addr_validate(&msg.owner)?;
    OWNER.save(deps.storage, &owner)?;
    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ProxyAdminError> {
    if OWNER.load(deps.storage)? != info.sender {
        return Err(ProxyAdminError::Unauthorized);
    }

    match msg {
        ExecuteMsg::Upgrade { proxy, new_code_id } => Ok(Response::new()
            .add_message(WasmMsg::Migrate {
                contract_addr: proxy.clone(),
                new_code_id,
                msg: to_json_binary(&Empty {})?,
            })
            .add_attribute("action", "upgrade")
            .add_attribute("proxy", proxy)
            .add_attribute("new_code_id", new_code_id.to_string())),
        ExecuteMsg::UpgradeAndCall {
            proxy,
            new_code_id,
            msg,
        } => Ok(Response::new()
            .add_message(WasmMsg::Migrate {
                contract_addr: proxy.clone(),
                new_code_id,
                msg,
            })
            .add_attribute("action", "upgrade_and_call")
            .add_attribute("proxy", proxy)
            .add_attribute("new_code_id", new_code_id.to_string())),
        ExecuteMsg::TransferOwnership { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            OWNER.save(deps.storage, &new_owner)?;
            Ok(Response::new()
                .add_attribute("action", "transfer_ownership")
                .add_attribute("owner", new_owner))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        }),
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
