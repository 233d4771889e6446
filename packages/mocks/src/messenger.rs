//! Mock cross-domain messenger.
//!
//! `send_message` only records the payload in an outbox. Delivery happens when
//! a test calls `relay_message` on the messenger of the destination chain,
//! which exposes the origin sender through `x_domain_message_sender` for the
//! duration of the call.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Order, Reply, Response,
    StdError, StdResult, SubMsg, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Bound, Item, Map};
use thiserror::Error;

pub use common::messenger::XDomainMessageSenderResponse;

const RELAY_REPLY_ID: u64 = 1;
const DEFAULT_LIMIT: u32 = 30;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    SendMessage {
        target: String,
        message: Binary,
        min_gas_limit: u32,
    },
    /// Deliver a message recorded by the counterpart messenger.
    RelayMessage {
        nonce: u64,
        sender: String,
        target: String,
        message: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(XDomainMessageSenderResponse)]
    XDomainMessageSender {},
    #[returns(OutboxResponse)]
    Outbox {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    IsRelayed { nonce: u64 },
}

#[cw_serde]
pub struct SentMessage {
    pub nonce: u64,
    pub sender: String,
    pub target: String,
    pub message: Binary,
    pub min_gas_limit: u32,
}

#[cw_serde]
pub struct OutboxResponse {
    pub messages: Vec<SentMessage>,
}

#[derive(Error, Debug, PartialEq)]
pub enum MessengerError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Message {nonce} already relayed")]
    AlreadyRelayed { nonce: u64 },
}

const NEXT_NONCE: Item<u64> = Item::new("next_nonce");
const OUTBOX: Map<u64, SentMessage> = Map::new("outbox");
const X_DOMAIN_SENDER: Item<String> = Item::new("x_domain_sender");
const RELAYING: Item<u64> = Item::new("relaying");
const RELAYED: Map<u64, bool> = Map::new("relayed");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, MessengerError> {
    NEXT_NONCE.save(deps.storage, &0)?;
    Ok(Response::new().add_attribute("action", "instantiate"))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, MessengerError> {
    match msg {
        ExecuteMsg::SendMessage {
            target,
            message,
            min_gas_limit,
        } => {
            let nonce = NEXT_NONCE.load(deps.storage)?;
            NEXT_NONCE.save(deps.storage, &(nonce + 1))?;
            OUTBOX.save(
                deps.storage,
                nonce,
                &SentMessage {
                    nonce,
                    sender: info.sender.to_string(),
                    target: target.clone(),
                    message,
                    min_gas_limit,
                },
            )?;

            Ok(Response::new()
                .add_attribute("action", "send_message")
                .add_attribute("nonce", nonce.to_string())
                .add_attribute("sender", info.sender)
                .add_attribute("target", target)
                .add_attribute("min_gas_limit", min_gas_limit.to_string()))
        }
        ExecuteMsg::RelayMessage {
            nonce,
            sender,
            target,
            message,
        } => {
            if RELAYED.has(deps.storage, nonce) {
                return Err(MessengerError::AlreadyRelayed { nonce });
            }
            X_DOMAIN_SENDER.save(deps.storage, &sender)?;
            RELAYING.save(deps.storage, &nonce)?;

            let call = WasmMsg::Execute {
                contract_addr: target.clone(),
                msg: message,
                funds: vec![],
            };

            // A failing target reverts the whole relay so tests observe the error.
            Ok(Response::new()
                .add_submessage(SubMsg::reply_on_success(call, RELAY_REPLY_ID))
                .add_attribute("action", "relay_message")
                .add_attribute("nonce", nonce.to_string())
                .add_attribute("sender", sender)
                .add_attribute("target", target))
        }
    }
}

pub fn reply(deps: DepsMut, _env: Env, _msg: Reply) -> Result<Response, MessengerError> {
    let nonce = RELAYING.load(deps.storage)?;
    RELAYING.remove(deps.storage);
    X_DOMAIN_SENDER.remove(deps.storage);
    RELAYED.save(deps.storage, nonce, &true)?;
    Ok(Response::new().add_attribute("relayed", nonce.to_string()))
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::XDomainMessageSender {} => {
            let sender = X_DOMAIN_SENDER
                .may_load(deps.storage)?
                .ok_or_else(|| StdError::generic_err("xDomainMessageSender is not set"))?;
            to_json_binary(&XDomainMessageSenderResponse { sender })
        }
        QueryMsg::Outbox { start_after, limit } => {
            let limit = limit.unwrap_or(DEFAULT_LIMIT) as usize;
            let start = start_after.map(Bound::exclusive);
            let messages = OUTBOX
                .range(deps.storage, start, None, Order::Ascending)
                .take(limit)
                .map(|item| item.map(|(_, msg)| msg))
                .collect::<StdResult<Vec<_>>>()?;
            to_json_binary(&OutboxResponse { messages })
        }
        QueryMsg::IsRelayed { nonce } => to_json_binary(&RELAYED.has(deps.storage, nonce)),
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query).with_reply(reply))
}
