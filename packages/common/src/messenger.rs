//! Cross-domain messenger interface.
//!
//! The adapters only need two things from the transport: enqueueing a payload
//! for the counterpart chain, and learning who sent the payload currently being
//! delivered. Delivery is asynchronous and carries no acknowledgement.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdResult, WasmMsg};
use serde::Serialize;

use crate::error::CommonError;

#[cw_serde]
pub enum MessengerExecuteMsg {
    /// Enqueue `message` for delivery to `target` on the other chain.
    SendMessage {
        target: String,
        message: Binary,
        min_gas_limit: u32,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum MessengerQueryMsg {
    /// Origin-chain sender of the message currently being relayed.
    /// Fails outside of a relay.
    #[returns(XDomainMessageSenderResponse)]
    XDomainMessageSender {},
}

#[cw_serde]
pub struct XDomainMessageSenderResponse {
    pub sender: String,
}

/// Build the messenger call that relays `payload` to `target`.
pub fn send_message_msg<T: Serialize>(
    messenger: &Addr,
    target: &str,
    payload: &T,
    min_gas_limit: u32,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: messenger.to_string(),
        msg: to_json_binary(&MessengerExecuteMsg::SendMessage {
            target: target.to_string(),
            message: to_json_binary(payload)?,
            min_gas_limit,
        })?,
        funds: vec![],
    }))
}

/// Reject any inbound call that was not relayed by `messenger` on behalf of
/// `linked_adapter`. This is the only trust anchor between the two chains.
pub fn ensure_linked_sender(
    querier: &QuerierWrapper,
    caller: &Addr,
    messenger: &Addr,
    linked_adapter: &str,
) -> Result<(), CommonError> {
    if caller != messenger {
        return Err(CommonError::NotMessenger {
            caller: caller.to_string(),
        });
    }

    let origin: XDomainMessageSenderResponse =
        querier.query_wasm_smart(messenger, &MessengerQueryMsg::XDomainMessageSender {})?;
    if origin.sender != linked_adapter {
        return Err(CommonError::NotLinkedAdapter {
            sender: origin.sender,
        });
    }

    Ok(())
}
