//! Cross-chain payloads exchanged by the linked adapters.
//!
//! Each payload is JSON-encoded and delivered by the messenger as an execute
//! message on the counterpart contract. The variant names here mirror the
//! counterpart's `ExecuteMsg`, so the relayed bytes deserialize directly there.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Payloads the home adapter sends to the remote adapter.
#[cw_serde]
pub enum RemoteRelayMsg {
    /// Mint `amount` to `user`; `spender` is the depositor on the home chain.
    ReceiveMessage {
        user: String,
        spender: String,
        amount: Uint128,
    },
    /// Pause outbound transfers on the remote side.
    ReceiveStopMessaging {},
    /// Resume outbound transfers on the remote side.
    ReceiveResumeMessaging {},
    /// Start the remote half of the migration to native issuance.
    ReceiveMigrateToNative {
        role_caller: String,
        set_burn_amount_min_gas_limit: u32,
    },
}

/// Payloads the remote adapter sends to the home adapter.
#[cw_serde]
pub enum HomeRelayMsg {
    /// Release `amount` to `user`; `spender` is the depositor on the remote chain.
    ReceiveMessage {
        user: String,
        spender: String,
        amount: Uint128,
    },
    /// Remote supply snapshot that finalizes the home side of the migration.
    SetBurnAmount { amount: Uint128 },
}

impl RemoteRelayMsg {
    pub fn receive_message(user: impl Into<String>, spender: impl Into<String>, amount: Uint128) -> Self {
        RemoteRelayMsg::ReceiveMessage {
            user: user.into(),
            spender: spender.into(),
            amount,
        }
    }
}

impl HomeRelayMsg {
    pub fn receive_message(user: impl Into<String>, spender: impl Into<String>, amount: Uint128) -> Self {
        HomeRelayMsg::ReceiveMessage {
            user: user.into(),
            spender: spender.into(),
            amount,
        }
    }
}
