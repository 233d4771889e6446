//! Message types for the remote adapter

use common::AdapterStatus;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address (token passthrough, linking)
    pub owner: String,
    /// Bridged stablecoin contract. The adapter must be configured as its minter.
    pub token: String,
    /// Local cross-domain messenger contract
    pub messenger: String,
    /// Proxy admin holding the token's wasm admin rights. Ownership must be
    /// handed to this adapter for upgrades and role transfer to work.
    pub proxy_admin: String,
    /// Home adapter address, if already known. Can be set once later through
    /// `SetLinkedAdapter`.
    pub linked_adapter: Option<String>,
    /// Execution budget used when bouncing messages back while deprecated
    pub bounce_min_gas_limit: u32,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Messaging
    // ========================================================================
    /// Burn `amount` from the caller and credit `to` on the home chain.
    /// The caller must have granted the adapter a CW20 allowance.
    SendMessage {
        to: String,
        amount: Uint128,
        min_gas_limit: u32,
    },

    /// Same as `SendMessage`, debiting `signer` who authorized the transfer
    /// off-chain. Anyone may submit it.
    SendMessageWithSignature {
        signer: String,
        to: String,
        amount: Uint128,
        /// 65-byte `r ‖ s ‖ v` signature over the `SignatureDigest` query result
        signature: Binary,
        nonce: u64,
        /// Unix seconds; the signature is valid up to and including this time
        deadline: u64,
        min_gas_limit: u32,
    },

    /// Burn a nonce of the caller so an outstanding signature can never be used
    CancelSignature { nonce: u64 },

    /// Relayed from the home adapter: mint `amount` to `user`
    ReceiveMessage {
        user: String,
        spender: String,
        amount: Uint128,
    },

    /// Retry a credit that previously failed. Callable by anyone.
    WithdrawLockedFunds { spender: String, user: String },

    // ========================================================================
    // Messaging Control (relayed from the home adapter)
    // ========================================================================
    ReceiveStopMessaging {},

    ReceiveResumeMessaging {},

    // ========================================================================
    // Migration to Native
    // ========================================================================
    /// Relayed from the home adapter: snapshot the supply, give up the minter
    /// role and report the snapshot back.
    ReceiveMigrateToNative {
        role_caller: String,
        set_burn_amount_min_gas_limit: u32,
    },

    /// Hand token ownership and the proxy admin to `new_owner` (role caller only)
    TransferTokenRoles { new_owner: String },

    /// Forward a raw token execute message (owner only). Ownership and admin
    /// transfers are refused; upgrades go through the proxy admin.
    CallTokenTransaction { msg: Binary },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Set the home adapter address. Owner only, allowed once.
    SetLinkedAdapter { linked_adapter: String },

    /// Propose a new owner
    TransferOwnership { new_owner: String },

    /// Accept a pending ownership transfer (pending owner only)
    AcceptOwnership {},

    /// Drop a pending ownership transfer
    CancelOwnershipTransfer {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatusResponse)]
    Status {},

    #[returns(LockedFundsResponse)]
    LockedFunds { spender: String, user: String },

    #[returns(NonceUsedResponse)]
    NonceUsed { signer: String, nonce: u64 },

    #[returns(PendingOwnerResponse)]
    PendingOwner {},

    /// Digest a signer must sign for `SendMessageWithSignature` on this adapter
    #[returns(SignatureDigestResponse)]
    SignatureDigest {
        to: String,
        amount: Uint128,
        deadline: u64,
        nonce: u64,
        min_gas_limit: u32,
    },

    #[returns(MigrationResponse)]
    Migration {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token: Addr,
    pub messenger: Addr,
    pub proxy_admin: Addr,
    pub linked_adapter: Option<String>,
    pub bounce_min_gas_limit: u32,
}

#[cw_serde]
pub struct StatusResponse {
    pub status: AdapterStatus,
}

#[cw_serde]
pub struct LockedFundsResponse {
    pub spender: String,
    pub user: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct NonceUsedResponse {
    pub signer: Addr,
    pub nonce: u64,
    pub used: bool,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct SignatureDigestResponse {
    pub digest: Binary,
}

#[cw_serde]
pub struct MigrationResponse {
    pub role_caller: Option<Addr>,
    pub burn_amount: Uint128,
}
