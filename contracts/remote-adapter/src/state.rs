//! State definitions for the remote adapter

use common::AdapterStatus;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Administrative principal (token passthrough, linking)
    pub owner: Addr,
    /// Bridged stablecoin; this adapter is its minter until the migration
    pub token: Addr,
    /// Local end of the cross-domain messenger
    pub messenger: Addr,
    /// Holder of the token's wasm admin rights, owned by this adapter
    pub proxy_admin: Addr,
    /// Home adapter address; the only accepted origin of relayed calls
    pub linked_adapter: Option<String>,
    /// Execution budget for messages bounced back while deprecated
    pub bounce_min_gas_limit: u32,
}

impl Config {
    pub fn linked_adapter(&self) -> Result<&str, ContractError> {
        self.linked_adapter
            .as_deref()
            .ok_or(ContractError::LinkedAdapterNotSet)
    }
}

/// Remote side of the migration to native issuance
#[cw_serde]
#[derive(Default)]
pub struct Migration {
    /// Principal allowed to take over the token roles
    pub role_caller: Option<Addr>,
    /// Token supply at the time the migration trigger arrived
    pub burn_amount: Uint128,
}

// ============================================================================
// Storage
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:remote-adapter";

/// Contract version
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATUS: Item<AdapterStatus> = Item::new("status");

/// Proposed owner awaiting acceptance
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

pub const MIGRATION: Item<Migration> = Item::new("migration");
