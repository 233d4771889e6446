//! State definitions for the home adapter
//!
//! Locked funds and used nonces live in the shared `common::ledger` and
//! `common::nonces` maps; this module holds everything specific to the home
//! side.

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
    /// Administrative principal (pause/resume, migration, linking)
    pub owner: Addr,
    /// Native stablecoin escrowed by this adapter
    pub token: Addr,
    /// Local end of the cross-domain messenger
    pub messenger: Addr,
    /// Remote adapter address; the only accepted origin of relayed calls
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

/// Home side of the migration to native issuance
#[cw_serde]
#[derive(Default)]
pub struct Migration {
    /// Remote supply snapshot still to be burned
    pub burn_amount: Uint128,
    /// Principal allowed to trigger the burn
    pub burn_caller: Option<Addr>,
}

// ============================================================================
// Storage
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:home-adapter";

/// Contract version
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATUS: Item<AdapterStatus> = Item::new("status");

/// Proposed owner awaiting acceptance
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

pub const MIGRATION: Item<Migration> = Item::new("migration");
