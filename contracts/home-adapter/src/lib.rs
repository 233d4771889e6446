//! Home Adapter - Stablecoin Bridge, Home Chain Side
//!
//! The home adapter holds the native stablecoin in escrow while it is bridged
//! and releases it when the remote side sends it back.
//!
//! # Outbound Flow
//! 1. User approves the adapter and calls `SendMessage` (or signs a
//!    `SendMessageWithSignature` that a relayer submits)
//! 2. Tokens move into the adapter and a `receive_message` payload is queued
//!    on the messenger for the remote adapter
//!
//! # Inbound Flow
//! 1. The messenger relays `ReceiveMessage` from the linked remote adapter
//! 2. Tokens are released to the user, or recorded as locked funds when the
//!    token refuses the transfer
//!
//! # Migration to Native
//! `MigrateToNative` -> remote `receive_migrate_to_native` -> `SetBurnAmount`
//! -> `BurnLockedTokens`. Both adapters end up `Deprecated`.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
