//! Remote Adapter - Stablecoin Bridge, Remote Chain Side
//!
//! The remote adapter is the minter of the bridged stablecoin. It mints when
//! the home side escrows, and burns when users send tokens back.
//!
//! # Outbound Flow
//! 1. User approves the adapter and calls `SendMessage` (or signs a
//!    `SendMessageWithSignature` that a relayer submits)
//! 2. Tokens are pulled into the adapter and burned, and a `receive_message`
//!    payload is queued on the messenger for the home adapter
//!
//! # Inbound Flow
//! 1. The messenger relays `ReceiveMessage` from the linked home adapter
//! 2. Tokens are minted to the user, or recorded as locked funds when the
//!    token refuses the mint
//!
//! # Migration to Native
//! The home adapter relays `ReceiveMigrateToNative`. The remote adapter
//! snapshots the token supply, gives up its minter role, reports the snapshot
//! with `set_burn_amount` and becomes `Deprecated`. The role caller then takes
//! over token ownership and the proxy admin with `TransferTokenRoles`.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
