//! Common - Shared Types and Utilities for the Stablecoin Bridge Adapters
//!
//! This package holds everything both adapter contracts agree on:
//! - `status` - the adapter lifecycle (Active, Paused, Upgrading, Deprecated)
//! - `relay` - payloads one adapter sends to its linked counterpart
//! - `messenger` - the cross-domain messenger interface and sender authentication
//! - `token` - the stablecoin capability (CW20 plus admin extensions)
//! - `proxy_admin` - the delegated admin that upgrades the bridged token
//! - `signature` - structured-data digests and signer recovery
//! - `nonces` - replay protection for signed sends
//! - `ledger` - the locked-funds ledger and credit reply settlement

pub mod error;
pub mod ledger;
pub mod messenger;
pub mod nonces;
pub mod proxy_admin;
pub mod relay;
pub mod signature;
pub mod status;
pub mod token;

pub use error::CommonError;
pub use status::AdapterStatus;
