//! Execute handlers for the home adapter.
//!
//! - `messaging` - outbound sends, relayed credits, locked-funds recovery
//! - `signature` - signed sends and nonce cancellation
//! - `admin` - messaging control, linking and ownership transfer
//! - `migration` - migration to native issuance

mod admin;
mod messaging;
mod migration;
mod signature;

pub use admin::*;
pub use messaging::*;
pub use migration::*;
pub use signature::*;
