//! Execute handlers for the remote adapter.
//!
//! - `messaging` - outbound burns, relayed mints, locked-funds recovery
//! - `signature` - signed sends and nonce cancellation
//! - `admin` - relayed messaging control, linking and ownership transfer
//! - `migration` - migration trigger and token role handover
//! - `token` - owner passthrough to the token and its proxy admin

mod admin;
mod messaging;
mod migration;
mod signature;
mod token;

pub use admin::*;
pub use messaging::*;
pub use migration::*;
pub use signature::*;
pub use token::*;
