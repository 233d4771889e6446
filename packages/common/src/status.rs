//! Adapter lifecycle.
//!
//! ```text
//!   Active <──> Paused
//!     │           │
//!     │ (home)    │ (remote, on migration trigger)
//!     v           v
//!  Upgrading ──> Deprecated   (terminal)
//! ```
//!
//! The home adapter passes through `Upgrading` while it waits for the remote
//! supply snapshot; the remote adapter jumps straight to `Deprecated` when the
//! migration trigger arrives.

use std::fmt;

use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum AdapterStatus {
    Active,
    Paused,
    Upgrading,
    Deprecated,
}

impl AdapterStatus {
    /// Outbound transfers are only accepted while active.
    pub fn is_active(self) -> bool {
        self == AdapterStatus::Active
    }

    pub fn is_deprecated(self) -> bool {
        self == AdapterStatus::Deprecated
    }

    /// Stop/resume messaging is allowed from either toggle state, so repeating
    /// the same request is harmless.
    pub fn can_toggle_messaging(self) -> bool {
        matches!(self, AdapterStatus::Active | AdapterStatus::Paused)
    }

    /// Migration may start while active, and be resent while still upgrading.
    pub fn can_start_migration(self) -> bool {
        matches!(self, AdapterStatus::Active | AdapterStatus::Upgrading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdapterStatus::Active => "active",
            AdapterStatus::Paused => "paused",
            AdapterStatus::Upgrading => "upgrading",
            AdapterStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
