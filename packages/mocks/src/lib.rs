//! Test collaborators for the bridge adapters.
//!
//! - `messenger` - cross-domain messenger with an outbox and a manual relay
//! - `stablecoin` - CW20 token with blacklist, pause, minter and owner roles
//! - `proxy_admin` - wasm admin of the stablecoin that performs upgrades
//! - `signer` - secp256k1 key producing signatures the adapters accept
//!
//! Each contract module exposes `contract()` for `App::store_code`.

pub mod messenger;
pub mod proxy_admin;
pub mod signer;
pub mod stablecoin;

pub use signer::TestSigner;
