//! Replay protection for signed sends.
//!
//! A `(signer, nonce)` pair is consumed either by a successful signed send or
//! by the signer cancelling it. Entries are never removed.

use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::CommonError;

/// Consumed nonces, keyed by (signer, nonce).
pub const USED_NONCES: Map<(&Addr, u64), bool> = Map::new("used_nonces");

pub fn is_nonce_used(storage: &dyn Storage, signer: &Addr, nonce: u64) -> StdResult<bool> {
    Ok(USED_NONCES
        .may_load(storage, (signer, nonce))?
        .unwrap_or(false))
}

pub fn ensure_nonce_unused(storage: &dyn Storage, signer: &Addr, nonce: u64) -> Result<(), CommonError> {
    if is_nonce_used(storage, signer, nonce)? {
        return Err(CommonError::InvalidNonce {
            signer: signer.to_string(),
            nonce,
        });
    }
    Ok(())
}

/// Mark `(signer, nonce)` as used. Fails if it already was.
pub fn use_nonce(storage: &mut dyn Storage, signer: &Addr, nonce: u64) -> Result<(), CommonError> {
    ensure_nonce_unused(storage, signer, nonce)?;
    USED_NONCES.save(storage, (signer, nonce), &true)?;
    Ok(())
}
