use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

/// Errors raised by the shared helpers. Each adapter wraps these in its own
/// `ContractError` so callers see one error type per contract.
#[derive(Error, Debug, PartialEq)]
pub enum CommonError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Cross-domain authentication
    // ========================================================================

    #[error("Unauthorized: caller {caller} is not the messenger")]
    NotMessenger { caller: String },

    #[error("Unauthorized: cross-domain sender {sender} is not the linked adapter")]
    NotLinkedAdapter { sender: String },

    // ========================================================================
    // Signatures & nonces
    // ========================================================================

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid nonce: nonce {nonce} already used by {signer}")]
    InvalidNonce { signer: String, nonce: u64 },

    // ========================================================================
    // Locked funds
    // ========================================================================

    #[error("No locked funds for spender {spender} and user {user}")]
    NoLockedFunds { spender: String, user: String },

    #[error("Locked funds overflow: {current} + {amount}")]
    LockedFundsOverflow { current: Uint128, amount: Uint128 },

    // ========================================================================
    // Token passthrough
    // ========================================================================

    #[error("Malformed token call: {reason}")]
    MalformedTokenCall { reason: String },
}
