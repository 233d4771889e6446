//! Error types for the remote adapter

use common::{AdapterStatus, CommonError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Common(#[from] CommonError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending ownership transfer")]
    NoPendingOwner,

    #[error("Unauthorized: only the role caller can take over the token roles")]
    NotRoleCaller,

    // ========================================================================
    // Status Errors
    // ========================================================================

    #[error("Messaging disabled: adapter is {status}")]
    MessagingDisabled { status: AdapterStatus },

    #[error("Adapter is deprecated")]
    AdapterDeprecated,

    // ========================================================================
    // Linked Adapter Errors
    // ========================================================================

    #[error("Linked adapter not set")]
    LinkedAdapterNotSet,

    #[error("Linked adapter already set to {linked_adapter}")]
    LinkedAdapterAlreadySet { linked_adapter: String },

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Invalid recipient: recipient must not be empty")]
    InvalidRecipient,

    #[error("Recipient {address} is blacklisted")]
    RecipientBlacklisted { address: String },

    #[error("Invalid amount: amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Signature expired: deadline {deadline} is before block time {now}")]
    SignatureExpired { deadline: u64, now: u64 },

    // ========================================================================
    // Token Passthrough Errors
    // ========================================================================

    #[error("Forbidden token call: {selector}")]
    ForbiddenTokenCall { selector: String },

    // ========================================================================
    // Reply Errors
    // ========================================================================

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
