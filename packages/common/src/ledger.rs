//! Locked-funds ledger.
//!
//! Inbound credits are dispatched as `reply_always` submessages. When the
//! token rejects a credit the runtime reverts the submessage and the reply
//! handler records the amount here instead of failing the whole relay, so a
//! single blocked recipient can never stall the inbound queue.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{CosmosMsg, Response, StdResult, Storage, SubMsg, SubMsgResult, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::CommonError;

/// Reply id used by both adapters for inbound credits.
pub const CREDIT_REPLY_ID: u64 = 1;

/// Amounts owed, keyed by (spender, user).
pub const LOCKED_FUNDS: Map<(&str, &str), Uint128> = Map::new("locked_funds");

/// Context of the credit currently awaiting its reply.
pub const PENDING_CREDIT: Item<PendingCredit> = Item::new("pending_credit");

#[cw_serde]
pub struct PendingCredit {
    pub spender: String,
    pub user: String,
    pub amount: Uint128,
}

pub fn locked_funds(storage: &dyn Storage, spender: &str, user: &str) -> StdResult<Uint128> {
    Ok(LOCKED_FUNDS
        .may_load(storage, (spender, user))?
        .unwrap_or_default())
}

/// Add `amount` to the entry for (spender, user) and return the new total.
pub fn lock_funds(
    storage: &mut dyn Storage,
    spender: &str,
    user: &str,
    amount: Uint128,
) -> Result<Uint128, CommonError> {
    let current = locked_funds(storage, spender, user)?;
    let total = current
        .checked_add(amount)
        .map_err(|_| CommonError::LockedFundsOverflow { current, amount })?;
    LOCKED_FUNDS.save(storage, (spender, user), &total)?;
    Ok(total)
}

/// Consume the entry for (spender, user). Fails when nothing is owed.
pub fn take_locked_funds(
    storage: &mut dyn Storage,
    spender: &str,
    user: &str,
) -> Result<Uint128, CommonError> {
    let amount = locked_funds(storage, spender, user)?;
    if amount.is_zero() {
        return Err(CommonError::NoLockedFunds {
            spender: spender.to_string(),
            user: user.to_string(),
        });
    }
    LOCKED_FUNDS.remove(storage, (spender, user));
    Ok(amount)
}

/// Wrap a credit so its failure lands in the ledger instead of reverting.
pub fn guarded_credit(
    storage: &mut dyn Storage,
    credit: CosmosMsg,
    spender: &str,
    user: &str,
    amount: Uint128,
) -> StdResult<SubMsg> {
    PENDING_CREDIT.save(
        storage,
        &PendingCredit {
            spender: spender.to_string(),
            user: user.to_string(),
            amount,
        },
    )?;
    Ok(SubMsg::reply_always(credit, CREDIT_REPLY_ID))
}

/// Settle the pending credit once the token has answered.
pub fn settle_pending_credit(
    storage: &mut dyn Storage,
    result: SubMsgResult,
) -> Result<Response, CommonError> {
    let pending = PENDING_CREDIT.load(storage)?;
    PENDING_CREDIT.remove(storage);

    match result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("action", "credit_applied")
            .add_attribute("user", pending.user)
            .add_attribute("amount", pending.amount.to_string())),
        SubMsgResult::Err(reason) => {
            let total = lock_funds(storage, &pending.spender, &pending.user, pending.amount)?;
            Ok(Response::new()
                .add_attribute("action", "funds_locked")
                .add_attribute("spender", pending.spender)
                .add_attribute("user", pending.user)
                .add_attribute("amount", pending.amount.to_string())
                .add_attribute("locked_total", total.to_string())
                .add_attribute("reason", reason))
        }
    }
}
