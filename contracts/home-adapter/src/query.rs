//! Query handlers for the home adapter.

use common::ledger::locked_funds;
use common::nonces::is_nonce_used;
use common::signature::{signing_digest, SignedSend};
use cosmwasm_std::{Binary, Deps, Env, StdResult, Uint128};

use crate::msg::{
    ConfigResponse, LockedFundsResponse, MigrationResponse, NonceUsedResponse,
    PendingOwnerResponse, SignatureDigestResponse, StatusResponse,
};
use crate::state::{CONFIG, MIGRATION, PENDING_OWNER, STATUS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token: config.token,
        messenger: config.messenger,
        linked_adapter: config.linked_adapter,
        bounce_min_gas_limit: config.bounce_min_gas_limit,
    })
}

pub fn query_status(deps: Deps) -> StdResult<StatusResponse> {
    Ok(StatusResponse {
        status: STATUS.load(deps.storage)?,
    })
}

pub fn query_locked_funds(deps: Deps, spender: String, user: String) -> StdResult<LockedFundsResponse> {
    let amount = locked_funds(deps.storage, &spender, &user)?;
    Ok(LockedFundsResponse {
        spender,
        user,
        amount,
    })
}

pub fn query_nonce_used(deps: Deps, signer: String, nonce: u64) -> StdResult<NonceUsedResponse> {
    let signer = deps.api.addr_validate(&signer)?;
    let used = is_nonce_used(deps.storage, &signer, nonce)?;
    Ok(NonceUsedResponse {
        signer,
        nonce,
        used,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

pub fn query_signature_digest(
    env: Env,
    to: String,
    amount: Uint128,
    deadline: u64,
    nonce: u64,
    min_gas_limit: u32,
) -> StdResult<SignatureDigestResponse> {
    let digest = signing_digest(
        &env.block.chain_id,
        &env.contract.address,
        &SignedSend {
            to: &to,
            amount,
            deadline,
            nonce,
            min_gas_limit,
        },
    );
    Ok(SignatureDigestResponse {
        digest: Binary::from(digest.to_vec()),
    })
}

pub fn query_migration(deps: Deps) -> StdResult<MigrationResponse> {
    let migration = MIGRATION.load(deps.storage)?;
    Ok(MigrationResponse {
        burn_amount: migration.burn_amount,
        burn_caller: migration.burn_caller,
    })
}
