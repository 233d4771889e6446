//! Signed sends.

use common::nonces::{ensure_nonce_unused, use_nonce};
use common::signature::{signing_digest, verify_signer, SignedSend};
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::messaging::{ensure_sendable, outbound_transfer};
use crate::state::CONFIG;

/// Burn from `signer` on the strength of an off-chain signature.
#[allow(clippy::too_many_arguments)]
pub fn execute_send_message_with_signature(
    deps: DepsMut,
    env: Env,
    signer: String,
    to: String,
    amount: Uint128,
    signature: Binary,
    nonce: u64,
    deadline: u64,
    min_gas_limit: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let signer = deps.api.addr_validate(&signer)?;

    ensure_sendable(deps.as_ref(), &config, &to, amount)?;
    ensure_nonce_unused(deps.storage, &signer, nonce)?;

    let now = env.block.time.seconds();
    if now > deadline {
        return Err(ContractError::SignatureExpired { deadline, now });
    }

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
    verify_signer(deps.api, &digest, signature.as_slice(), &signer)?;

    use_nonce(deps.storage, &signer, nonce)?;

    Ok(outbound_transfer(&env, &config, &signer, to, amount, min_gas_limit)?
        .add_attribute("signer", signer.as_str())
        .add_attribute("nonce", nonce.to_string()))
}

pub fn execute_cancel_signature(
    deps: DepsMut,
    info: MessageInfo,
    nonce: u64,
) -> Result<Response, ContractError> {
    use_nonce(deps.storage, &info.sender, nonce)?;

    Ok(Response::new()
        .add_attribute("action", "cancel_signature")
        .add_attribute("signer", info.sender)
        .add_attribute("nonce", nonce.to_string()))
}
