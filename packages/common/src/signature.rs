//! Structured-data signatures for signed sends.
//!
//! A signer authorizes an adapter to move their tokens across the bridge by
//! signing a typed message scoped to that adapter instance:
//!
//! ```text
//! domain  = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256(version)
//!                     ‖ keccak256(chain_id) ‖ keccak256(adapter))
//! struct  = keccak256(SEND_MESSAGE_TYPEHASH ‖ keccak256(to) ‖ amount
//!                     ‖ deadline ‖ nonce ‖ min_gas_limit)
//! digest  = keccak256(0x19 ‖ 0x01 ‖ domain ‖ struct)
//! ```
//!
//! Integers are big-endian and left-padded to 32 bytes. The signature is the
//! 65-byte `r ‖ s ‖ v` form; the signer is recovered from it and rendered as a
//! bech32 account address using the prefix of the claimed signer.

use bech32::{ToBase32, Variant};
use cosmwasm_std::{Addr, Api, Uint128};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::error::CommonError;

pub const SIGNING_DOMAIN_NAME: &str = "StablecoinBridgeAdapter";
pub const SIGNING_DOMAIN_VERSION: &str = "1";

const DOMAIN_TYPE: &[u8] =
    b"AdapterDomain(string name,string version,string chainId,string verifyingContract)";
const SEND_MESSAGE_TYPE: &[u8] =
    b"SendMessage(string to,uint256 amount,uint256 deadline,uint256 nonce,uint32 minGasLimit)";

/// Fields covered by a signed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSend<'a> {
    pub to: &'a str,
    pub amount: Uint128,
    pub deadline: u64,
    pub nonce: u64,
    pub min_gas_limit: u32,
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

fn word_u128(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn domain_separator(chain_id: &str, adapter: &Addr) -> [u8; 32] {
    let mut data = [0u8; 160];
    data[0..32].copy_from_slice(&keccak256(DOMAIN_TYPE));
    data[32..64].copy_from_slice(&keccak256(SIGNING_DOMAIN_NAME.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(SIGNING_DOMAIN_VERSION.as_bytes()));
    data[96..128].copy_from_slice(&keccak256(chain_id.as_bytes()));
    data[128..160].copy_from_slice(&keccak256(adapter.as_bytes()));
    keccak256(&data)
}

pub fn struct_hash(send: &SignedSend) -> [u8; 32] {
    let mut data = [0u8; 192];
    data[0..32].copy_from_slice(&keccak256(SEND_MESSAGE_TYPE));
    data[32..64].copy_from_slice(&keccak256(send.to.as_bytes()));
    data[64..96].copy_from_slice(&word_u128(send.amount.u128()));
    data[96..128].copy_from_slice(&word_u128(send.deadline as u128));
    data[128..160].copy_from_slice(&word_u128(send.nonce as u128));
    data[160..192].copy_from_slice(&word_u128(send.min_gas_limit as u128));
    keccak256(&data)
}

/// The 32-byte digest a signer signs for `send` on the adapter at `adapter`.
pub fn signing_digest(chain_id: &str, adapter: &Addr, send: &SignedSend) -> [u8; 32] {
    let mut data = [0u8; 66];
    data[0] = 0x19;
    data[1] = 0x01;
    data[2..34].copy_from_slice(&domain_separator(chain_id, adapter));
    data[34..66].copy_from_slice(&struct_hash(send));
    keccak256(&data)
}

/// Compress a SEC1 public key. Already-compressed keys are returned as is.
pub fn compress_pubkey(pubkey: &[u8]) -> Result<[u8; 33], CommonError> {
    let mut compressed = [0u8; 33];
    match pubkey.len() {
        33 if pubkey[0] == 0x02 || pubkey[0] == 0x03 => {
            compressed.copy_from_slice(pubkey);
        }
        65 if pubkey[0] == 0x04 => {
            compressed[0] = 0x02 | (pubkey[64] & 0x01);
            compressed[1..].copy_from_slice(&pubkey[1..33]);
        }
        _ => return Err(CommonError::InvalidSignature),
    }
    Ok(compressed)
}

/// Account address of a secp256k1 key: bech32(prefix, ripemd160(sha256(pubkey))).
pub fn account_address(prefix: &str, compressed_pubkey: &[u8; 33]) -> Result<String, CommonError> {
    let sha = Sha256::digest(compressed_pubkey);
    let hash = Ripemd160::digest(sha);
    bech32::encode(prefix, hash.as_slice().to_base32(), Variant::Bech32)
        .map_err(|_| CommonError::InvalidSignature)
}

fn address_prefix(address: &str) -> Result<String, CommonError> {
    let (hrp, _data, _variant) =
        bech32::decode(address).map_err(|_| CommonError::InvalidSignature)?;
    Ok(hrp)
}

/// Recover the account that produced `signature` over `digest`.
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
    prefix: &str,
) -> Result<String, CommonError> {
    if signature.len() != 65 {
        return Err(CommonError::InvalidSignature);
    }
    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(CommonError::InvalidSignature),
    };

    let pubkey = api
        .secp256k1_recover_pubkey(digest, &signature[..64], recovery_param)
        .map_err(|_| CommonError::InvalidSignature)?;
    account_address(prefix, &compress_pubkey(&pubkey)?)
}

/// Fail with `InvalidSignature` unless `signature` over `digest` recovers to `signer`.
pub fn verify_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
    signer: &Addr,
) -> Result<(), CommonError> {
    let prefix = address_prefix(signer.as_str())?;
    let recovered = recover_signer(api, digest, signature, &prefix)?;
    if recovered != signer.as_str() {
        return Err(CommonError::InvalidSignature);
    }
    Ok(())
}
