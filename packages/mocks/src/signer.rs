//! secp256k1 test key that signs adapter digests.

use common::signature::account_address;
use cosmwasm_std::{Addr, Binary};
use k256::ecdsa::SigningKey;

pub const TEST_PREFIX: &str = "terra";

pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Deterministic key derived from a one-byte seed. The seed must be nonzero.
    pub fn new(seed: u8) -> Self {
        let key = SigningKey::from_slice(&[seed; 32]).expect("seed must produce a valid key");
        Self { key }
    }

    pub fn address(&self) -> Addr {
        let point = self.key.verifying_key().to_encoded_point(true);
        let compressed: [u8; 33] = point
            .as_bytes()
            .try_into()
            .expect("compressed point is 33 bytes");
        Addr::unchecked(account_address(TEST_PREFIX, &compressed).expect("valid prefix"))
    }

    /// 65-byte `r ‖ s ‖ v` signature with `v` in {27, 28}.
    pub fn sign(&self, digest: &[u8; 32]) -> Binary {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("prehash signing");
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte() + 27);
        Binary::from(bytes)
    }
}
