//! Keystore MAC
//!
//! `mac = keccak256(dk[16..32] || ciphertext)`. It is checked before any
//! decryption so a wrong password never produces plaintext.
//!
//! V1 documents also authenticate their key header:
//! `mac = keccak256(key_header_json || dk[16..32] || ciphertext)`.

use alloy_primitives::keccak256;
use subtle::ConstantTimeEq;

use super::error::{KeystoreError, KeystoreResult};

/// Length of the MAC key slice of `dk`
pub const MAC_KEY_LENGTH: usize = 16;

/// Compute the MAC over the ciphertext
pub fn compute_mac(derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<[u8; 32]> {
    keyed_hash(&[], derived_key, ciphertext)
}

/// Compute the V1 MAC over the serialized key header and the ciphertext
pub fn compute_v1_mac(
    key_header: &[u8],
    derived_key: &[u8],
    ciphertext: &[u8],
) -> KeystoreResult<[u8; 32]> {
    keyed_hash(key_header, derived_key, ciphertext)
}

fn keyed_hash(prefix: &[u8], derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<[u8; 32]> {
    if derived_key.len() < 2 * MAC_KEY_LENGTH {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "derived key must be at least 32 bytes, got {}",
            derived_key.len()
        )));
    }

    let mut preimage = Vec::with_capacity(prefix.len() + MAC_KEY_LENGTH + ciphertext.len());
    preimage.extend_from_slice(prefix);
    preimage.extend_from_slice(&derived_key[MAC_KEY_LENGTH..2 * MAC_KEY_LENGTH]);
    preimage.extend_from_slice(ciphertext);

    Ok(keccak256(&preimage).0)
}

/// Compare the stored MAC against the recomputed one in constant time
pub fn verify_mac(derived_key: &[u8], ciphertext: &[u8], expected: &[u8]) -> KeystoreResult<()> {
    check(&compute_mac(derived_key, ciphertext)?, expected)
}

/// [`verify_mac`] for V1 documents
pub fn verify_v1_mac(
    key_header: &[u8],
    derived_key: &[u8],
    ciphertext: &[u8],
    expected: &[u8],
) -> KeystoreResult<()> {
    check(&compute_v1_mac(key_header, derived_key, ciphertext)?, expected)
}

fn check(computed: &[u8; 32], expected: &[u8]) -> KeystoreResult<()> {
    if bool::from(computed.as_slice().ct_eq(expected)) {
        Ok(())
    } else {
        Err(KeystoreError::Authentication)
    }
}
