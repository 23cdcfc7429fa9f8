//! AES-128 ciphers used by the keystore formats
//!
//! V3 documents use AES-128-CTR (no padding, ciphertext length equals
//! plaintext length). V1 and presale wallets use AES-128-CBC with PKCS#7
//! padding and are only ever decrypted.

use aes::Aes128;
use cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

/// IV (initialization vector) length for AES-128
pub const IV_LENGTH: usize = 16;

/// AES-128 key length
pub const AES_KEY_LENGTH: usize = 16;

/// Cipher identifier written into V3 documents
pub const AES_128_CTR: &str = "aes-128-ctr";

type Aes128Ctr = Ctr128BE<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// `cipherparams` of a V3 document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CipherParams {
    /// Initialization vector as hex string
    pub iv: String,
}

impl CipherParams {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            iv: hex::encode(iv),
        }
    }

    /// Decoded IV, checked to be 16 bytes
    pub fn iv(&self) -> KeystoreResult<[u8; IV_LENGTH]> {
        let iv_bytes = hex::decode(&self.iv)
            .map_err(|e| KeystoreError::InvalidCipherParams(format!("invalid IV hex: {}", e)))?;

        iv_bytes.as_slice().try_into().map_err(|_| {
            KeystoreError::InvalidCipherParams(format!(
                "IV must be {} bytes, got {}",
                IV_LENGTH,
                iv_bytes.len()
            ))
        })
    }
}

fn aes_key(derived_key: &[u8]) -> KeystoreResult<[u8; AES_KEY_LENGTH]> {
    if derived_key.len() < AES_KEY_LENGTH {
        return Err(KeystoreError::InvalidCipherParams(format!(
            "encryption key must be at least {} bytes, got {}",
            AES_KEY_LENGTH,
            derived_key.len()
        )));
    }

    derived_key[..AES_KEY_LENGTH]
        .try_into()
        .map_err(|_| KeystoreError::CipherError("key conversion failed".to_string()))
}

fn iv_array(iv: &[u8]) -> KeystoreResult<[u8; IV_LENGTH]> {
    iv.try_into().map_err(|_| {
        KeystoreError::InvalidCipherParams(format!(
            "IV must be {} bytes, got {}",
            IV_LENGTH,
            iv.len()
        ))
    })
}

/// Encrypt secret data using AES-128-CTR
///
/// # Arguments
///
/// * `secret` - The secret data to encrypt
/// * `encryption_key` - Derived key; only the first 16 bytes are used
/// * `iv` - 16-byte initialization vector
pub fn encrypt_secret(secret: &[u8], encryption_key: &[u8], iv: &[u8]) -> KeystoreResult<Vec<u8>> {
    let key = aes_key(encryption_key)?;
    let iv = iv_array(iv)?;

    let mut cipher = Aes128Ctr::new(&key.into(), &iv.into());

    let mut ciphertext = secret.to_vec();
    cipher.apply_keystream(&mut ciphertext);

    Ok(ciphertext)
}

/// Decrypt secret data using AES-128-CTR
pub fn decrypt_secret(
    ciphertext: &[u8],
    decryption_key: &[u8],
    iv: &[u8],
) -> KeystoreResult<SecretBytes> {
    let key = aes_key(decryption_key)?;
    let iv = iv_array(iv)?;

    let mut cipher = Aes128Ctr::new(&key.into(), &iv.into());

    let mut plaintext = ciphertext.to_vec();
    cipher.apply_keystream(&mut plaintext);

    Ok(secrecy::SecretBox::new(Box::new(plaintext)))
}

/// Decrypt AES-128-CBC ciphertext and strip PKCS#7 padding
///
/// A padding failure almost always means the key was derived from the
/// wrong password, so it surfaces as [`KeystoreError::Authentication`].
pub fn decrypt_cbc(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> KeystoreResult<SecretBytes> {
    let key = aes_key(key)?;
    let iv = iv_array(iv)?;

    if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
        return Err(KeystoreError::CipherError(format!(
            "CBC ciphertext must be a non-empty multiple of 16 bytes, got {}",
            ciphertext.len()
        )));
    }

    let plaintext = Aes128CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| KeystoreError::Authentication)?;

    Ok(secrecy::SecretBox::new(Box::new(plaintext)))
}

/// Generate a random IV
pub fn generate_iv() -> [u8; IV_LENGTH] {
    use rand::RngCore;
    let mut iv = [0u8; IV_LENGTH];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}
