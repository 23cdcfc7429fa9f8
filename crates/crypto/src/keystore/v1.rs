//! Version 1 keystore documents (decode only)
//!
//! PascalCase fields, scrypt only, AES-128-CBC with the cipher key
//! `keccak256(dk[0..16])[0..16]`.
//!
//! The MAC covers the key header as compact JSON, so [`KeyHeaderV1`] and
//! [`KdfParamsV1`] keep their serialized field order.

use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::cipher::{decrypt_cbc, AES_KEY_LENGTH};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{scrypt_derive_key, validate_dklen, validate_scrypt};
use super::mac::verify_v1_mac;
use crate::secp256k1::{Secp256k1SecretKey, SECRET_KEY_LENGTH};
use secrecy::ExposeSecret;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeystoreV1 {
    #[serde(default)]
    pub address: Option<String>,
    pub crypto: CryptoV1,
    #[serde(default)]
    pub id: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CryptoV1 {
    pub cipher_text: String,
    #[serde(rename = "IV")]
    pub iv: String,
    pub key_header: KeyHeaderV1,
    #[serde(rename = "MAC")]
    pub mac: String,
    pub salt: String,
}

/// Absent fields read as empty or zero and are written back that way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyHeaderV1 {
    #[serde(default)]
    pub version: String,
    pub kdf: String,
    pub kdf_params: KdfParamsV1,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KdfParamsV1 {
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(rename = "R")]
    pub r: u32,
    #[serde(rename = "P")]
    pub p: u32,
    #[serde(rename = "DkLen")]
    pub dklen: u32,
    #[serde(rename = "SaltLen", default)]
    pub salt_len: u32,
}

fn decode_hex(field: &str, value: &str) -> KeystoreResult<Vec<u8>> {
    hex::decode(value).map_err(|e| KeystoreError::HexError(format!("invalid {field} hex: {e}")))
}

impl KeystoreV1 {
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        let keystore: Self = serde_json::from_str(json)?;
        keystore.validate()?;
        Ok(keystore)
    }

    pub fn validate(&self) -> KeystoreResult<()> {
        if self.version != "1" {
            return Err(KeystoreError::UnsupportedVersion(self.version.clone()));
        }
        if self.crypto.key_header.kdf != "scrypt" {
            return Err(KeystoreError::UnsupportedKdf(
                self.crypto.key_header.kdf.clone(),
            ));
        }
        let params = &self.crypto.key_header.kdf_params;
        validate_dklen(params.dklen)?;
        validate_scrypt(params.n, params.r, params.p)
    }

    /// Decrypt the private key
    pub fn decrypt(&self, password: &str) -> KeystoreResult<Secp256k1SecretKey> {
        self.validate()?;

        let crypto = &self.crypto;
        let params = &crypto.key_header.kdf_params;
        let salt = decode_hex("salt", &crypto.salt)?;
        let ciphertext = decode_hex("ciphertext", &crypto.cipher_text)?;
        let mac = decode_hex("mac", &crypto.mac)?;
        let iv = decode_hex("iv", &crypto.iv)?;

        debug!(kdf = "scrypt", n = params.n, r = params.r, p = params.p, "decoding v1 keystore");
        let derived_key = scrypt_derive_key(
            password.as_bytes(),
            &salt,
            params.n,
            params.r,
            params.p,
            params.dklen as usize,
        )?;
        let dk = derived_key.expose_secret();

        let key_header = serde_json::to_vec(&crypto.key_header)?;
        verify_v1_mac(&key_header, dk, &ciphertext, &mac)?;
        trace!("mac verified");

        let cipher_key = keccak256(&dk[..AES_KEY_LENGTH]);
        let plaintext = decrypt_cbc(&ciphertext, &cipher_key[..AES_KEY_LENGTH], &iv)?;
        let bytes = plaintext.expose_secret();

        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeystoreError::InvalidSecretLength {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }

        Ok(Secp256k1SecretKey::from_slice(bytes)?)
    }
}
