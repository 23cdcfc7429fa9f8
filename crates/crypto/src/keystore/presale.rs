//! Ethereum presale wallets (decode only)
//!
//! There is no MAC. The decrypted seed hashes to the private key, and the
//! address of that key must match `ethaddr`.

use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cipher::{decrypt_cbc, AES_KEY_LENGTH, IV_LENGTH};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::pbkdf2_derive_key;
use crate::secp256k1::Secp256k1SecretKey;
use secrecy::ExposeSecret;

/// PBKDF2 rounds of the presale scheme; the password doubles as the salt
pub const PRESALE_PBKDF2_ROUNDS: u32 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresaleWallet {
    /// IV followed by the CBC ciphertext of the seed, hex
    pub encseed: String,
    pub ethaddr: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub btcaddr: Option<String>,
}

impl PresaleWallet {
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decrypt the private key, checking it against `ethaddr`
    pub fn decrypt(&self, password: &str) -> KeystoreResult<Secp256k1SecretKey> {
        let encseed = hex::decode(&self.encseed)
            .map_err(|e| KeystoreError::HexError(format!("invalid encseed hex: {e}")))?;
        if encseed.len() <= IV_LENGTH {
            return Err(KeystoreError::CipherError(format!(
                "encseed must be longer than {IV_LENGTH} bytes, got {}",
                encseed.len()
            )));
        }
        let expected = hex::decode(self.ethaddr.trim_start_matches("0x"))
            .map_err(|e| KeystoreError::HexError(format!("invalid ethaddr hex: {e}")))?;

        debug!(rounds = PRESALE_PBKDF2_ROUNDS, "decoding presale wallet");
        let derived_key = pbkdf2_derive_key(
            password.as_bytes(),
            password.as_bytes(),
            PRESALE_PBKDF2_ROUNDS,
            AES_KEY_LENGTH,
        );

        let (iv, ciphertext) = encseed.split_at(IV_LENGTH);
        let seed = decrypt_cbc(ciphertext, derived_key.expose_secret(), iv)?;

        let key_hash = keccak256(seed.expose_secret());
        // out-of-range scalar reads as a wrong password
        let secret = Secp256k1SecretKey::from_slice(key_hash.as_slice())
            .map_err(|_| KeystoreError::Authentication)?;

        if secret.public_key().address().as_slice() != expected.as_slice() {
            return Err(KeystoreError::Authentication);
        }

        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"encseed": "81ffdfaf2736310ce87df268b53169783e8420b98f3405fb9364b96ac0feebfb62f4cf31e0d25f1ded61f083514dd98c3ce1a14a24d7618fd513b6d97044725c7d2e08a7d9c2061f2c8a05af01f06755c252f04cab20fee2a4778130440a9344", "ethaddr": "22f8c5dd4a0a9d59d580667868df2da9592ab292", "email": "hello@ethereum.org", "btcaddr": "1DHW32MFwHxU2nk2SLAQq55eqFotT9jWcq"}"#;

    #[test]
    fn test_decrypt_sample() {
        let wallet = PresaleWallet::from_json(SAMPLE).unwrap();
        let key = wallet.decrypt("testtest").unwrap();
        assert_eq!(
            hex::encode(key.public_key().address()),
            "22f8c5dd4a0a9d59d580667868df2da9592ab292"
        );
    }

    #[test]
    fn test_wrong_password() {
        let wallet = PresaleWallet::from_json(SAMPLE).unwrap();
        assert!(matches!(
            wallet.decrypt("wrong"),
            Err(KeystoreError::Authentication)
        ));
    }

    #[test]
    fn test_address_mismatch() {
        let mut wallet = PresaleWallet::from_json(SAMPLE).unwrap();
        wallet.ethaddr = "0000000000000000000000000000000000000000".to_string();
        assert!(matches!(
            wallet.decrypt("testtest"),
            Err(KeystoreError::Authentication)
        ));
    }

    #[test]
    fn test_short_encseed() {
        let mut wallet = PresaleWallet::from_json(SAMPLE).unwrap();
        wallet.encseed = "00".repeat(16);
        assert!(matches!(
            wallet.decrypt("testtest"),
            Err(KeystoreError::CipherError(_))
        ));
    }
}
