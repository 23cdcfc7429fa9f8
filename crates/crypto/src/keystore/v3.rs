//! Version 3 keystore documents
//!
//! ```text
//! {"version":3,"id":"<uuid>","address":"<40 hex>",
//!  "Crypto":{"ciphertext","cipherparams":{"iv"},"cipher":"aes-128-ctr",
//!            "kdf","kdfparams":{...},"mac"}}
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::cipher::{decrypt_secret, encrypt_secret, CipherParams, AES_128_CTR};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{Kdf, KdfParams};
use super::mac::{compute_mac, verify_mac};
use super::options::EncodeOptions;
use crate::secp256k1::{Secp256k1SecretKey, SECRET_KEY_LENGTH};
use crate::secure::SecretBytes;
use secrecy::ExposeSecret;

/// Keystore document version handled here
pub const KEYSTORE_VERSION: u32 = 3;

/// A version 3 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeystoreV3 {
    pub version: u32,
    pub id: String,
    /// Lowercase hex, no `0x`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Crypto", alias = "crypto")]
    pub crypto: CryptoV3,
}

/// The `Crypto` block of a V3 document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoV3 {
    /// Hex ciphertext
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub cipher: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    /// Hex keccak256 MAC
    pub mac: String,
}

impl KeystoreV3 {
    /// Encrypt a private key with the given password
    pub fn encrypt(
        secret: &Secp256k1SecretKey,
        password: &str,
        options: &EncodeOptions,
    ) -> KeystoreResult<Self> {
        let kdfparams = options.kdf_params();
        let iv = options.iv_or_random();

        let derived_key = kdfparams.derive_key(password)?;
        let dk = derived_key.expose_secret();

        let ciphertext = encrypt_secret(secret.to_bytes().as_slice(), dk, &iv)?;
        let mac = compute_mac(dk, &ciphertext)?;

        let address = secret.public_key().address();
        debug!(kdf = %kdfparams.kdf(), address = %address, "encrypted keystore");

        Ok(Self {
            version: KEYSTORE_VERSION,
            id: options.document_id().to_string(),
            address: Some(hex::encode(address)),
            crypto: CryptoV3 {
                ciphertext: hex::encode(&ciphertext),
                cipherparams: CipherParams::new(&iv),
                cipher: AES_128_CTR.to_string(),
                kdf: kdfparams.kdf().as_str().to_string(),
                kdfparams,
                mac: hex::encode(mac),
            },
        })
    }

    /// Check the document shape before any key derivation
    pub fn validate(&self) -> KeystoreResult<()> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version.to_string()));
        }

        let kdf = Kdf::from_name(&self.crypto.kdf)?;
        if kdf != self.crypto.kdfparams.kdf() {
            return Err(KeystoreError::InvalidKdfParams(format!(
                "kdfparams do not match kdf {kdf}"
            )));
        }
        self.crypto.kdfparams.validate()?;

        if self.crypto.cipher != AES_128_CTR {
            return Err(KeystoreError::UnsupportedCipher(self.crypto.cipher.clone()));
        }
        self.crypto.cipherparams.iv()?;

        Ok(())
    }

    /// Decrypt the stored plaintext
    ///
    /// The MAC is verified before decryption. Any mismatch is reported as
    /// [`KeystoreError::Authentication`].
    pub fn decrypt_bytes(&self, password: &str) -> KeystoreResult<SecretBytes> {
        self.validate()?;

        let ciphertext = hex::decode(&self.crypto.ciphertext)
            .map_err(|e| KeystoreError::HexError(format!("invalid ciphertext hex: {e}")))?;
        let mac = hex::decode(&self.crypto.mac)
            .map_err(|e| KeystoreError::HexError(format!("invalid mac hex: {e}")))?;
        let iv = self.crypto.cipherparams.iv()?;

        let derived_key = self.crypto.kdfparams.derive_key(password)?;
        let dk = derived_key.expose_secret();

        verify_mac(dk, &ciphertext, &mac)?;
        trace!("mac verified");

        decrypt_secret(&ciphertext, dk, &iv)
    }

    /// Decrypt and validate the private key
    pub fn decrypt(&self, password: &str) -> KeystoreResult<Secp256k1SecretKey> {
        let plaintext = self.decrypt_bytes(password)?;
        let bytes = plaintext.expose_secret();

        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeystoreError::InvalidSecretLength {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }

        Ok(Secp256k1SecretKey::from_slice(bytes)?)
    }

    /// Parse a V3 document
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        let keystore: Self = serde_json::from_str(json)?;
        keystore.validate()?;
        Ok(keystore)
    }

    /// Compact JSON in the canonical field order
    pub fn to_json_string(&self) -> KeystoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Save keystore to file
    ///
    /// On Unix the file is created with mode 0600.
    pub fn save(&self, path: impl AsRef<Path>) -> KeystoreResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(json.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, json)?;
        }

        debug!(path = %path.display(), "saved keystore");
        Ok(())
    }

    /// Load keystore from file
    pub fn load(path: impl AsRef<Path>) -> KeystoreResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Conventional file name: `UTC--<timestamp>--<address>`
    ///
    /// Colons in the timestamp are replaced with dashes so the name is valid
    /// on every filesystem.
    pub fn file_name(&self, at: DateTime<Utc>) -> String {
        let timestamp = at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace(':', "-");
        format!(
            "UTC--{}--{}",
            timestamp,
            self.address.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_key() -> Secp256k1SecretKey {
        Secp256k1SecretKey::from_slice(&[0x42; 32]).unwrap()
    }

    fn fast_opts() -> EncodeOptions {
        EncodeOptions::default().scrypt_params(1024, 8, 1)
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key();
        let keystore = KeystoreV3::encrypt(&key, "correct horse", &fast_opts()).unwrap();

        assert_eq!(keystore.version, 3);
        assert_eq!(keystore.crypto.kdf, "scrypt");
        assert_eq!(keystore.crypto.cipher, "aes-128-ctr");

        let decrypted = keystore.decrypt("correct horse").unwrap();
        assert_eq!(*decrypted.to_bytes(), *key.to_bytes());
    }

    #[test]
    fn test_pbkdf2_roundtrip() {
        let key = test_key();
        let opts = EncodeOptions::default().kdf(Kdf::Pbkdf2).c(1000);
        let keystore = KeystoreV3::encrypt(&key, "pw", &opts).unwrap();

        assert_eq!(keystore.crypto.kdf, "pbkdf2");
        let decrypted = keystore.decrypt("pw").unwrap();
        assert_eq!(*decrypted.to_bytes(), *key.to_bytes());
    }

    #[test]
    fn test_wrong_password() {
        let keystore = KeystoreV3::encrypt(&test_key(), "right", &fast_opts()).unwrap();
        let result = keystore.decrypt("wrong");
        assert!(matches!(result, Err(KeystoreError::Authentication)));
    }

    #[test]
    fn test_tampered_ciphertext() {
        let mut keystore = KeystoreV3::encrypt(&test_key(), "pw", &fast_opts()).unwrap();

        let mut ciphertext = hex::decode(&keystore.crypto.ciphertext).unwrap();
        ciphertext[0] ^= 0x01;
        keystore.crypto.ciphertext = hex::encode(ciphertext);

        assert!(matches!(
            keystore.decrypt("pw"),
            Err(KeystoreError::Authentication)
        ));
    }

    #[test]
    fn test_address_matches_key() {
        let key = test_key();
        let keystore = KeystoreV3::encrypt(&key, "pw", &fast_opts()).unwrap();
        assert_eq!(
            keystore.address.as_deref().unwrap(),
            hex::encode(key.public_key().address())
        );
    }

    #[test]
    fn test_deterministic_with_overrides() {
        let opts = fast_opts().salt([1; 32]).iv([2; 16]).uuid([3; 16]);
        let a = KeystoreV3::encrypt(&test_key(), "pw", &opts).unwrap();
        let b = KeystoreV3::encrypt(&test_key(), "pw", &opts).unwrap();
        assert_eq!(a.to_json_string().unwrap(), b.to_json_string().unwrap());
    }

    #[test]
    fn test_serialized_field_order() {
        let opts = fast_opts().salt([1; 32]).iv([2; 16]).uuid([3; 16]);
        let json = KeystoreV3::encrypt(&test_key(), "pw", &opts)
            .unwrap()
            .to_json_string()
            .unwrap();

        let order = [
            "\"version\":3",
            "\"id\"",
            "\"address\"",
            "\"Crypto\"",
            "\"ciphertext\"",
            "\"cipherparams\"",
            "\"cipher\":",
            "\"kdf\":",
            "\"kdfparams\"",
            "\"mac\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_lowercase_crypto_and_missing_address_accepted() {
        let keystore = KeystoreV3::encrypt(&test_key(), "pw", &fast_opts()).unwrap();
        let json = keystore
            .to_json_string()
            .unwrap()
            .replace("\"Crypto\"", "\"crypto\"");
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("address");

        let parsed = KeystoreV3::from_json(&value.to_string()).unwrap();
        assert!(parsed.address.is_none());
        assert!(parsed.decrypt("pw").is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let keystore = KeystoreV3::encrypt(&test_key(), "pw", &fast_opts()).unwrap();

        let mut wrong_version = keystore.clone();
        wrong_version.version = 2;
        assert!(matches!(
            wrong_version.decrypt("pw"),
            Err(KeystoreError::UnsupportedVersion(_))
        ));

        let mut wrong_cipher = keystore.clone();
        wrong_cipher.crypto.cipher = "aes-128-cbc".to_string();
        assert!(matches!(
            wrong_cipher.decrypt("pw"),
            Err(KeystoreError::UnsupportedCipher(_))
        ));

        let mut wrong_kdf = keystore.clone();
        wrong_kdf.crypto.kdf = "argon2".to_string();
        assert!(matches!(
            wrong_kdf.decrypt("pw"),
            Err(KeystoreError::UnsupportedKdf(_))
        ));

        let mut mismatched = keystore;
        mismatched.crypto.kdf = "pbkdf2".to_string();
        assert!(matches!(
            mismatched.decrypt("pw"),
            Err(KeystoreError::InvalidKdfParams(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("keystore.json");

        let keystore = KeystoreV3::encrypt(&test_key(), "pw", &fast_opts()).unwrap();
        keystore.save(&path).unwrap();

        let loaded = KeystoreV3::load(&path).unwrap();
        assert_eq!(keystore, loaded);
        assert_eq!(*loaded.decrypt("pw").unwrap().to_bytes(), [0x42; 32]);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keystore.json");

        KeystoreV3::encrypt(&test_key(), "pw", &fast_opts())
            .unwrap()
            .save(&path)
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_name() {
        let keystore = KeystoreV3::encrypt(&test_key(), "pw", &fast_opts()).unwrap();
        let at = Utc.with_ymd_and_hms(2017, 6, 14, 9, 30, 5).unwrap();

        assert_eq!(
            keystore.file_name(at),
            format!(
                "UTC--2017-06-14T09-30-05.000Z--{}",
                keystore.address.as_deref().unwrap()
            )
        );
    }
}
