//! Format detection over parsed keystore JSON

use serde_json::Value;
use tracing::debug;

use super::error::{KeystoreError, KeystoreResult};
use super::presale::PresaleWallet;
use super::v1::KeystoreV1;
use super::v3::KeystoreV3;
use crate::secp256k1::Secp256k1SecretKey;

/// Which envelope a JSON document uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystoreFormat {
    V3,
    V1,
    Presale,
}

impl KeystoreFormat {
    /// Classify a parsed document by its fields alone
    ///
    /// - `encseed` present: presale
    /// - `Version == "1"` or `Crypto.KeyHeader` present: V1
    /// - `version == 3`: V3
    pub fn classify(value: &Value) -> KeystoreResult<Self> {
        let Some(object) = value.as_object() else {
            return Err(KeystoreError::UnrecognizedFormat(
                "keystore is not a JSON object".to_string(),
            ));
        };

        if object.contains_key("encseed") {
            return Ok(Self::Presale);
        }

        let v1_version = object.get("Version").and_then(Value::as_str) == Some("1");
        let key_header = object
            .get("Crypto")
            .and_then(|crypto| crypto.get("KeyHeader"))
            .is_some();
        if v1_version || key_header {
            return Ok(Self::V1);
        }

        match object.get("version") {
            Some(v) if v.as_u64() == Some(3) => Ok(Self::V3),
            Some(v) => Err(KeystoreError::UnsupportedVersion(v.to_string())),
            None => Err(KeystoreError::UnrecognizedFormat(
                "no version, KeyHeader or encseed field".to_string(),
            )),
        }
    }
}

/// A keystore in any of the supported formats
#[derive(Debug, Clone, PartialEq)]
pub enum KeystoreDocument {
    V3(KeystoreV3),
    V1(KeystoreV1),
    Presale(PresaleWallet),
}

impl KeystoreDocument {
    /// Parse and classify a JSON document
    pub fn parse(json: &str) -> KeystoreResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let format = KeystoreFormat::classify(&value)?;
        debug!(?format, "detected keystore format");

        let document = match format {
            KeystoreFormat::V3 => {
                let keystore: KeystoreV3 = serde_json::from_value(value)?;
                keystore.validate()?;
                Self::V3(keystore)
            }
            KeystoreFormat::V1 => {
                let keystore: KeystoreV1 = serde_json::from_value(value)?;
                keystore.validate()?;
                Self::V1(keystore)
            }
            KeystoreFormat::Presale => Self::Presale(serde_json::from_value(value)?),
        };
        Ok(document)
    }

    pub fn format(&self) -> KeystoreFormat {
        match self {
            Self::V3(_) => KeystoreFormat::V3,
            Self::V1(_) => KeystoreFormat::V1,
            Self::Presale(_) => KeystoreFormat::Presale,
        }
    }

    /// Decrypt with the password, whatever the format
    pub fn decrypt(&self, password: &str) -> KeystoreResult<Secp256k1SecretKey> {
        match self {
            Self::V3(keystore) => keystore.decrypt(password),
            Self::V1(keystore) => keystore.decrypt(password),
            Self::Presale(wallet) => wallet.decrypt(password),
        }
    }
}
