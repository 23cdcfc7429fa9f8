//! V3 encoding options
//!
//! Loadable from any serde format. Missing fields fall back to the defaults
//! below; `salt`, `iv` and `uuid` are only meant for deterministic output
//! and are generated randomly when absent.

use serde::{Deserialize, Serialize};

use super::cipher::{generate_iv, IV_LENGTH};
use super::kdf::{generate_salt, Kdf, KdfParams, DKLEN, PBKDF2_C, SALT_LENGTH, SCRYPT_N, SCRYPT_P, SCRYPT_R};

/// Length of the random bytes behind a v4 UUID
pub const UUID_LENGTH: usize = 16;

/// Configuration for [`KeystoreV3::encrypt`](super::KeystoreV3::encrypt)
///
/// ```rust
/// use minter_crypto::keystore::{EncodeOptions, Kdf};
///
/// let opts = EncodeOptions::default().kdf(Kdf::Pbkdf2).c(1024);
/// assert_eq!(opts.kdf, Kdf::Pbkdf2);
///
/// let parsed: EncodeOptions = serde_json::from_str(r#"{"kdf":"scrypt","n":1024}"#).unwrap();
/// assert_eq!(parsed.n, 1024);
/// assert_eq!(parsed.p, 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncodeOptions {
    pub kdf: Kdf,
    pub dklen: u32,
    /// PBKDF2 iteration count
    pub c: u32,
    /// scrypt cost
    pub n: u32,
    pub r: u32,
    pub p: u32,
    #[serde(with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub salt: Option<[u8; SALT_LENGTH]>,
    #[serde(with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub iv: Option<[u8; IV_LENGTH]>,
    /// Random bytes of the document UUID
    #[serde(with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<[u8; UUID_LENGTH]>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            kdf: Kdf::default(),
            dklen: DKLEN,
            c: PBKDF2_C,
            n: SCRYPT_N,
            r: SCRYPT_R,
            p: SCRYPT_P,
            salt: None,
            iv: None,
            uuid: None,
        }
    }
}

impl EncodeOptions {
    pub fn kdf(mut self, kdf: Kdf) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn dklen(mut self, dklen: u32) -> Self {
        self.dklen = dklen;
        self
    }

    /// PBKDF2 iteration count
    pub fn c(mut self, c: u32) -> Self {
        self.c = c;
        self
    }

    /// scrypt `n`, `r` and `p`
    pub fn scrypt_params(mut self, n: u32, r: u32, p: u32) -> Self {
        self.n = n;
        self.r = r;
        self.p = p;
        self
    }

    pub fn salt(mut self, salt: [u8; SALT_LENGTH]) -> Self {
        self.salt = Some(salt);
        self
    }

    pub fn iv(mut self, iv: [u8; IV_LENGTH]) -> Self {
        self.iv = Some(iv);
        self
    }

    pub fn uuid(mut self, uuid: [u8; UUID_LENGTH]) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// KDF parameters for a single encode, generating a salt if none is set
    pub(crate) fn kdf_params(&self) -> KdfParams {
        let salt = self.salt.unwrap_or_else(generate_salt);
        match self.kdf {
            Kdf::Pbkdf2 => KdfParams::pbkdf2(&salt, self.c, self.dklen),
            Kdf::Scrypt => KdfParams::scrypt(&salt, self.n, self.r, self.p, self.dklen),
        }
    }

    pub(crate) fn iv_or_random(&self) -> [u8; IV_LENGTH] {
        self.iv.unwrap_or_else(generate_iv)
    }

    /// Document id: a v4 UUID over the supplied or freshly drawn bytes
    pub(crate) fn document_id(&self) -> uuid::Uuid {
        match self.uuid {
            Some(bytes) => uuid::Builder::from_random_bytes(bytes).into_uuid(),
            None => uuid::Uuid::new_v4(),
        }
    }
}

mod hex_opt {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(value: &Option<[u8; N]>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => s.serialize_str(&hex::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, const N: usize>(d: D) -> Result<Option<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        let bytes = hex::decode(text.trim_start_matches("0x")).map_err(D::Error::custom)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected {N} bytes, got {len}")))
    }
}
