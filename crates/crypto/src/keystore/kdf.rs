//! Key Derivation Function (KDF) implementation
//!
//! Both KDFs produce the 32-byte `dk` that the cipher and MAC split:
//! `dk[0..16]` is the AES-128 key, `dk[16..32]` feeds the MAC.
//!
//! Default costs are N=262144 (2^18) for scrypt and c=262144 for PBKDF2.

use pbkdf2::pbkdf2_hmac;
use salsa20::{
    cipher::{generic_array::GenericArray, typenum::U4, StreamCipherCore},
    SalsaCore,
};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, trace};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

pub const SCRYPT_N: u32 = 262144; // 2^18
pub const SCRYPT_R: u32 = 1;
pub const SCRYPT_P: u32 = 8;
pub const PBKDF2_C: u32 = 262144;
pub const DKLEN: u32 = 32;

/// Only PRF accepted for PBKDF2 keystores
pub const PBKDF2_PRF: &str = "hmac-sha256";

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// Largest scrypt `n` a document may request
pub const MAX_SCRYPT_N: u32 = 1 << 24;

/// Largest scrypt `p` a document may request
pub const MAX_SCRYPT_P: u32 = 16;

/// Ceiling on the ROMix state, `128 * n * r` bytes
pub const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

/// Largest PBKDF2 iteration count a document may request
pub const MAX_PBKDF2_C: u32 = 1 << 22;

/// Largest derived key length
pub const MAX_DKLEN: u32 = 64;

/// Supported key derivation functions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Kdf {
    Pbkdf2,
    #[default]
    Scrypt,
}

impl Kdf {
    /// Name as written into the `kdf` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Kdf::Pbkdf2 => "pbkdf2",
            Kdf::Scrypt => "scrypt",
        }
    }

    /// Parse the `kdf` field of a document
    pub fn from_name(name: &str) -> KeystoreResult<Self> {
        match name {
            "pbkdf2" => Ok(Kdf::Pbkdf2),
            "scrypt" => Ok(Kdf::Scrypt),
            other => Err(KeystoreError::UnsupportedKdf(other.to_string())),
        }
    }
}

impl std::fmt::Display for Kdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `kdfparams` of a V3 document.
///
/// Field order is the serialized order and part of the document contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum KdfParams {
    Pbkdf2 {
        dklen: u32,
        /// Salt as hex string
        salt: String,
        /// Iteration count
        c: u32,
        prf: String,
    },
    Scrypt {
        dklen: u32,
        /// Salt as hex string
        salt: String,
        /// CPU/memory cost parameter (must be power of 2)
        n: u32,
        /// Block size parameter
        r: u32,
        /// Parallelization parameter
        p: u32,
    },
}

impl KdfParams {
    /// PBKDF2-HMAC-SHA256 parameters
    pub fn pbkdf2(salt: &[u8], c: u32, dklen: u32) -> Self {
        KdfParams::Pbkdf2 {
            dklen,
            salt: hex::encode(salt),
            c,
            prf: PBKDF2_PRF.to_string(),
        }
    }

    /// scrypt parameters
    pub fn scrypt(salt: &[u8], n: u32, r: u32, p: u32, dklen: u32) -> Self {
        KdfParams::Scrypt {
            dklen,
            salt: hex::encode(salt),
            n,
            r,
            p,
        }
    }

    /// Which KDF these parameters belong to
    pub fn kdf(&self) -> Kdf {
        match self {
            KdfParams::Pbkdf2 { .. } => Kdf::Pbkdf2,
            KdfParams::Scrypt { .. } => Kdf::Scrypt,
        }
    }

    pub fn dklen(&self) -> u32 {
        match self {
            KdfParams::Pbkdf2 { dklen, .. } | KdfParams::Scrypt { dklen, .. } => *dklen,
        }
    }

    /// Salt bytes
    pub fn salt(&self) -> KeystoreResult<Vec<u8>> {
        let salt = match self {
            KdfParams::Pbkdf2 { salt, .. } | KdfParams::Scrypt { salt, .. } => salt,
        };
        hex::decode(salt).map_err(|e| KeystoreError::HexError(format!("invalid salt hex: {e}")))
    }

    /// Validate the parameters
    pub fn validate(&self) -> KeystoreResult<()> {
        validate_dklen(self.dklen())?;
        self.salt()?;

        match self {
            KdfParams::Pbkdf2 { c, prf, .. } => {
                if prf != PBKDF2_PRF {
                    return Err(KeystoreError::InvalidKdfParams(format!(
                        "unsupported parameters to PBKDF2: prf {prf}"
                    )));
                }
                if *c == 0 || *c > MAX_PBKDF2_C {
                    return Err(KeystoreError::InvalidKdfParams(format!(
                        "c must be between 1 and {MAX_PBKDF2_C}"
                    )));
                }
            }
            KdfParams::Scrypt { n, r, p, .. } => validate_scrypt(*n, *r, *p)?,
        }
        Ok(())
    }

    /// Derive `dk` from the password using these parameters
    pub fn derive_key(&self, password: &str) -> KeystoreResult<SecretBytes> {
        self.validate()?;
        let salt = self.salt()?;
        let dklen = self.dklen() as usize;

        match self {
            KdfParams::Pbkdf2 { c, .. } => {
                debug!(kdf = "pbkdf2", c, dklen, "deriving key");
                Ok(pbkdf2_derive_key(password.as_bytes(), &salt, *c, dklen))
            }
            KdfParams::Scrypt { n, r, p, .. } => {
                debug!(kdf = "scrypt", n, r, p, dklen, "deriving key");
                scrypt_derive_key(password.as_bytes(), &salt, *n, *r, *p, dklen)
            }
        }
    }
}

/// `dk` is split into a 16-byte cipher key and a 16-byte MAC key
pub(crate) fn validate_dklen(dklen: u32) -> KeystoreResult<()> {
    if !(32..=MAX_DKLEN).contains(&dklen) {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "dklen must be between 32 and {MAX_DKLEN}"
        )));
    }
    Ok(())
}

/// Shape and cost bounds of scrypt parameters
pub(crate) fn validate_scrypt(n: u32, r: u32, p: u32) -> KeystoreResult<()> {
    if n < 2 || !n.is_power_of_two() {
        return Err(KeystoreError::InvalidKdfParams(
            "n must be a power of 2 greater than 1".to_string(),
        ));
    }
    if n > MAX_SCRYPT_N {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "n must not exceed {MAX_SCRYPT_N}"
        )));
    }
    if r == 0 || p == 0 {
        return Err(KeystoreError::InvalidKdfParams(
            "r and p must be positive".to_string(),
        ));
    }
    if p > MAX_SCRYPT_P {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "p must not exceed {MAX_SCRYPT_P}"
        )));
    }
    if 128 * n as u64 * r as u64 > MAX_SCRYPT_MEMORY {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "128 * n * r must not exceed {MAX_SCRYPT_MEMORY} bytes"
        )));
    }
    Ok(())
}

/// Derive a key using PBKDF2-HMAC-SHA256
pub fn pbkdf2_derive_key(password: &[u8], salt: &[u8], rounds: u32, dklen: usize) -> SecretBytes {
    let mut output = vec![0u8; dklen];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut output);
    secrecy::SecretBox::new(Box::new(output))
}

/// Derive a key using scrypt
///
/// # Arguments
///
/// * `password` - User password bytes
/// * `salt` - Salt bytes
/// * `n` - CPU/memory cost parameter (must be power of 2)
/// * `r` - Block size parameter
/// * `p` - Parallelization parameter
/// * `dklen` - Desired key length in bytes
///
/// Parameter sets with `n >= 2^(16 * r)` are refused by the `scrypt` crate
/// (RFC 7914 bound) but are common in legacy keystores (`n=2^18, r=1`).
/// Those are computed by [`legacy_scrypt`] instead.
pub fn scrypt_derive_key(
    password: &[u8],
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    dklen: usize,
) -> KeystoreResult<SecretBytes> {
    validate_scrypt(n, r, p)?;
    let log_n = n.trailing_zeros() as u8;

    let mut output = vec![0u8; dklen];
    match scrypt::Params::new(log_n, r, p, dklen) {
        Ok(params) => {
            scrypt::scrypt(password, salt, &params, &mut output)
                .map_err(|e| KeystoreError::KdfError(e.to_string()))?;
        }
        Err(_) if log_n as u64 >= 16 * r as u64 => {
            trace!(n, r, "scrypt parameters outside RFC 7914 bound, using legacy path");
            legacy_scrypt(password, salt, n as usize, r as usize, p as usize, &mut output);
        }
        Err(e) => return Err(KeystoreError::InvalidKdfParams(e.to_string())),
    }

    Ok(secrecy::SecretBox::new(Box::new(output)))
}

/// scrypt without the `n < 2^(16 * r)` restriction.
///
/// PBKDF2-HMAC-SHA256 expands the password into `p` blocks of `128 * r`
/// bytes, each block goes through ROMix (Salsa20/8 BlockMix), and a second
/// single-round PBKDF2 compresses the result into `output`.
fn legacy_scrypt(password: &[u8], salt: &[u8], n: usize, r: usize, p: usize, output: &mut [u8]) {
    let block_len = 128 * r;

    let mut b = vec![0u8; p * block_len];
    pbkdf2_hmac::<Sha256>(password, salt, 1, &mut b);

    let mut v = vec![0u8; n * block_len];
    let mut t = vec![0u8; block_len];
    for chunk in b.chunks_mut(block_len) {
        ro_mix(chunk, &mut v, &mut t, n);
    }

    pbkdf2_hmac::<Sha256>(password, &b, 1, output);
}

fn ro_mix(b: &mut [u8], v: &mut [u8], t: &mut [u8], n: usize) {
    let len = b.len();

    for chunk in v.chunks_mut(len) {
        chunk.copy_from_slice(b);
        block_mix(chunk, b);
    }

    for _ in 0..n {
        let j = integerify(b, n);
        xor(b, &v[j * len..(j + 1) * len], t);
        block_mix(t, b);
    }
}

fn block_mix(input: &[u8], output: &mut [u8]) {
    let mut x = [0u8; 64];
    x.copy_from_slice(&input[input.len() - 64..]);

    let mut t = [0u8; 64];
    let half = input.len() / 2;
    for (i, chunk) in input.chunks(64).enumerate() {
        xor(&x, chunk, &mut t);

        let mut state = [0u32; 16];
        for (word, bytes) in state.iter_mut().zip(t.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        SalsaCore::<U4>::from_raw_state(state)
            .write_keystream_block(GenericArray::from_mut_slice(&mut x));

        // even blocks to the first half, odd blocks to the second
        let pos = if i % 2 == 0 {
            (i / 2) * 64
        } else {
            (i / 2) * 64 + half
        };
        output[pos..pos + 64].copy_from_slice(&x);
    }
}

fn integerify(x: &[u8], n: usize) -> usize {
    let start = x.len() - 64;
    let word = u32::from_le_bytes([x[start], x[start + 1], x[start + 2], x[start + 3]]);
    (word as usize) & (n - 1)
}

fn xor(a: &[u8], b: &[u8], out: &mut [u8]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}

/// Generate a random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
