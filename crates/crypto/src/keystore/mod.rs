//! Encrypted keystore codec
//!
//! Encodes a secp256k1 private key into a password-protected V3 JSON
//! document and decodes V3, V1 and Ethereum presale documents.
//!
//! - Key derivation: scrypt or PBKDF2-HMAC-SHA256 producing a 32-byte `dk`
//! - Encryption: AES-128-CTR keyed with `dk[0..16]` (V1 and presale use CBC)
//! - Integrity: `keccak256(dk[16..32] || ciphertext)`, checked before decryption
//!
//! # Example
//!
//! ```rust,no_run
//! use minter_crypto::keystore::{EncodeOptions, KeystoreDocument, KeystoreV3};
//! use minter_crypto::Secp256k1SecretKey;
//!
//! let key = Secp256k1SecretKey::generate(&mut rand::thread_rng());
//! let keystore = KeystoreV3::encrypt(&key, "my-strong-passphrase", &EncodeOptions::default())?;
//! keystore.save("./keys/UTC--wallet.json")?;
//!
//! let json = keystore.to_json_string()?;
//! let decrypted = KeystoreDocument::parse(&json)?.decrypt("my-strong-passphrase")?;
//! # Ok::<(), minter_crypto::keystore::KeystoreError>(())
//! ```

mod cipher;
mod document;
mod error;
mod kdf;
mod mac;
mod options;
mod presale;
mod v1;
mod v3;

pub use cipher::{decrypt_cbc, decrypt_secret, encrypt_secret, CipherParams};
pub use document::{KeystoreDocument, KeystoreFormat};
pub use error::{ErrorKind, KeystoreError, KeystoreResult};
pub use kdf::{pbkdf2_derive_key, scrypt_derive_key, Kdf, KdfParams};
pub use mac::{compute_mac, verify_mac};
pub use options::EncodeOptions;
pub use presale::PresaleWallet;
pub use v1::KeystoreV1;
pub use v3::{CryptoV3, KeystoreV3};
