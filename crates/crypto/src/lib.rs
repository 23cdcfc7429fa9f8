//! Cryptographic core of the Minter wallet
//!
//! This crate provides:
//! - BIP-39 mnemonics and BIP-44 derivation of the account key (`m/44'/60'/0'/0/0`)
//! - secp256k1 public key and address derivation
//! - The keystore codec: V3 encode/decode, V1 and presale decode
//! - Zeroizing wrappers for secret material

pub mod error;
pub mod keystore;
pub mod mnemonic;
pub mod secp256k1;
pub mod secure;

// Secp256k1 exports
pub use secp256k1::{
    address_from_public, public_from_private, Secp256k1PublicKey, Secp256k1SecretKey,
    ADDRESS_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};

// Error exports
pub use error::CryptoError;

// Secure memory exports
pub use secrecy::ExposeSecret;
pub use secure::{SecretArray, SecretBytes};

// Keystore exports
pub use keystore::{EncodeOptions, Kdf, KeystoreDocument, KeystoreError, KeystoreFormat, KeystoreV3};

// Mnemonic exports
pub use mnemonic::{
    derive_private_key, hd_key_from_seed, seed_from_mnemonic, Mnemonic, MnemonicError,
    DEFAULT_DERIVATION_PATH,
};

// Re-exported so callers can name addresses without another dependency
pub use alloy_primitives::Address;
