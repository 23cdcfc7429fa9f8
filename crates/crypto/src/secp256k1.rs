//! Secp256k1 key pair derivation for Minter accounts
//!
//! This module provides:
//! - Private key validation (non-zero scalar below the group order)
//! - Uncompressed public key derivation (64 bytes, SEC1 tag stripped)
//! - Address derivation (keccak256(uncompressed_pubkey[1..])[12..])
//!
//! Uses the k256 crate for secp256k1 curve operations.

use crate::error::CryptoError;
use alloy_primitives::{keccak256, Address};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey as K256SecretKey};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Private key length in bytes
pub const SECRET_KEY_LENGTH: usize = 32;

/// Uncompressed public key length without the 0x04 SEC1 tag
pub const PUBLIC_KEY_LENGTH: usize = 64;

/// Address length in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Secp256k1 secret key (32 bytes scalar)
///
/// Zeroized on drop by k256.
#[derive(Clone)]
pub struct Secp256k1SecretKey(K256SecretKey);

impl Secp256k1SecretKey {
    /// Generate a new random secret key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(K256SecretKey::random(rng))
    }

    /// Load from raw bytes (32 bytes scalar)
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, CryptoError> {
        K256SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Load from an arbitrary slice, rejecting anything but a valid 32-byte scalar
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: &[u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::InvalidSecretKey)?;
        Self::from_bytes(arr)
    }

    /// Serialize to bytes (32 bytes scalar)
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(self.0.public_key())
    }
}

impl std::fmt::Debug for Secp256k1SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::PublicKey);

impl Secp256k1PublicKey {
    /// Load from the 64-byte uncompressed form (no 0x04 prefix)
    pub fn from_raw_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, CryptoError> {
        let mut sec1 = [0u8; PUBLIC_KEY_LENGTH + 1];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(bytes);
        k256::PublicKey::from_sec1_bytes(&sec1)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn to_uncompressed_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH + 1] {
        let encoded = self.0.to_encoded_point(false);
        let mut result = [0u8; PUBLIC_KEY_LENGTH + 1];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Serialize to the 64-byte uncompressed form used on chain (0x04 prefix stripped)
    pub fn to_raw_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let uncompressed = self.to_uncompressed_bytes();
        let mut result = [0u8; PUBLIC_KEY_LENGTH];
        result.copy_from_slice(&uncompressed[1..]);
        result
    }

    /// Derive the account address from this public key
    pub fn address(&self) -> Address {
        address_from_public(&self.to_raw_bytes())
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_raw_bytes();
        write!(f, "Secp256k1PublicKey({})", hex::encode(&bytes[..8]))
    }
}

/// Derive the 64-byte uncompressed public key for a private key.
pub fn public_from_private(secret: &Secp256k1SecretKey) -> [u8; PUBLIC_KEY_LENGTH] {
    secret.public_key().to_raw_bytes()
}

/// Derive the 20-byte address of a 64-byte uncompressed public key.
///
/// keccak256(pubkey)[12..]. One-way: there is no inverse.
pub fn address_from_public(public: &[u8; PUBLIC_KEY_LENGTH]) -> Address {
    let hash = keccak256(public);
    Address::from_slice(&hash[32 - ADDRESS_LENGTH..])
}
