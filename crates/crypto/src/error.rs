//! Cryptographic error types

use thiserror::Error;

/// secp256k1 key errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key is zero, not below the group order, or not 32 bytes
    #[error("private key does not satisfy the curve requirements (ie. it is invalid)")]
    InvalidSecretKey,

    /// Public key bytes do not encode a curve point
    #[error("invalid public key bytes")]
    InvalidPublicKey,
}
