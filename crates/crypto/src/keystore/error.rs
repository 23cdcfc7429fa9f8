//! Keystore error types

use thiserror::Error;

/// Failure classes callers can branch on without matching every variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input supplied by the caller
    Validation,
    /// Wrong password or tampered document (indistinguishable on purpose)
    Authentication,
    /// Document does not match any recognised keystore shape
    Format,
    /// Operation not available in the current state
    Precondition,
}

/// Errors that can occur during keystore operations
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// MAC mismatch (V3/V1) or address mismatch (presale)
    #[error("key derivation failed - possibly wrong passphrase")]
    Authentication,

    /// JSON shape matches none of V3, V1 or presale
    #[error("unrecognized keystore format: {0}")]
    UnrecognizedFormat(String),

    /// Unsupported keystore version
    #[error("unsupported keystore version: {0}")]
    UnsupportedVersion(String),

    /// Unsupported KDF function
    #[error("unsupported key derivation scheme: {0}")]
    UnsupportedKdf(String),

    /// Unsupported cipher function
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    /// Invalid KDF parameters
    #[error("invalid KDF parameters: {0}")]
    InvalidKdfParams(String),

    /// Invalid cipher parameters
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    KdfError(String),

    /// Encryption/decryption failed
    #[error("cipher operation failed: {0}")]
    CipherError(String),

    /// Invalid secret length
    #[error("invalid secret length: expected {expected}, got {actual}")]
    InvalidSecretLength { expected: usize, actual: usize },

    /// Invalid hex encoding
    #[error("invalid hex encoding: {0}")]
    HexError(String),

    /// Decrypted material is not a usable private key
    #[error("decrypted key is invalid: {0}")]
    InvalidKey(#[from] crate::error::CryptoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl KeystoreError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeystoreError::Authentication => ErrorKind::Authentication,
            KeystoreError::IoError(_) => ErrorKind::Validation,
            _ => ErrorKind::Format,
        }
    }
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
