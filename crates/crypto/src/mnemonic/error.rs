//! Error types for mnemonic operations

use thiserror::Error;

/// Result type for mnemonic operations
pub type MnemonicResult<T> = Result<T, MnemonicError>;

/// Errors that can occur during mnemonic operations
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// Unknown word, bad word count or failed checksum
    #[error("invalid mnemonic phrase: {0}")]
    InvalidPhrase(String),

    /// Unsupported word count requested for generation
    #[error("invalid word count: {0} (must be 12, 15, 18, 21, or 24)")]
    InvalidWordCount(usize),

    /// The HD primitive rejected the seed or a child index
    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

impl From<bip39::Error> for MnemonicError {
    fn from(err: bip39::Error) -> Self {
        MnemonicError::InvalidPhrase(err.to_string())
    }
}

impl From<bip32::Error> for MnemonicError {
    fn from(err: bip32::Error) -> Self {
        MnemonicError::DerivationFailed(err.to_string())
    }
}
