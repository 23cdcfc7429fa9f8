//! Wallet error types

use minter_crypto::keystore::{ErrorKind, KeystoreError};
use minter_crypto::{CryptoError, MnemonicError};
use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors that can occur while building or using a [`Wallet`](crate::Wallet)
#[derive(Debug, Error)]
pub enum WalletError {
    /// Both a private key and a mnemonic were supplied
    #[error("cannot supply both a private key and a mnemonic phrase")]
    ConflictingSources,

    /// Neither a private key nor a mnemonic was supplied
    #[error("either a private key or a mnemonic phrase is required")]
    MissingSource,

    #[error(transparent)]
    InvalidPrivateKey(#[from] CryptoError),

    #[error(transparent)]
    InvalidMnemonic(#[from] MnemonicError),

    /// Not a base58check `xprv` private extended key
    #[error("invalid extended private key: {0}")]
    InvalidExtendedKey(String),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    /// The wallet was built from a raw private key
    #[error("this is a private key only wallet")]
    NoMnemonic,
}

impl WalletError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::ConflictingSources
            | WalletError::MissingSource
            | WalletError::InvalidPrivateKey(_)
            | WalletError::InvalidMnemonic(_)
            | WalletError::InvalidExtendedKey(_) => ErrorKind::Validation,
            WalletError::Keystore(err) => err.kind(),
            WalletError::NoMnemonic => ErrorKind::Precondition,
        }
    }
}
