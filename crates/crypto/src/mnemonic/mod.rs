//! BIP-39 mnemonics and BIP-44 key derivation
//!
//! A Minter account key is derived from a mnemonic in two steps:
//!
//! ```text
//! mnemonic --(BIP-39, empty passphrase)--> 64-byte seed
//! seed     --(BIP-32, m/44'/60'/0'/0/0)--> 32-byte private key
//! ```
//!
//! The path is fixed: one account per mnemonic.
//!
//! # Example
//!
//! ```rust
//! use minter_crypto::mnemonic::{derive_private_key, Mnemonic};
//!
//! let mnemonic = Mnemonic::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
//! ).unwrap();
//! let key = derive_private_key(&mnemonic).unwrap();
//! assert_eq!(key.expose_secret().len(), 32);
//! ```

mod derive;
mod error;
mod generate;

pub use derive::{derive_private_key, hd_key_from_seed, seed_from_mnemonic, DEFAULT_DERIVATION_PATH};
pub use error::{MnemonicError, MnemonicResult};
pub use generate::{Mnemonic, DEFAULT_WORD_COUNT};
