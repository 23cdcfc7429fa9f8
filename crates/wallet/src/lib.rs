//! Minter wallet
//!
//! A [`Wallet`] is one secp256k1 key pair, built from a BIP-39 mnemonic, a
//! raw private key, an `xprv` extended key, or a decrypted keystore. It
//! exposes the `Mp`-prefixed public key and `Mx`-prefixed address used on
//! the Minter network, and encrypts its key into V3 keystores.
//!
//! Key derivation and the keystore codec live in `minter-crypto`.

mod error;
mod extended;
mod wallet;

pub use error::{WalletError, WalletResult};
pub use wallet::{Wallet, ADDRESS_PREFIX, PUBLIC_KEY_PREFIX};

pub use minter_crypto::keystore::{EncodeOptions, ErrorKind, Kdf, KeystoreV3};
