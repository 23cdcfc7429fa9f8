//! Seed and HD key derivation from mnemonic phrases

use std::str::FromStr;

use bip32::{DerivationPath, XPrv};
use tracing::debug;

use super::error::{MnemonicError, MnemonicResult};
use super::generate::Mnemonic;
use crate::secure::SecretArray;

/// BIP-44 path of the single account managed per mnemonic
///
/// purpose 44', coin type 60', account 0', external chain 0, index 0
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// BIP-39 master seed from a validated mnemonic (empty passphrase).
pub fn seed_from_mnemonic(mnemonic: &Mnemonic) -> SecretArray<64> {
    mnemonic.to_seed()
}

/// Walk [`DEFAULT_DERIVATION_PATH`] from a 64-byte master seed and return
/// the private key at the leaf.
///
/// Intermediate extended keys are dropped as soon as the next child exists.
pub fn hd_key_from_seed(seed: &[u8; 64]) -> MnemonicResult<SecretArray<32>> {
    let path = DerivationPath::from_str(DEFAULT_DERIVATION_PATH)
        .map_err(|e| MnemonicError::DerivationFailed(format!("invalid path: {e}")))?;

    let mut node = XPrv::new(seed)?;
    for child in path {
        node = node.derive_child(child)?;
    }

    debug!(path = DEFAULT_DERIVATION_PATH, "derived account key");
    Ok(SecretArray::new(node.private_key().to_bytes().into()))
}

/// Mnemonic -> seed -> account private key.
pub fn derive_private_key(mnemonic: &Mnemonic) -> MnemonicResult<SecretArray<32>> {
    let seed = seed_from_mnemonic(mnemonic);
    hd_key_from_seed(seed.expose_secret())
}
