//! The wallet: one secp256k1 key pair, optionally backed by a mnemonic

use minter_crypto::keystore::{
    EncodeOptions, KeystoreDocument, KeystoreV3, KeystoreV1, PresaleWallet,
};
use minter_crypto::mnemonic::{derive_private_key, Mnemonic};
use minter_crypto::{
    address_from_public, public_from_private, Address, Secp256k1SecretKey, PUBLIC_KEY_LENGTH,
    SECRET_KEY_LENGTH,
};
use once_cell::sync::OnceCell;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::extended::private_key_from_xprv;

/// Prefix of Minter address strings
pub const ADDRESS_PREFIX: &str = "Mx";

/// Prefix of Minter public key strings
pub const PUBLIC_KEY_PREFIX: &str = "Mp";

/// A Minter wallet
///
/// Holds the private key and, when built from one, the mnemonic. The public
/// key and address are derived on first use and cached.
///
/// ```rust
/// use minter_wallet::Wallet;
///
/// let wallet = Wallet::from_mnemonic(
///     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
/// ).unwrap();
/// assert_eq!(
///     wallet.address_string(),
///     "Mx9858effd232b4033e47d90003d41ec34ecaeda94"
/// );
/// ```
pub struct Wallet {
    secret: Secp256k1SecretKey,
    mnemonic: Option<Mnemonic>,
    public_key: OnceCell<[u8; PUBLIC_KEY_LENGTH]>,
    address: OnceCell<Address>,
}

impl Wallet {
    /// Build from exactly one of a private key or a mnemonic phrase
    pub fn new(private_key: Option<&[u8]>, mnemonic: Option<&str>) -> WalletResult<Self> {
        match (private_key, mnemonic) {
            (Some(_), Some(_)) => Err(WalletError::ConflictingSources),
            (Some(key), None) => Self::from_private_key(key),
            (None, Some(phrase)) => Self::from_mnemonic(phrase),
            (None, None) => Err(WalletError::MissingSource),
        }
    }

    /// Derive the account key of a BIP-39 phrase (`m/44'/60'/0'/0/0`)
    ///
    /// The phrase is not normalised: it must be lowercase words separated by
    /// single spaces, and [`mnemonic`](Self::mnemonic) returns it unchanged.
    pub fn from_mnemonic(phrase: &str) -> WalletResult<Self> {
        let mnemonic = Mnemonic::from_phrase(phrase)?;
        let key = derive_private_key(&mnemonic)?;
        let secret = Secp256k1SecretKey::from_bytes(key.expose_secret())?;
        Ok(Self::build(secret, Some(mnemonic)))
    }

    /// Wrap a raw 32-byte private key. The wallet has no mnemonic.
    pub fn from_private_key(private_key: &[u8]) -> WalletResult<Self> {
        let secret = Secp256k1SecretKey::from_slice(private_key)?;
        Ok(Self::build(secret, None))
    }

    /// Import the key of a base58check `xprv...` string
    ///
    /// The chain code is discarded; the wallet has no mnemonic.
    pub fn from_extended_private_key(xprv: &str) -> WalletResult<Self> {
        let key = private_key_from_xprv(xprv)?;
        Self::from_private_key(key.as_slice())
    }

    /// A wallet over a fresh random 12-word mnemonic
    pub fn generate() -> WalletResult<Self> {
        let mnemonic = Mnemonic::generate()?;
        let key = derive_private_key(&mnemonic)?;
        let secret = Secp256k1SecretKey::from_bytes(key.expose_secret())?;
        Ok(Self::build(secret, Some(mnemonic)))
    }

    fn build(secret: Secp256k1SecretKey, mnemonic: Option<Mnemonic>) -> Self {
        let wallet = Self {
            secret,
            mnemonic,
            public_key: OnceCell::new(),
            address: OnceCell::new(),
        };
        debug!(
            address = %wallet.address_string(),
            has_mnemonic = wallet.mnemonic.is_some(),
            "opened wallet"
        );
        wallet
    }

    /// The mnemonic phrase, if the wallet was built from one
    pub fn mnemonic(&self) -> WalletResult<&str> {
        self.mnemonic
            .as_ref()
            .map(Mnemonic::phrase)
            .ok_or(WalletError::NoMnemonic)
    }

    pub fn private_key(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        self.secret.to_bytes()
    }

    /// Lowercase hex, no prefix
    pub fn private_key_string(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(*self.secret.to_bytes()))
    }

    /// 64-byte uncompressed public key (no 0x04 tag)
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.public_key
            .get_or_init(|| public_from_private(&self.secret))
    }

    /// `Mp` followed by the hex public key
    pub fn public_key_string(&self) -> String {
        format!("{PUBLIC_KEY_PREFIX}{}", hex::encode(self.public_key()))
    }

    pub fn address(&self) -> &Address {
        self.address
            .get_or_init(|| address_from_public(self.public_key()))
    }

    /// `Mx` followed by the lowercase hex address
    pub fn address_string(&self) -> String {
        format!("{ADDRESS_PREFIX}{}", hex::encode(self.address()))
    }

    /// Encrypt the private key into a V3 keystore
    pub fn to_v3(&self, password: &str, options: &EncodeOptions) -> WalletResult<KeystoreV3> {
        Ok(KeystoreV3::encrypt(&self.secret, password, options)?)
    }

    /// [`to_v3`](Self::to_v3) serialized as compact JSON
    pub fn to_v3_string(&self, password: &str, options: &EncodeOptions) -> WalletResult<String> {
        Ok(self.to_v3(password, options)?.to_json_string()?)
    }

    /// Decrypt a V3 keystore
    pub fn from_v3(json: &str, password: &str) -> WalletResult<Self> {
        let secret = KeystoreV3::from_json(json)?.decrypt(password)?;
        Ok(Self::build(secret, None))
    }

    /// Decrypt a V1 keystore
    pub fn from_v1(json: &str, password: &str) -> WalletResult<Self> {
        let secret = KeystoreV1::from_json(json)?.decrypt(password)?;
        Ok(Self::build(secret, None))
    }

    /// Decrypt an Ethereum presale wallet
    pub fn from_eth_sale(json: &str, password: &str) -> WalletResult<Self> {
        let secret = PresaleWallet::from_json(json)?.decrypt(password)?;
        Ok(Self::build(secret, None))
    }

    /// Decrypt a keystore of any supported format
    pub fn from_keystore(json: &str, password: &str) -> WalletResult<Self> {
        let secret = KeystoreDocument::parse(json)?.decrypt(password)?;
        Ok(Self::build(secret, None))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address_string())
            .field("private_key", &"[REDACTED]")
            .field("has_mnemonic", &self.mnemonic.is_some())
            .finish()
    }
}
