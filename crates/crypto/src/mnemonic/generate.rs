//! Mnemonic phrase generation and parsing

use super::error::{MnemonicError, MnemonicResult};
use crate::secure::SecretArray;
use bip39::Mnemonic as Bip39Mnemonic;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

/// Word count used by [`Mnemonic::generate`]
pub const DEFAULT_WORD_COUNT: usize = 12;

/// BIP-39 mnemonic phrase wrapper
///
/// Construction always validates the wordlist and checksum, so holding a
/// `Mnemonic` means the phrase is usable for seed derivation.
///
/// The phrase is kept in a `SecretString` and never shows up in `Debug` output.
///
/// ```rust
/// use minter_crypto::mnemonic::Mnemonic;
///
/// let mnemonic = Mnemonic::generate().unwrap();
/// assert_eq!(mnemonic.word_count(), 12);
///
/// let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
/// let imported = Mnemonic::from_phrase(phrase).unwrap();
/// assert_eq!(imported.phrase(), phrase);
/// ```
pub struct Mnemonic {
    inner: Bip39Mnemonic,
    phrase: SecretString,
}

impl Mnemonic {
    /// Generate a new random 12-word (128-bit entropy) mnemonic
    pub fn generate() -> MnemonicResult<Self> {
        Self::generate_with_word_count(DEFAULT_WORD_COUNT)
    }

    /// Generate a mnemonic with a specific word count (12, 15, 18, 21 or 24)
    pub fn generate_with_word_count(word_count: usize) -> MnemonicResult<Self> {
        let entropy_bytes = word_count_to_entropy_bytes(word_count)?;

        let mut entropy = vec![0u8; entropy_bytes];
        rand::thread_rng().fill_bytes(&mut entropy);

        let mnemonic = Bip39Mnemonic::from_entropy(&entropy);
        entropy.zeroize();

        Ok(Self::wrap(mnemonic?))
    }

    /// Import a mnemonic from an existing phrase
    ///
    /// The phrase is checked exactly as given: lowercase English words
    /// separated by single spaces. Fails with `MnemonicError::InvalidPhrase`
    /// on unknown words, a non-standard word count, a bad checksum, or any
    /// other spelling of an otherwise valid phrase.
    pub fn from_phrase(phrase: &str) -> MnemonicResult<Self> {
        let mnemonic = Self::wrap(Bip39Mnemonic::parse_normalized(phrase)?);
        if mnemonic.phrase() != phrase {
            return Err(MnemonicError::InvalidPhrase(
                "words must be separated by single spaces".to_string(),
            ));
        }
        Ok(mnemonic)
    }

    fn wrap(inner: Bip39Mnemonic) -> Self {
        let phrase = inner.to_string();
        Self {
            inner,
            phrase: phrase.into(),
        }
    }

    /// The canonical phrase: words separated by single spaces
    pub fn phrase(&self) -> &str {
        self.phrase.expose_secret()
    }

    /// Number of words in the mnemonic
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// BIP-39 seed with the empty passphrase
    pub fn to_seed(&self) -> SecretArray<64> {
        SecretArray::new(self.inner.to_seed(""))
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

fn word_count_to_entropy_bytes(word_count: usize) -> MnemonicResult<usize> {
    match word_count {
        12 => Ok(16),
        15 => Ok(20),
        18 => Ok(24),
        21 => Ok(28),
        24 => Ok(32),
        _ => Err(MnemonicError::InvalidWordCount(word_count)),
    }
}
