//! Secret wrappers built on `secrecy` and `zeroize`

use secrecy::SecretBox;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Variable-length secret bytes, zeroized on drop.
///
/// Used for KDF output (`dk`) and decrypted keystore plaintext.
///
/// ```rust
/// use minter_crypto::secure::SecretBytes;
/// use secrecy::ExposeSecret;
///
/// let dk = SecretBytes::new(Box::new(vec![7u8; 32]));
/// assert_eq!(dk.expose_secret().len(), 32);
/// ```
pub type SecretBytes = SecretBox<Vec<u8>>;

/// Fixed-size secret, e.g. a 64-byte BIP39 seed or a 32-byte private key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretArray<const N: usize> {
    inner: [u8; N],
}

impl<const N: usize> SecretArray<N> {
    /// Wrap the given bytes.
    pub fn new(bytes: [u8; N]) -> Self {
        Self { inner: bytes }
    }

    /// Copy a slice of exactly `N` bytes. Returns `None` on length mismatch.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N {
            return None;
        }
        let mut inner = [0u8; N];
        inner.copy_from_slice(bytes);
        Some(Self { inner })
    }

    /// Borrow the secret bytes. Do not store the reference.
    pub fn expose_secret(&self) -> &[u8; N] {
        &self.inner
    }
}

impl<const N: usize> std::fmt::Debug for SecretArray<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretArray")
            .field("length", &N)
            .field("value", &"[REDACTED]")
            .finish()
    }
}
