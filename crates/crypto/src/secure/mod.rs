//! Zeroizing containers for key material
//!
//! Private keys, derived KDF output and decrypted plaintext all pass through
//! these types so that:
//! - memory is zeroed on drop via `zeroize`
//! - `Debug` output shows `[REDACTED]`
//! - nothing is cloned by accident (no `Clone` impls)

mod secret;

pub use secret::{SecretArray, SecretBytes};
