//! BIP-32 extended private key (`xprv...`) import

use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};

/// Serialized extended key payload length (without the checksum)
const PAYLOAD_LENGTH: usize = 78;

/// Offset of the `0x00` pad byte preceding the private key
const KEY_PAD_OFFSET: usize = 45;

/// Extract the 32-byte private key from a base58check `xprv` string
///
/// Layout: version(4) depth(1) fingerprint(4) child(4) chain code(32)
/// pad(1) key(32). Only the key is kept.
pub(crate) fn private_key_from_xprv(xprv: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
    if !xprv.starts_with("xprv") {
        return Err(WalletError::InvalidExtendedKey(
            "not a private extended key".to_string(),
        ));
    }

    let payload = Zeroizing::new(
        bs58::decode(xprv)
            .with_check(None)
            .into_vec()
            .map_err(|e| WalletError::InvalidExtendedKey(e.to_string()))?,
    );

    if payload.len() != PAYLOAD_LENGTH {
        return Err(WalletError::InvalidExtendedKey(format!(
            "expected {PAYLOAD_LENGTH} bytes, got {}",
            payload.len()
        )));
    }
    if payload[KEY_PAD_OFFSET] != 0 {
        return Err(WalletError::InvalidExtendedKey(
            "invalid private key pad byte".to_string(),
        ));
    }

    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&payload[KEY_PAD_OFFSET + 1..]);
    Ok(key)
}
