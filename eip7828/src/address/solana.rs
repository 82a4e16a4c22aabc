//! Solana address codec.

use crate::error::AddressError;

/// Formats a `0x`-prefixed hex public key as a base58 Solana address.
///
/// Plain base58 over the decoded bytes; no base58check checksum. Key length
/// is not checked, a 32-byte public key is simply the usual case.
///
/// # Errors
///
/// Returns [`AddressError::InvalidSolanaAddress`] unless `raw` is `0x`
/// followed by valid hex.
pub fn format_solana_address(raw: &str) -> Result<String, AddressError> {
    let bytes = raw
        .strip_prefix("0x")
        .and_then(|digits| hex::decode(digits).ok())
        .ok_or_else(|| AddressError::InvalidSolanaAddress(raw.to_owned()))?;
    Ok(bs58::encode(bytes).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_is_system_program() {
        let raw = format!("0x{}", "0".repeat(64));
        assert_eq!(
            format_solana_address(&raw).unwrap(),
            "11111111111111111111111111111111"
        );
    }

    #[test]
    fn encodes_key_bytes_directly() {
        let mut key = [0u8; 32];
        key[31] = 1;
        let raw = format!("0x{}", hex::encode(key));
        let encoded = format_solana_address(&raw).unwrap();
        assert_eq!(bs58::decode(&encoded).into_vec().unwrap(), key);
        assert_eq!(encoded, "11111111111111111111111111111112");
    }

    #[test]
    fn requires_0x_prefix() {
        let raw = "0".repeat(64);
        assert_eq!(
            format_solana_address(&raw).unwrap_err(),
            AddressError::InvalidSolanaAddress(raw.clone())
        );
    }

    #[test]
    fn encodes_any_key_length() {
        let short = format!("0x{}", "00".repeat(20));
        assert_eq!(format_solana_address(&short).unwrap(), "1".repeat(20));
        assert_eq!(format_solana_address("0x00").unwrap(), "1");
        assert_eq!(format_solana_address("0x").unwrap(), "");

        let long = [0x11u8; 33];
        let encoded = format_solana_address(&format!("0x{}", hex::encode(long))).unwrap();
        assert_eq!(bs58::decode(&encoded).into_vec().unwrap(), long);
    }

    #[test]
    fn requires_hex() {
        for raw in ["0xabc", "0xzz", "0x 00"] {
            assert!(
                matches!(
                    format_solana_address(raw),
                    Err(AddressError::InvalidSolanaAddress(_))
                ),
                "{raw}"
            );
        }
    }
}
