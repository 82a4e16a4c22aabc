//! EVM address codec.

use alloy_primitives::Address;

use crate::error::AddressError;

/// Hex digits in a 20-byte address.
const ADDRESS_HEX_LEN: usize = 40;

/// Formats a raw EVM payload as an EIP-55 checksummed address.
///
/// Accepts `0x` followed by exactly 40 hex digits, or by more than 40 (a
/// left-aligned padded payload), in which case only the first 20 bytes are
/// kept.
///
/// # Errors
///
/// Returns [`AddressError::InvalidEvmAddress`] for any other shape.
pub fn format_evm_address(raw: &str) -> Result<String, AddressError> {
    let invalid = || AddressError::InvalidEvmAddress(raw.to_owned());
    let digits = raw.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() < ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let bytes = hex::decode(&digits[..ADDRESS_HEX_LEN]).map_err(|_| invalid())?;
    Ok(Address::from_slice(&bytes).to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_20_byte_address() {
        assert_eq!(
            format_evm_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        assert_eq!(
            format_evm_address("0xFB6916095CA1DF60BB79CE92CE3EA74C37C5D359").unwrap(),
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
    }

    #[test]
    fn truncates_padded_payload() {
        let padded = format!("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed{}", "00".repeat(12));
        assert_eq!(
            format_evm_address(&padded).unwrap(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x",
            "",
            "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert_eq!(
                format_evm_address(raw).unwrap_err(),
                AddressError::InvalidEvmAddress(raw.to_owned()),
                "{raw}"
            );
        }
    }
}
