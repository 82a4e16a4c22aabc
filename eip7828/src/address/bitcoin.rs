//! Bitcoin segwit address codec.
//!
//! The resolver stores a Bitcoin address as its `scriptPubKey`:
//!
//! ```text
//! | version opcode (1) | program length (1) | witness program (len) |
//! ```
//!
//! `OP_0` (`0x00`) is witness version 0, `OP_1`..`OP_16` (`0x51..=0x60`) are
//! versions 1–16. Version 0 is encoded with bech32 (BIP-173), later versions
//! with bech32m (BIP-350).

use bech32::{ToBase32, Variant, u5};

use crate::error::AddressError;

/// bech32 human-readable part of Bitcoin mainnet.
pub const BITCOIN_MAINNET_HRP: &str = "bc";

const OP_0: u8 = 0x00;
const OP_1: u8 = 0x51;
const OP_16: u8 = 0x60;

/// Maps a scriptPubKey version opcode to its witness version.
const fn witness_version(opcode: u8) -> Result<u8, AddressError> {
    match opcode {
        OP_0 => Ok(0),
        OP_1..=OP_16 => Ok(opcode - 0x50),
        other => Err(AddressError::UnsupportedWitnessVersion(other)),
    }
}

/// Formats a `0x`-prefixed hex scriptPubKey as a segwit address.
///
/// # Errors
///
/// - [`AddressError::UnsupportedWitnessVersion`] when the first byte is not a
///   witness version opcode.
/// - [`AddressError::InvalidBitcoinScript`] when the payload is not hex or
///   is shorter than the program length byte announces. Bytes past the
///   program are ignored.
pub fn format_bitcoin_address(raw: &str, hrp: &str) -> Result<String, AddressError> {
    let invalid = AddressError::InvalidBitcoinScript;

    let script = raw
        .strip_prefix("0x")
        .and_then(|digits| hex::decode(digits).ok())
        .ok_or_else(|| invalid(format!("not a 0x-prefixed hex string: {raw:?}")))?;

    let (&opcode, rest) = script
        .split_first()
        .ok_or_else(|| invalid("empty script".to_owned()))?;
    let version = witness_version(opcode)?;

    let (&len, tail) = rest
        .split_first()
        .ok_or_else(|| invalid("missing witness program length".to_owned()))?;
    let program = tail.get(..usize::from(len)).ok_or_else(|| {
        invalid(format!(
            "witness program length byte is {len}, script carries {} bytes",
            tail.len()
        ))
    })?;

    let mut data = Vec::with_capacity(1 + (program.len() * 8).div_ceil(5));
    data.push(u5::try_from_u8(version).map_err(|e| AddressError::Bech32(e.to_string()))?);
    data.extend(program.to_base32());

    let variant = if version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    };
    bech32::encode(hrp, data, variant).map_err(|e| AddressError::Bech32(e.to_string()))
}
