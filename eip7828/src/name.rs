//! Compact EIP-7828 name grammar: `<ensName>@<chainSpec>[#<checksum>]`.
//!
//! ```
//! use eip7828::name::parse_7828_name;
//!
//! let parsed = parse_7828_name("Alice.eth@base#abcd1234").unwrap();
//! assert_eq!(parsed.ens_name, "alice.eth");
//! assert_eq!(parsed.chain_spec, "base");
//! assert_eq!(parsed.checksum.as_deref(), Some("abcd1234"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::NameError;
use crate::resolver::ResolvedAddress;

/// Length of the optional trailing checksum, in hex characters.
pub const CHECKSUM_LEN: usize = 8;

/// A parsed compact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parsed7828Name {
    /// Normalised ENS name.
    pub ens_name: String,
    /// Trimmed chain specification.
    pub chain_spec: String,
    /// Checksum as written. Format-checked only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl FromStr for Parsed7828Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_7828_name(s)
    }
}

impl fmt::Display for Parsed7828Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.ens_name, self.chain_spec)?;
        if let Some(checksum) = &self.checksum {
            write!(f, "#{checksum}")?;
        }
        Ok(())
    }
}

/// Parses `<ensName>@<chainSpec>[#<checksum>]`.
///
/// # Errors
///
/// - [`NameError::Empty`] for empty input.
/// - [`NameError::InvalidFormat`] unless there is exactly one `@`.
/// - [`NameError::InvalidEnsName`] if the name fails [`validate_ens_name`].
/// - [`NameError::InvalidChecksum`] if a `#` suffix is not 8 hex characters.
/// - [`NameError::EmptyChainSpec`] if the chain spec is blank.
/// - [`NameError::Normalization`] if the name fails [`normalize_ens_name`].
pub fn parse_7828_name(input: &str) -> Result<Parsed7828Name, NameError> {
    if input.is_empty() {
        return Err(NameError::Empty);
    }

    let mut parts = input.split('@');
    let (Some(ens_name), Some(chain_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(NameError::InvalidFormat);
    };

    if !validate_ens_name(ens_name) {
        return Err(NameError::InvalidEnsName(ens_name.to_owned()));
    }

    let (chain_spec, checksum) = match chain_part.split_once('#') {
        Some((spec, checksum)) => {
            if checksum.len() != CHECKSUM_LEN || !checksum.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(NameError::InvalidChecksum(checksum.to_owned()));
            }
            (spec, Some(checksum.to_owned()))
        }
        None => (chain_part, None),
    };

    let chain_spec = chain_spec.trim();
    if chain_spec.is_empty() {
        return Err(NameError::EmptyChainSpec);
    }

    Ok(Parsed7828Name {
        ens_name: normalize_ens_name(ens_name)?,
        chain_spec: chain_spec.to_owned(),
        checksum,
    })
}

/// Basic ENS name shape check: at least one `.`, only `[A-Za-z0-9.-]`.
#[must_use]
pub fn validate_ens_name(name: &str) -> bool {
    name.contains('.')
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
}

/// Normalises an ENS name over the ASCII character set accepted by
/// [`validate_ens_name`].
///
/// Case-folds to lowercase and applies the ENSIP-15 label rules that can
/// fire on that alphabet: no empty labels, no `--` at label positions 3–4.
///
/// # Errors
///
/// Returns [`NameError::Normalization`] naming the violated rule.
pub fn normalize_ens_name(name: &str) -> Result<String, NameError> {
    let normalized = name.to_ascii_lowercase();
    for label in normalized.split('.') {
        let reason = if label.is_empty() {
            "empty label"
        } else if label.get(2..4) == Some("--") {
            "invalid label extension"
        } else {
            continue;
        };
        return Err(NameError::Normalization {
            name: name.to_owned(),
            reason,
        });
    }
    Ok(normalized)
}

/// Formats a resolved address as `<address>@<chainName>`.
#[must_use]
pub fn format_7828_name(address: &ResolvedAddress) -> String {
    format!("{}@{}", address.address, address.chain_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChainKey;

    #[test]
    fn parses_name_spec_and_checksum() {
        let parsed = parse_7828_name("alice.eth@base#abcd1234").unwrap();
        assert_eq!(
            parsed,
            Parsed7828Name {
                ens_name: "alice.eth".into(),
                chain_spec: "base".into(),
                checksum: Some("abcd1234".into()),
            }
        );
    }

    #[test]
    fn parses_without_checksum() {
        let parsed: Parsed7828Name = "vitalik.eth@1".parse().unwrap();
        assert_eq!(parsed.ens_name, "vitalik.eth");
        assert_eq!(parsed.chain_spec, "1");
        assert_eq!(parsed.checksum, None);
    }

    #[test]
    fn normalizes_name_and_trims_spec() {
        let parsed = parse_7828_name("Test.App.ETH@ Base Sepolia #ABCDEF12").unwrap();
        assert_eq!(parsed.ens_name, "test.app.eth");
        assert_eq!(parsed.chain_spec, "Base Sepolia");
        assert_eq!(parsed.checksum.as_deref(), Some("ABCDEF12"));
    }

    #[test]
    fn at_symbol_count() {
        assert_eq!(
            parse_7828_name("noAtSymbol.eth").unwrap_err(),
            NameError::InvalidFormat
        );
        assert_eq!(
            parse_7828_name("a.eth@b@c").unwrap_err(),
            NameError::InvalidFormat
        );
        assert_eq!(parse_7828_name("").unwrap_err(), NameError::Empty);
    }

    #[test]
    fn invalid_ens_names() {
        for name in ["invalid@1", "no_dot.eth@1", "al ice.eth@1", "@1", "ålice.eth@1"] {
            assert!(
                matches!(parse_7828_name(name), Err(NameError::InvalidEnsName(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn malformed_checksums() {
        for input in [
            "alice.eth@base#zzzz",
            "alice.eth@base#abcd123",
            "alice.eth@base#abcd12345",
            "alice.eth@base#",
        ] {
            assert!(
                matches!(parse_7828_name(input), Err(NameError::InvalidChecksum(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn empty_chain_spec() {
        assert_eq!(
            parse_7828_name("alice.eth@").unwrap_err(),
            NameError::EmptyChainSpec
        );
        assert_eq!(
            parse_7828_name("alice.eth@  #abcd1234").unwrap_err(),
            NameError::EmptyChainSpec
        );
    }

    #[test]
    fn normalization_failures() {
        assert!(matches!(
            parse_7828_name("alice..eth@1"),
            Err(NameError::Normalization { reason: "empty label", .. })
        ));
        assert!(matches!(
            parse_7828_name(".eth@1"),
            Err(NameError::Normalization { reason: "empty label", .. })
        ));
        assert!(matches!(
            parse_7828_name("ab--c.eth@1"),
            Err(NameError::Normalization { reason: "invalid label extension", .. })
        ));
        assert_eq!(normalize_ens_name("-a-.eth").unwrap(), "-a-.eth");
    }

    #[test]
    fn validate_ens_name_rules() {
        assert!(validate_ens_name("alice.eth"));
        assert!(validate_ens_name("test.app.eth"));
        assert!(validate_ens_name("my-name.eth"));
        assert!(!validate_ens_name("invalid"));
        assert!(!validate_ens_name("no-dot"));
        assert!(!validate_ens_name(""));
    }

    #[test]
    fn display_round_trips_parsed_form() {
        let parsed = parse_7828_name("bob.eth@optimism#abcd1234").unwrap();
        assert_eq!(parsed.to_string(), "bob.eth@optimism#abcd1234");
    }

    #[test]
    fn formats_resolved_address() {
        let address = ResolvedAddress {
            address: "0xABC".into(),
            chain_id: ChainKey::Numeric(8453),
            chain_name: "Base".into(),
            caip10: "eip155:8453:0xABC".into(),
            coin_type: 2_147_492_101,
        };
        assert_eq!(format_7828_name(&address), "0xABC@Base");
    }
}
