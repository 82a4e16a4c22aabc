//! CAIP-2 chain identifiers and CAIP-10 account identifiers.
//!
//! A CAIP-2 id is `namespace:reference` (`eip155:8453`,
//! `bip122:000000000019d6689c085ae165831e93`). A CAIP-10 account id appends
//! the chain-native address: `eip155:8453:0xAbC…`.
//!
//! [`Caip2::parse`] is the permissive chain-spec parser used by the chain
//! resolver: it only fails on strings that look like CAIP-2 but are malformed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::Caip2Error;
use crate::registry::ChainRegistry;

/// CAIP-2 namespace of EVM chains.
pub const EIP155_NAMESPACE: &str = "eip155";

/// CAIP-2 namespace of Solana clusters.
pub const SOLANA_NAMESPACE: &str = "solana";

/// CAIP-2 namespace of Bitcoin-like chains.
pub const BIP122_NAMESPACE: &str = "bip122";

/// A CAIP-2 chain identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caip2 {
    namespace: String,
    reference: String,
}

impl Caip2 {
    /// Creates a chain ID from namespace and reference components.
    pub fn new(namespace: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            reference: reference.into(),
        }
    }

    /// Namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Reference component.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Interprets a chain specification as a CAIP-2 identifier.
    ///
    /// - all decimal digits: `eip155:<spec>`
    /// - contains `:`: parsed strictly, see [`Caip2::from_str`]
    /// - a registered short name with namespace/reference: that pair
    /// - anything else: `eip155:<spec>`, leaving the failure to the registry
    ///   lookup downstream
    ///
    /// # Errors
    ///
    /// Returns [`Caip2Error::InvalidFormat`] only for malformed
    /// `namespace:reference` strings.
    pub fn parse(spec: &str, registry: &ChainRegistry) -> Result<Self, Caip2Error> {
        if !spec.is_empty() && spec.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::new(EIP155_NAMESPACE, spec));
        }
        if spec.contains(':') {
            return spec.parse();
        }
        if let Some(chain) = registry.by_short_name(spec)
            && let (Some(namespace), Some(reference)) = (&chain.namespace, &chain.reference)
        {
            return Ok(Self::new(namespace, reference));
        }
        Ok(Self::new(EIP155_NAMESPACE, spec))
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    (3..=8).contains(&namespace.len())
        && namespace
            .bytes()
            .all(|b| b == b'-' || b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn is_valid_reference(reference: &str) -> bool {
    (1..=32).contains(&reference.len())
        && reference
            .bytes()
            .all(|b| b == b'-' || b == b'_' || b.is_ascii_alphanumeric())
}

impl FromStr for Caip2 {
    type Err = Caip2Error;

    /// Strict `namespace:reference` parse. The namespace is lowercased; the
    /// reference keeps its case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Caip2Error::InvalidFormat(s.to_owned());
        let (namespace, reference) = s.split_once(':').ok_or_else(invalid)?;
        let namespace = namespace.to_ascii_lowercase();
        if !is_valid_namespace(&namespace) || !is_valid_reference(reference) {
            return Err(invalid());
        }
        Ok(Self::new(namespace, reference))
    }
}

impl fmt::Display for Caip2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

impl Serialize for Caip2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Caip2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A CAIP-10 account identifier: a [`Caip2`] chain plus a chain-native address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caip10 {
    chain: Caip2,
    address: String,
}

impl Caip10 {
    /// Creates an account id.
    pub fn new(chain: Caip2, address: impl Into<String>) -> Self {
        Self {
            chain,
            address: address.into(),
        }
    }

    /// Chain component.
    #[must_use]
    pub const fn chain(&self) -> &Caip2 {
        &self.chain
    }

    /// Address component.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Caip10 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(spec: &str) -> Result<Caip2, Caip2Error> {
        Caip2::parse(spec, &ChainRegistry::builtin())
    }

    #[test]
    fn decimal_is_eip155() {
        assert_eq!(parse("1").unwrap(), Caip2::new("eip155", "1"));
        assert_eq!(parse("8453").unwrap().to_string(), "eip155:8453");
    }

    #[test]
    fn short_name_with_namespace_uses_registry() {
        let solana = parse("solana").unwrap();
        assert_eq!(solana.namespace(), "solana");
        assert_eq!(solana.reference(), "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp");

        let bitcoin = parse("BITCOIN").unwrap();
        assert_eq!(bitcoin.to_string(), "bip122:000000000019d6689c085ae165831e93");

        assert_eq!(parse("base").unwrap().to_string(), "eip155:8453");
    }

    #[test]
    fn unknown_spec_defaults_to_eip155_reference() {
        assert_eq!(
            parse("optimism").unwrap(),
            Caip2::new("eip155", "optimism")
        );
        assert_eq!(
            parse("invalid-chain").unwrap(),
            Caip2::new("eip155", "invalid-chain")
        );
    }

    #[test]
    fn explicit_caip2() {
        assert_eq!(parse("eip155:1").unwrap(), Caip2::new("eip155", "1"));
        assert_eq!(parse("EIP155:10").unwrap(), Caip2::new("eip155", "10"));
        assert_eq!(
            parse("invalid:format").unwrap(),
            Caip2::new("invalid", "format")
        );
    }

    #[test]
    fn malformed_caip2_is_rejected() {
        for spec in [
            "eip155:1:2",
            "eip155:",
            ":1",
            "ab:1",
            "toolongnamespace:1",
            "eip155:a b",
        ] {
            assert_eq!(
                parse(spec).unwrap_err(),
                Caip2Error::InvalidFormat(spec.to_owned()),
                "{spec}"
            );
        }
    }

    #[test]
    fn serde_as_string() {
        let id = Caip2::new("eip155", "8453");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"eip155:8453\"");
        let back: Caip2 = serde_json::from_str("\"bip122:000000000019d6689c085ae165831e93\"").unwrap();
        assert_eq!(back.namespace(), "bip122");
        assert!(serde_json::from_str::<Caip2>("\"nocolon\"").is_err());
    }

    #[test]
    fn caip10_display() {
        let account = Caip10::new(Caip2::new("eip155", "1"), "0xAbC");
        assert_eq!(account.to_string(), "eip155:1:0xAbC");
        assert_eq!(account.chain().reference(), "1");
        assert_eq!(account.address(), "0xAbC");
    }
}
