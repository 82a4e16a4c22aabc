//! End-to-end resolution of `<ensName>@<chainSpec>` names.
//!
//! [`Resolver`] composes the name parser, the chain resolver, the ENS
//! contract calls and the address codecs:
//!
//! ```text
//! parse_7828_name → ChainResolver::resolve → namehash
//!     → EnsClient::resolver → EnsClient::addr → AddressCodec::format
//! ```
//!
//! It is the only layer that adds context (ENS name, chain name, coin type)
//! to lower-level errors.

use std::sync::LazyLock;

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::address::{AddressCodec, caip10};
use crate::chain_resolver::{ChainResolver, ResolvedChain};
use crate::ens::{EnsClient, namehash};
use crate::error::ResolveError;
use crate::name::parse_7828_name;
use crate::registry::ChainKey;

/// Terminal output of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    /// Address in the chain's native format.
    pub address: String,
    /// Registry chain ID (numeric, or the name of a non-EVM chain).
    pub chain_id: ChainKey,
    /// Human chain name.
    pub chain_name: String,
    /// CAIP-10 account id.
    pub caip10: String,
    /// Coin type the address was resolved under.
    pub coin_type: u64,
}

/// Resolves compact names through an [`EnsClient`].
#[derive(Debug, Clone)]
pub struct Resolver<C> {
    chains: ChainResolver,
    client: C,
}

impl<C: EnsClient> Resolver<C> {
    /// Creates a resolver over the built-in chain registry.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_chains(ChainResolver::default(), client)
    }

    /// Creates a resolver with a custom chain resolver.
    #[must_use]
    pub const fn with_chains(chains: ChainResolver, client: C) -> Self {
        Self { chains, client }
    }

    /// The chain resolver in use.
    #[must_use]
    pub const fn chains(&self) -> &ChainResolver {
        &self.chains
    }

    /// Resolves `input` to a chain-native address.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Name`] if `input` is malformed.
    /// - [`ResolveError::InvalidChain`] if the chain spec does not resolve.
    /// - [`ResolveError::NoResolver`] if the name has no resolver.
    /// - [`ResolveError::NoAddress`] if no address is stored for the chain.
    /// - [`ResolveError::Lookup`] if a contract call fails.
    /// - [`ResolveError::Format`] if the stored bytes do not fit the chain.
    #[instrument(skip_all, fields(input = %input))]
    pub async fn resolve(&self, input: &str) -> Result<ResolvedAddress, ResolveError> {
        let parsed = parse_7828_name(input)?;

        let chain = self
            .chains
            .resolve(&parsed.chain_spec)
            .map_err(|source| ResolveError::InvalidChain {
                spec: parsed.chain_spec.clone(),
                source,
            })?;
        debug!(
            ens_name = %parsed.ens_name,
            chain = %chain.chain_info.short_name,
            coin_type = chain.coin_type,
            "chain resolved"
        );

        let node = namehash(&parsed.ens_name);
        let lookup_error = |source| ResolveError::Lookup {
            ens_name: parsed.ens_name.clone(),
            chain_name: chain.chain_info.name.clone(),
            coin_type: chain.coin_type,
            source,
        };

        let resolver = self.client.resolver(node).await.map_err(lookup_error)?;
        if resolver == Address::ZERO {
            return Err(ResolveError::NoResolver {
                ens_name: parsed.ens_name,
            });
        }
        debug!(%resolver, "resolver found");

        let raw = self
            .client
            .addr(resolver, node, chain.coin_type)
            .await
            .map_err(lookup_error)?;
        if raw.is_empty() || raw[..] == [0u8; 20] {
            return Err(ResolveError::NoAddress {
                ens_name: parsed.ens_name,
                chain_name: chain.chain_info.name.clone(),
                coin_type: chain.coin_type,
            });
        }

        let address = format_raw_address(&chain, &format!("0x{}", hex::encode(&raw))).map_err(
            |source| ResolveError::Format {
                ens_name: parsed.ens_name.clone(),
                chain_name: chain.chain_info.name.clone(),
                source,
            },
        )?;
        debug!(address = %address.address, caip10 = %address.caip10, "address formatted");

        Ok(address)
    }

    /// Whether `input` parses and names a known chain. No network access.
    #[must_use]
    pub fn validate(&self, input: &str) -> bool {
        parse_7828_name(input).is_ok_and(|parsed| self.chains.resolve(&parsed.chain_spec).is_ok())
    }
}

/// Formats a raw `0x`-hex resolver payload for `chain` and assembles the
/// [`ResolvedAddress`].
///
/// # Errors
///
/// Returns the codec's [`AddressError`](crate::error::AddressError) when the
/// payload does not fit the chain's address format.
pub fn format_raw_address(
    chain: &ResolvedChain,
    raw: &str,
) -> Result<ResolvedAddress, crate::error::AddressError> {
    let address = AddressCodec::for_chain(chain).format(raw)?;
    let caip10 = caip10(chain, &address).map_or_else(String::new, |id| id.to_string());
    Ok(ResolvedAddress {
        address,
        chain_id: chain.chain_info.chain_id.clone(),
        chain_name: chain.chain_info.name.clone(),
        caip10,
        coin_type: chain.coin_type,
    })
}

static DEFAULT_CHAINS: LazyLock<ChainResolver> = LazyLock::new(ChainResolver::default);

/// Whether `input` is a well-formed name on a chain of the built-in registry.
#[must_use]
pub fn validate_7828_name(input: &str) -> bool {
    let chains = &*DEFAULT_CHAINS;
    parse_7828_name(input).is_ok_and(|parsed| chains.resolve(&parsed.chain_spec).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_without_network() {
        assert!(validate_7828_name("alice.eth@base"));
        assert!(validate_7828_name("alice.eth@1#abcd1234"));
        assert!(validate_7828_name("ndeto.eth@solana"));
        assert!(!validate_7828_name("invalid@1"));
        assert!(!validate_7828_name("test.eth@invalid"));
        assert!(!validate_7828_name("no-at-symbol.eth"));
    }

    #[test]
    fn validation_reuses_builtin_chains() {
        assert!(std::ptr::eq(&*DEFAULT_CHAINS, &*DEFAULT_CHAINS));
        assert!(std::sync::Arc::ptr_eq(
            DEFAULT_CHAINS.registry(),
            &crate::registry::ChainRegistry::builtin()
        ));
        for _ in 0..3 {
            assert!(validate_7828_name("alice.eth@optimism"));
        }
    }

    #[test]
    fn formats_raw_payload_for_chain() {
        let chain = ChainResolver::default().resolve("base").unwrap();
        let resolved =
            format_raw_address(&chain, "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(resolved.address, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert_eq!(
            resolved.caip10,
            "eip155:8453:0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        assert_eq!(resolved.chain_name, "Base");
        assert_eq!(resolved.chain_id, ChainKey::Numeric(8453));
    }

    #[test]
    fn serializes_camel_case() {
        let chain = ChainResolver::default().resolve("solana").unwrap();
        let resolved = format_raw_address(&chain, &format!("0x{}", "00".repeat(32))).unwrap();
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["chainId"], "solana");
        assert_eq!(json["chainName"], "Solana");
        assert_eq!(json["coinType"], 501);
        assert_eq!(
            json["caip10"],
            "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp:11111111111111111111111111111111"
        );
    }
}
