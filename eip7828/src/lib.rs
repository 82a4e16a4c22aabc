//! EIP-7828 cross-chain name resolution.
//!
//! Resolves compact identifiers of the form `<ensName>@<chainSpec>[#<checksum>]`
//! (for example `alice.eth@base` or `vitalik.eth@eip155:1`) to a chain-native
//! address by reading the name's ENS resolver with the chain's ENSIP-11 coin
//! type, then formatting the returned bytes for the target chain:
//!
//! - EVM chains: EIP-55 checksummed hex
//! - Bitcoin: bech32 / bech32m segwit addresses
//! - Solana: base58
//!
//! Chain specifications may be a decimal chain ID (`8453`), a CAIP-2 id
//! (`eip155:8453`), a registry short name (`base`) or a display name
//! (`optimism`).
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use eip7828::{Resolver, RpcEnsClient};
//!
//! let client = RpcEnsClient::new("https://eth.llamarpc.com".parse()?);
//! let resolved = Resolver::new(client).resolve("vitalik.eth@base").await?;
//! println!("{} ({})", resolved.address, resolved.caip10);
//! # Ok(())
//! # }
//! ```
//!
//! Chain resolution and name parsing need no network access:
//!
//! ```
//! let chain = eip7828::resolve_chain("optimism").unwrap();
//! assert_eq!(chain.chain_id, 10);
//! assert_eq!(chain.coin_type, 0x8000_000a);
//! ```

pub mod address;
pub mod caip;
pub mod chain_resolver;
pub mod config;
pub mod display_names;
pub mod ens;
pub mod error;
pub mod name;
pub mod registry;
pub mod resolver;

pub use address::AddressCodec;
pub use caip::{Caip2, Caip10};
pub use chain_resolver::{ChainResolver, ResolvedChain};
pub use display_names::DisplayNames;
pub use ens::{EnsClient, namehash};
#[cfg(feature = "rpc")]
pub use ens::RpcEnsClient;
pub use error::{Error, ResolveError};
pub use name::{Parsed7828Name, format_7828_name, parse_7828_name};
pub use registry::{ChainInfo, ChainKey, ChainRegistry};
pub use resolver::{ResolvedAddress, Resolver, validate_7828_name};

/// Resolves a chain specification against the built-in registry.
///
/// # Errors
///
/// See [`ChainResolver::resolve`].
pub fn resolve_chain(spec: &str) -> Result<ResolvedChain, error::ChainError> {
    ChainResolver::default().resolve(spec)
}
