//! Chain-native address formatting for raw ENS resolver payloads.
//!
//! ENS resolvers store multichain addresses as raw bytes (ENSIP-9). This
//! module renders them in each chain family's human format:
//!
//! - [`AddressCodec::Evm`] — EIP-55 mixed-case checksummed hex.
//! - [`AddressCodec::Bitcoin`] — bech32 (witness v0) / bech32m (v1–v16).
//! - [`AddressCodec::Solana`] — plain base58.

mod bitcoin;
mod evm;
mod solana;

use crate::caip::{Caip10, SOLANA_NAMESPACE};
use crate::chain_resolver::ResolvedChain;
use crate::error::AddressError;

pub use self::bitcoin::{BITCOIN_MAINNET_HRP, format_bitcoin_address};
pub use self::evm::format_evm_address;
pub use self::solana::format_solana_address;

/// SLIP-44 coin type of Bitcoin.
pub const BITCOIN_COIN_TYPE: u64 = 0;

/// Address format of a chain family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCodec {
    /// EVM chains (EIP-55 hex).
    Evm,
    /// Bitcoin segwit addresses with the given human-readable part.
    Bitcoin {
        /// bech32 human-readable part (`"bc"` for mainnet).
        hrp: &'static str,
    },
    /// Solana (base58).
    Solana,
}

impl AddressCodec {
    /// Selects the codec for a resolved chain.
    ///
    /// Coin type 0 is Bitcoin, the `solana` namespace is Solana, and every
    /// other chain is treated as EVM.
    #[must_use]
    pub fn for_chain(chain: &ResolvedChain) -> Self {
        if chain.coin_type == BITCOIN_COIN_TYPE {
            Self::Bitcoin {
                hrp: BITCOIN_MAINNET_HRP,
            }
        } else if chain.chain_info.namespace.as_deref() == Some(SOLANA_NAMESPACE) {
            Self::Solana
        } else {
            Self::Evm
        }
    }

    /// Formats a `0x`-prefixed hex payload as returned by the resolver.
    ///
    /// # Errors
    ///
    /// Returns the codec-specific [`AddressError`] when the payload does not
    /// have the shape the chain family expects.
    pub fn format(&self, raw: &str) -> Result<String, AddressError> {
        match self {
            Self::Evm => format_evm_address(raw),
            Self::Bitcoin { hrp } => format_bitcoin_address(raw, hrp),
            Self::Solana => format_solana_address(raw),
        }
    }
}

/// Builds the CAIP-10 account id of `address` on `chain`.
///
/// Namespace and reference come from the registry entry, not from the spec
/// the caller typed.
#[must_use]
pub fn caip10(chain: &ResolvedChain, address: &str) -> Option<Caip10> {
    chain
        .chain_info
        .caip2()
        .map(|caip2| Caip10::new(caip2, address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_resolver::ChainResolver;

    #[test]
    fn selects_codec_by_chain() {
        let resolver = ChainResolver::default();
        let codec = |spec: &str| AddressCodec::for_chain(&resolver.resolve(spec).unwrap());
        assert_eq!(codec("bitcoin"), AddressCodec::Bitcoin { hrp: "bc" });
        assert_eq!(codec("solana"), AddressCodec::Solana);
        assert_eq!(codec("base"), AddressCodec::Evm);
        assert_eq!(codec("1"), AddressCodec::Evm);
    }

    #[test]
    fn caip10_uses_registry_ids() {
        let resolver = ChainResolver::default();
        let base = resolver.resolve("Base").unwrap();
        let account = caip10(&base, "0xAbC").unwrap();
        assert_eq!(account.to_string(), "eip155:8453:0xAbC");

        let bitcoin = resolver.resolve("bitcoin").unwrap();
        let account = caip10(&bitcoin, "bc1q").unwrap();
        assert_eq!(
            account.to_string(),
            "bip122:000000000019d6689c085ae165831e93:bc1q"
        );
    }

    #[test]
    fn dispatches_to_codec() {
        let zeros = format!("0x{}", "00".repeat(32));
        assert_eq!(
            AddressCodec::Solana.format(&zeros).unwrap(),
            "1".repeat(32)
        );
        assert!(matches!(
            AddressCodec::Evm.format(&zeros[..10]),
            Err(AddressError::InvalidEvmAddress(_))
        ));
    }
}
