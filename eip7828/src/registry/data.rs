//! Bundled chain dataset.
//!
//! EVM entries mirror the ethereum-lists/chains `shortName` and `name` fields;
//! their coin types are derived per ENSIP-11. Non-EVM chains are curated by
//! hand and carry their SLIP-44 coin type directly.

use super::{ChainInfo, ChainKey};
use crate::caip::{BIP122_NAMESPACE, SOLANA_NAMESPACE};

/// `(chain_id, short_name, name)` for bundled EVM chains.
const EVM_CHAINS: &[(u64, &str, &str)] = &[
    // L1s
    (1, "eth", "Ethereum Mainnet"),
    (137, "pol", "Polygon Mainnet"),
    (56, "bnb", "BNB Smart Chain Mainnet"),
    (43114, "avax", "Avalanche C-Chain"),
    // L2s and superchains
    (10, "oeth", "OP Mainnet"),
    (8453, "base", "Base"),
    (42161, "arb1", "Arbitrum One"),
    (1101, "zkevm", "Polygon zkEVM"),
    (59144, "linea", "Linea"),
    (7_777_777, "zora", "Zora"),
    (534_352, "scr", "Scroll Mainnet"),
    (42220, "celo", "Celo Mainnet"),
    // Testnets
    (11_155_111, "sep", "Sepolia"),
    (84532, "basesep", "Base Sepolia Testnet"),
    (11_155_420, "opsep", "OP Sepolia Testnet"),
    (421_614, "arb-sep", "Arbitrum Sepolia"),
];

pub(super) fn builtin_chains() -> Vec<ChainInfo> {
    let mut chains: Vec<ChainInfo> = EVM_CHAINS
        .iter()
        .map(|&(chain_id, short_name, name)| ChainInfo::evm(chain_id, short_name, name))
        .collect();

    chains.push(ChainInfo {
        chain_id: ChainKey::Named("solana".to_owned()),
        short_name: "solana".to_owned(),
        name: "Solana".to_owned(),
        coin_type: 501,
        namespace: Some(SOLANA_NAMESPACE.to_owned()),
        // Mainnet genesis hash, truncated to 32 characters per the CAIP-2 solana profile.
        reference: Some("5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp".to_owned()),
    });
    chains.push(ChainInfo {
        chain_id: ChainKey::Named("bitcoin".to_owned()),
        short_name: "bitcoin".to_owned(),
        name: "Bitcoin".to_owned(),
        coin_type: 0,
        namespace: Some(BIP122_NAMESPACE.to_owned()),
        reference: Some("000000000019d6689c085ae165831e93".to_owned()),
    });

    chains
}
