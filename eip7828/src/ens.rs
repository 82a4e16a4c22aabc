//! ENS boundary: namehash and the registry/resolver contract calls.
//!
//! Resolution needs two sequential `eth_call`s against Ethereum mainnet:
//!
//! 1. `ENSRegistry.resolver(node) -> address`
//! 2. `Resolver.addr(node, coinType) -> bytes` (ENSIP-9 / ENSIP-11)
//!
//! [`EnsClient`] abstracts those calls so the orchestrator can run against
//! any transport. [`RpcEnsClient`] is the JSON-RPC implementation (feature
//! `rpc`).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use alloy_primitives::{Address, B256, Bytes, U256, address, keccak256};
use alloy_sol_types::SolCall;

use crate::error::EnsError;

/// ENS registry contract on Ethereum mainnet.
pub const ENS_REGISTRY_ADDRESS: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Public mainnet RPC used when no URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";

/// ABI fragments for the ENS registry and resolver.
mod abi {
    alloy_sol_types::sol! {
        function resolver(bytes32 node) external view returns (address);
        function addr(bytes32 node, uint256 coinType) external view returns (bytes);
    }
}

/// Computes the EIP-137 namehash of an already normalised ENS name.
#[must_use]
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Boxed future returned by [`EnsClient`] methods.
pub type EnsFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, EnsError>> + Send + 'a>>;

/// Transport for the two ENS contract calls.
pub trait EnsClient: Send + Sync {
    /// Returns the resolver registered for `node`; [`Address::ZERO`] if none.
    fn resolver(&self, node: B256) -> EnsFuture<'_, Address>;

    /// Returns the raw address bytes stored for `node` under `coin_type`.
    fn addr(&self, resolver: Address, node: B256, coin_type: u64) -> EnsFuture<'_, Bytes>;
}

impl<T: EnsClient + ?Sized> EnsClient for Arc<T> {
    fn resolver(&self, node: B256) -> EnsFuture<'_, Address> {
        (**self).resolver(node)
    }

    fn addr(&self, resolver: Address, node: B256, coin_type: u64) -> EnsFuture<'_, Bytes> {
        (**self).addr(resolver, node, coin_type)
    }
}

/// Encodes `resolver(node)` calldata.
#[must_use]
pub fn encode_resolver_call(node: B256) -> Bytes {
    abi::resolverCall { node }.abi_encode().into()
}

/// Decodes the `resolver(node)` return data.
///
/// # Errors
///
/// Returns [`EnsError::Decode`] if `data` is not an ABI-encoded address.
pub fn decode_resolver_return(data: &[u8]) -> Result<Address, EnsError> {
    abi::resolverCall::abi_decode_returns(data).map_err(|e| EnsError::Decode {
        call: "resolver",
        reason: e.to_string(),
    })
}

/// Encodes `addr(node, coinType)` calldata.
#[must_use]
pub fn encode_addr_call(node: B256, coin_type: u64) -> Bytes {
    abi::addrCall {
        node,
        coinType: U256::from(coin_type),
    }
    .abi_encode()
    .into()
}

/// Decodes the `addr(node, coinType)` return data.
///
/// # Errors
///
/// Returns [`EnsError::Decode`] if `data` is not ABI-encoded `bytes`.
pub fn decode_addr_return(data: &[u8]) -> Result<Bytes, EnsError> {
    abi::addrCall::abi_decode_returns(data).map_err(|e| EnsError::Decode {
        call: "addr",
        reason: e.to_string(),
    })
}

#[cfg(feature = "rpc")]
pub use self::rpc::RpcEnsClient;

#[cfg(feature = "rpc")]
mod rpc {
    use alloy_network::TransactionBuilder;
    use alloy_primitives::{Address, B256, Bytes};
    use alloy_provider::{DynProvider, Provider, ProviderBuilder};
    use alloy_rpc_types_eth::TransactionRequest;
    use url::Url;

    use super::{
        ENS_REGISTRY_ADDRESS, EnsClient, EnsFuture, decode_addr_return, decode_resolver_return,
        encode_addr_call, encode_resolver_call,
    };
    use crate::error::EnsError;

    /// [`EnsClient`] over an Ethereum JSON-RPC endpoint.
    #[derive(Debug, Clone)]
    pub struct RpcEnsClient {
        provider: DynProvider,
        registry: Address,
    }

    impl RpcEnsClient {
        /// Connects to an HTTP(S) JSON-RPC endpoint on Ethereum mainnet.
        #[must_use]
        pub fn new(rpc_url: Url) -> Self {
            let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
            Self::from_provider(provider)
        }

        /// Wraps an existing provider.
        #[must_use]
        pub const fn from_provider(provider: DynProvider) -> Self {
            Self {
                provider,
                registry: ENS_REGISTRY_ADDRESS,
            }
        }

        /// Overrides the ENS registry address (e.g. for a testnet deployment).
        #[must_use]
        pub const fn with_registry(mut self, registry: Address) -> Self {
            self.registry = registry;
            self
        }

        async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, EnsError> {
            let tx = TransactionRequest::default()
                .with_to(to)
                .with_input(calldata);
            self.provider
                .call(tx)
                .await
                .map_err(|e| EnsError::Transport(e.to_string()))
        }
    }

    impl EnsClient for RpcEnsClient {
        fn resolver(&self, node: B256) -> EnsFuture<'_, Address> {
            Box::pin(async move {
                let data = self.call(self.registry, encode_resolver_call(node)).await?;
                decode_resolver_return(&data)
            })
        }

        fn addr(&self, resolver: Address, node: B256, coin_type: u64) -> EnsFuture<'_, Bytes> {
            Box::pin(async move {
                let data = self
                    .call(resolver, encode_addr_call(node, coin_type))
                    .await?;
                decode_addr_return(&data)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;
    use alloy_sol_types::SolValue;

    use super::*;

    #[test]
    fn namehash_vectors() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn addr_calldata_layout() {
        let node = namehash("alice.eth");
        let calldata = encode_addr_call(node, 2_147_492_101);
        // selector of addr(bytes32,uint256)
        assert_eq!(&calldata[..4], &[0xf1, 0xcb, 0x7e, 0x06]);
        assert_eq!(&calldata[4..36], node.as_slice());
        assert_eq!(
            U256::from_be_slice(&calldata[36..68]),
            U256::from(2_147_492_101u64)
        );
    }

    #[test]
    fn resolver_calldata_layout() {
        let node = namehash("alice.eth");
        let calldata = encode_resolver_call(node);
        // selector of resolver(bytes32)
        assert_eq!(&calldata[..4], &[0x01, 0x78, 0xb8, 0xbf]);
        assert_eq!(calldata.len(), 36);
    }

    #[test]
    fn decodes_returns() {
        let resolver = address!("231b0Ee14048e9dCcD1d247744d114a4EB5E8E63");
        let encoded = resolver.abi_encode();
        assert_eq!(decode_resolver_return(&encoded).unwrap(), resolver);

        let raw = Bytes::from_static(&[0x00, 0x14, 0xaa]);
        let encoded = raw.abi_encode();
        assert_eq!(decode_addr_return(&encoded).unwrap(), raw);

        assert!(matches!(
            decode_addr_return(&[0x01]),
            Err(EnsError::Decode { call: "addr", .. })
        ));
    }
}
