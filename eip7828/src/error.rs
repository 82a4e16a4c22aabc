//! Error types for name parsing, chain resolution, address formatting and
//! ENS lookups.
//!
//! Each stage of the resolution pipeline has its own error enum so callers can
//! match on the failure kind. [`Error`] is the application-level umbrella used
//! by the CLI.

use thiserror::Error;

/// Top-level error type for the `eip7828` binary and convenience APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be resolved, read, or parsed.
    #[error("config: {0}")]
    Config(String),

    /// The chain registry dataset is inconsistent.
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    /// The compact name could not be parsed.
    #[error(transparent)]
    Name(#[from] NameError),

    /// The chain specification could not be resolved.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// A raw address payload could not be formatted.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// End-to-end resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Filesystem or terminal I/O failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::Config`] from a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Builds a [`Error::Config`] from a message and an underlying cause.
    pub fn config_with(msg: impl AsRef<str>, cause: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {cause}", msg.as_ref()))
    }
}

/// Failures of the compact `<ensName>@<chainSpec>[#<checksum>]` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Input was empty.
    #[error("input must be a non-empty string")]
    Empty,

    /// Zero or more than one `@` separator.
    #[error("invalid format: must contain exactly one @ symbol")]
    InvalidFormat,

    /// ENS segment has no `.` or contains characters outside `[A-Za-z0-9.-]`.
    #[error("invalid ENS name format: {0:?}")]
    InvalidEnsName(String),

    /// Checksum is not exactly 8 hexadecimal characters.
    #[error("checksum must be exactly 8 hexadecimal characters, got {0:?}")]
    InvalidChecksum(String),

    /// Chain specification is empty after trimming.
    #[error("chain specification cannot be empty")]
    EmptyChainSpec,

    /// ENS name failed normalisation.
    #[error("ENS name {name:?} cannot be normalized: {reason}")]
    Normalization {
        /// Offending name.
        name: String,
        /// What rule was violated.
        reason: &'static str,
    },
}

/// Strict CAIP-2 parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Caip2Error {
    /// Not of the form `namespace:reference` with valid components.
    #[error("invalid CAIP-2 format: {0:?}")]
    InvalidFormat(String),
}

/// Chain specification resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Chain specification was empty.
    #[error("chain specification must be a non-empty string")]
    EmptySpec,

    /// Malformed CAIP-2 identifier. Never absorbed by the fallback lookups.
    #[error(transparent)]
    Caip2(#[from] Caip2Error),

    /// `eip155` reference is not a positive integer.
    #[error("invalid chain ID: {0}")]
    InvalidChainId(String),

    /// Numeric chain ID is not in the registry.
    #[error("unknown chain ID: {0}")]
    UnknownChainId(u64),

    /// `(namespace, reference)` pair is not in the registry.
    #[error("unknown chain reference: {namespace}:{reference}")]
    UnknownChainReference {
        /// CAIP-2 namespace.
        namespace: String,
        /// CAIP-2 reference.
        reference: String,
    },

    /// Every lookup strategy failed. `input` is the caller's original string.
    #[error("unknown chain specification: {input}")]
    UnknownChainSpec {
        /// Untransformed input.
        input: String,
        /// Failure of the CAIP-2 lookup stage, if it got that far.
        #[source]
        source: Option<Box<ChainError>>,
    },
}

/// Raw address payload could not be rendered in the chain's native format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Not a `0x`-prefixed 20-byte (or longer, padded) hex string.
    #[error("invalid raw EVM address format: {0:?}")]
    InvalidEvmAddress(String),

    /// scriptPubKey leading byte is not a witness version opcode.
    #[error("unsupported witness version: 0x{0:02x}")]
    UnsupportedWitnessVersion(u8),

    /// scriptPubKey is not a well-formed witness program.
    #[error("invalid raw Bitcoin address format: {0}")]
    InvalidBitcoinScript(String),

    /// Not a `0x`-prefixed hex string.
    #[error("invalid raw Solana address format: {0:?}")]
    InvalidSolanaAddress(String),

    /// bech32 encoder rejected the payload.
    #[error("bech32 encoding failed: {0}")]
    Bech32(String),
}

/// The chain registry dataset violates one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An entry has an empty short name.
    #[error("chain {0} has an empty short name")]
    EmptyShortName(String),

    /// Two entries share a chain ID.
    #[error("duplicate chain ID: {0}")]
    DuplicateChainId(String),

    /// Two entries share a short name (case-insensitive).
    #[error("duplicate short name: {0}")]
    DuplicateShortName(String),

    /// Two entries share a `(namespace, reference)` pair.
    #[error("duplicate chain reference: {0}")]
    DuplicateReference(String),

    /// An EVM chain ID too large for a distinct ENSIP-11 coin type.
    #[error("chain ID {0} is out of range for an ENSIP-11 coin type")]
    ChainIdOutOfRange(u64),

    /// An EVM entry's coin type does not follow ENSIP-11.
    #[error("chain {chain_id} has coin type {coin_type}, expected {expected}")]
    CoinTypeMismatch {
        /// Numeric chain ID.
        chain_id: u64,
        /// Coin type in the dataset.
        coin_type: u64,
        /// ENSIP-11 coin type.
        expected: u64,
    },

    /// The JSON dataset could not be parsed.
    #[error("invalid registry dataset: {0}")]
    Parse(String),
}

/// Failure of an external ENS contract call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnsError {
    /// RPC transport failed.
    #[error("rpc call failed: {0}")]
    Transport(String),

    /// Contract returned data that does not match the ABI.
    #[error("failed to decode {call} response: {reason}")]
    Decode {
        /// Contract function name.
        call: &'static str,
        /// Decoder message.
        reason: String,
    },
}

/// End-to-end resolution failures, carrying the resolution context.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The compact name is malformed.
    #[error(transparent)]
    Name(#[from] NameError),

    /// The chain part of the name does not resolve.
    #[error("invalid chain specification: {spec} - {source}")]
    InvalidChain {
        /// Chain specification as written.
        spec: String,
        /// Underlying resolution error.
        source: ChainError,
    },

    /// The ENS registry has no resolver for the name.
    #[error("no resolver found for {ens_name}")]
    NoResolver {
        /// Normalised ENS name.
        ens_name: String,
    },

    /// The resolver holds no address for this coin type.
    #[error("no address found for {ens_name} on chain {chain_name} (coin type: {coin_type})")]
    NoAddress {
        /// Normalised ENS name.
        ens_name: String,
        /// Human chain name.
        chain_name: String,
        /// ENSIP-11 / SLIP-44 coin type.
        coin_type: u64,
    },

    /// An ENS contract call failed.
    #[error(
        "failed to resolve address for {ens_name} on chain {chain_name} (coin type: {coin_type}): {source}"
    )]
    Lookup {
        /// Normalised ENS name.
        ens_name: String,
        /// Human chain name.
        chain_name: String,
        /// ENSIP-11 / SLIP-44 coin type.
        coin_type: u64,
        /// Transport or decode failure.
        source: EnsError,
    },

    /// The stored address bytes do not fit the chain's address format.
    #[error("cannot format address for {ens_name} on chain {chain_name}: {source}")]
    Format {
        /// Normalised ENS name.
        ens_name: String,
        /// Human chain name.
        chain_name: String,
        /// Codec failure.
        source: AddressError,
    },
}
