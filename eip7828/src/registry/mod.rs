//! Chain registry: an immutable, triple-keyed set of [`ChainInfo`] entries.
//!
//! - [`ChainRegistry::builtin`] — process-wide registry over the bundled dataset.
//! - [`ChainRegistry::from_entries`] / [`ChainRegistry::from_json`] — registries
//!   built from an external dataset (e.g. generated from chainlist).
//!
//! Lookups are by numeric (or string, for manually curated chains) chain ID,
//! by lowercase short name, and by CAIP-2 `(namespace, reference)` pair. The
//! maps are populated once at construction and never mutated afterwards, so a
//! registry can be shared freely behind an [`Arc`].

mod data;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::caip::{Caip2, EIP155_NAMESPACE};
use crate::error::RegistryError;

/// ENSIP-11 coin type for Ethereum mainnet (SLIP-44 `ETH`).
pub const ETHEREUM_COIN_TYPE: u64 = 60;

/// ENSIP-11 high bit marking an EVM chain coin type.
pub const EVM_COIN_TYPE_FLAG: u64 = 0x8000_0000;

/// Computes the ENSIP-11 coin type for an EVM chain ID.
///
/// Chain 1 keeps the legacy SLIP-44 value 60. Only chain IDs below
/// [`EVM_COIN_TYPE_FLAG`] map to distinct coin types; registries reject the
/// rest.
#[must_use]
pub const fn evm_coin_type(chain_id: u64) -> u64 {
    if chain_id == 1 {
        ETHEREUM_COIN_TYPE
    } else {
        EVM_COIN_TYPE_FLAG | chain_id
    }
}

/// Registry key of a chain: numeric for EVM chains, a namespace-like string
/// (`"solana"`, `"bitcoin"`) for manually curated non-EVM chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainKey {
    /// EIP-155 chain ID.
    Numeric(u64),
    /// Identifier of a non-EVM chain.
    Named(String),
}

impl ChainKey {
    /// Returns the numeric chain ID, if this is an EVM key.
    #[must_use]
    pub const fn as_numeric(&self) -> Option<u64> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Named(_) => None,
        }
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ChainKey {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    /// Canonical chain ID.
    pub chain_id: ChainKey,
    /// Canonical short name (chainlist `shortName`).
    pub short_name: String,
    /// Human-readable chain name.
    pub name: String,
    /// ENSIP-11 coin type (EVM) or SLIP-44 coin type (non-EVM).
    pub coin_type: u64,
    /// CAIP-2 namespace, when it is not implied by a numeric chain ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// CAIP-2 reference, when it is not implied by a numeric chain ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ChainInfo {
    /// Builds an EVM entry with an ENSIP-11 coin type and `eip155` CAIP-2 id.
    #[must_use]
    pub fn evm(chain_id: u64, short_name: &str, name: &str) -> Self {
        Self {
            chain_id: ChainKey::Numeric(chain_id),
            short_name: short_name.to_owned(),
            name: name.to_owned(),
            coin_type: evm_coin_type(chain_id),
            namespace: Some(EIP155_NAMESPACE.to_owned()),
            reference: Some(chain_id.to_string()),
        }
    }

    /// Returns the CAIP-2 identifier of this chain.
    ///
    /// Uses the explicit namespace/reference when both are present and falls
    /// back to `eip155:<chain_id>` for numeric entries.
    #[must_use]
    pub fn caip2(&self) -> Option<Caip2> {
        match (&self.namespace, &self.reference, &self.chain_id) {
            (Some(namespace), Some(reference), _) => Some(Caip2::new(namespace, reference)),
            (_, _, ChainKey::Numeric(id)) => Some(Caip2::new(EIP155_NAMESPACE, id.to_string())),
            _ => None,
        }
    }

    /// Whether this entry lives in the `eip155` namespace.
    #[must_use]
    pub fn is_evm(&self) -> bool {
        self.caip2()
            .is_some_and(|id| id.namespace() == EIP155_NAMESPACE)
    }
}

/// Immutable lookup tables over a set of [`ChainInfo`] entries.
#[derive(Debug, Default)]
pub struct ChainRegistry {
    entries: Vec<Arc<ChainInfo>>,
    by_chain_id: HashMap<ChainKey, Arc<ChainInfo>>,
    by_short_name: HashMap<String, Arc<ChainInfo>>,
    by_namespace_reference: HashMap<(String, String), Arc<ChainInfo>>,
}

static BUILTIN: LazyLock<Arc<ChainRegistry>> = LazyLock::new(|| {
    Arc::new(
        ChainRegistry::from_entries(data::builtin_chains())
            .expect("bundled chain dataset is consistent"),
    )
});

impl ChainRegistry {
    /// Returns the registry built from the bundled chain dataset.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Builds a registry from dataset entries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if an entry has an empty short name, a key is
    /// duplicated, or an EVM entry's coin type does not follow ENSIP-11.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ChainInfo>,
    {
        let mut registry = Self::default();
        for info in entries {
            registry.insert(info)?;
        }
        Ok(registry)
    }

    /// Builds a registry from a JSON array of entries
    /// (`{chainId, shortName, name, coinType, namespace?, reference?}`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] on malformed JSON, or any error of
    /// [`ChainRegistry::from_entries`].
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<ChainInfo> =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Builds a new registry holding this registry's entries plus `extra`.
    ///
    /// # Errors
    ///
    /// Same as [`ChainRegistry::from_entries`]; an extra entry colliding with
    /// an existing key is a duplicate.
    pub fn extended<I>(&self, extra: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ChainInfo>,
    {
        let existing = self.entries.iter().map(|info| ChainInfo::clone(info));
        Self::from_entries(existing.chain(extra))
    }

    fn insert(&mut self, info: ChainInfo) -> Result<(), RegistryError> {
        if info.short_name.trim().is_empty() {
            return Err(RegistryError::EmptyShortName(info.chain_id.to_string()));
        }
        if let ChainKey::Numeric(chain_id) = info.chain_id
            && info.is_evm()
        {
            // Above the flag bit `EVM_COIN_TYPE_FLAG | chain_id` is no longer injective.
            if chain_id >= EVM_COIN_TYPE_FLAG {
                return Err(RegistryError::ChainIdOutOfRange(chain_id));
            }
            let expected = evm_coin_type(chain_id);
            if info.coin_type != expected {
                return Err(RegistryError::CoinTypeMismatch {
                    chain_id,
                    coin_type: info.coin_type,
                    expected,
                });
            }
        }

        let info = Arc::new(info);

        match self.by_chain_id.entry(info.chain_id.clone()) {
            Entry::Occupied(_) => {
                return Err(RegistryError::DuplicateChainId(info.chain_id.to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&info));
            }
        }

        let short_name = info.short_name.to_lowercase();
        match self.by_short_name.entry(short_name) {
            Entry::Occupied(slot) => {
                return Err(RegistryError::DuplicateShortName(slot.key().clone()));
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&info));
            }
        }

        if let Some(caip2) = info.caip2() {
            let key = (
                caip2.namespace().to_lowercase(),
                caip2.reference().to_lowercase(),
            );
            match self.by_namespace_reference.entry(key) {
                Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateReference(caip2.to_string()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&info));
                }
            }
        }

        self.entries.push(info);
        Ok(())
    }

    /// Looks up an entry by numeric chain ID.
    #[must_use]
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&Arc<ChainInfo>> {
        self.by_chain_id.get(&ChainKey::Numeric(chain_id))
    }

    /// Looks up an entry by its registry key (numeric or named).
    #[must_use]
    pub fn by_key(&self, key: &ChainKey) -> Option<&Arc<ChainInfo>> {
        self.by_chain_id.get(key)
    }

    /// Looks up an entry by short name, case-insensitively.
    #[must_use]
    pub fn by_short_name(&self, short_name: &str) -> Option<&Arc<ChainInfo>> {
        self.by_short_name.get(&short_name.to_lowercase())
    }

    /// Looks up an entry by CAIP-2 namespace and reference, case-insensitively.
    #[must_use]
    pub fn by_namespace_reference(
        &self,
        namespace: &str,
        reference: &str,
    ) -> Option<&Arc<ChainInfo>> {
        self.by_namespace_reference
            .get(&(namespace.to_lowercase(), reference.to_lowercase()))
    }

    /// Whether `short_name` is a registered short name.
    #[must_use]
    pub fn contains_short_name(&self, short_name: &str) -> bool {
        self.by_short_name(short_name).is_some()
    }

    /// All entries, in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChainInfo>> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
