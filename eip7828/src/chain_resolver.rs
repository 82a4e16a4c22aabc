//! Chain specification resolution.
//!
//! [`ChainResolver::resolve`] turns any accepted chain spec (decimal chain ID,
//! CAIP-2 id, short name, display name) into a [`ResolvedChain`]. Lookup is
//! layered:
//!
//! 1. display name → short name ([`DisplayNames`])
//! 2. CAIP-2 interpretation ([`Caip2::parse`]) and the namespace-specific
//!    registry lookup
//! 3. direct short-name lookup
//! 4. bare decimal chain-ID lookup
//!
//! A malformed CAIP-2 string stops resolution at step 2. Any other step-2
//! failure falls through to steps 3 and 4 and, if those miss too, is kept as
//! the source of the final [`ChainError::UnknownChainSpec`].

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::caip::{Caip2, EIP155_NAMESPACE};
use crate::display_names::DisplayNames;
use crate::error::ChainError;
use crate::registry::{ChainInfo, ChainRegistry};

/// A fully resolved chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChain {
    /// Numeric chain ID; `0` for chains without one.
    pub chain_id: u64,
    /// ENSIP-11 / SLIP-44 coin type used for the resolver `addr` call.
    pub coin_type: u64,
    /// Registry entry.
    pub chain_info: Arc<ChainInfo>,
}

impl ResolvedChain {
    fn from_info(info: &Arc<ChainInfo>) -> Self {
        Self {
            chain_id: info.chain_id.as_numeric().unwrap_or(0),
            coin_type: info.coin_type,
            chain_info: Arc::clone(info),
        }
    }
}

/// Resolves chain specifications against a shared [`ChainRegistry`].
#[derive(Debug, Clone)]
pub struct ChainResolver {
    registry: Arc<ChainRegistry>,
    display_names: DisplayNames,
}

impl Default for ChainResolver {
    fn default() -> Self {
        Self::new(ChainRegistry::builtin())
    }
}

impl ChainResolver {
    /// Creates a resolver over `registry` with the curated display names.
    #[must_use]
    pub fn new(registry: Arc<ChainRegistry>) -> Self {
        Self {
            registry,
            display_names: DisplayNames::builtin(),
        }
    }

    /// Replaces the display-name table.
    #[must_use]
    pub fn with_display_names(mut self, display_names: DisplayNames) -> Self {
        self.display_names = display_names;
        self
    }

    /// The registry this resolver reads from.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ChainRegistry> {
        &self.registry
    }

    /// The display-name table.
    #[must_use]
    pub const fn display_names(&self) -> &DisplayNames {
        &self.display_names
    }

    /// Resolves a chain specification.
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptySpec`] for an empty or blank spec.
    /// - [`ChainError::Caip2`] for a malformed `namespace:reference` string.
    /// - [`ChainError::UnknownChainSpec`] when no strategy matches; `input`
    ///   is `spec` verbatim.
    pub fn resolve(&self, spec: &str) -> Result<ResolvedChain, ChainError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(ChainError::EmptySpec);
        }

        let resolved_spec = self.display_names.resolve(trimmed, &self.registry);

        // Explicit CAIP-2 ids keep the reference's case.
        let caip2_input = if trimmed.contains(':') {
            trimmed
        } else {
            resolved_spec.as_str()
        };
        let caip2 = Caip2::parse(caip2_input, &self.registry)?;
        let lookup_error = match self.resolve_caip2(&caip2) {
            Ok(chain) => return Ok(chain),
            Err(error) => error,
        };
        debug!(%spec, %caip2, error = %lookup_error, "CAIP-2 lookup missed, trying fallbacks");

        if let Some(info) = self.registry.by_short_name(&resolved_spec) {
            return Ok(ResolvedChain::from_info(info));
        }

        if let Ok(chain_id) = resolved_spec.parse::<u64>()
            && let Some(info) = self.registry.by_chain_id(chain_id)
        {
            return Ok(ResolvedChain::from_info(info));
        }

        Err(ChainError::UnknownChainSpec {
            input: spec.to_owned(),
            source: Some(Box::new(lookup_error)),
        })
    }

    fn resolve_caip2(&self, caip2: &Caip2) -> Result<ResolvedChain, ChainError> {
        if caip2.namespace() == EIP155_NAMESPACE {
            let chain_id = caip2
                .reference()
                .parse::<u64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| ChainError::InvalidChainId(caip2.reference().to_owned()))?;
            let info = self
                .registry
                .by_chain_id(chain_id)
                .ok_or(ChainError::UnknownChainId(chain_id))?;
            Ok(ResolvedChain::from_info(info))
        } else {
            let info = self
                .registry
                .by_namespace_reference(caip2.namespace(), caip2.reference())
                .ok_or_else(|| ChainError::UnknownChainReference {
                    namespace: caip2.namespace().to_owned(),
                    reference: caip2.reference().to_owned(),
                })?;
            Ok(ResolvedChain::from_info(info))
        }
    }

    /// All registered chains, in dataset order.
    #[must_use]
    pub fn available_chains(&self) -> Vec<Arc<ChainInfo>> {
        self.registry.iter().cloned().collect()
    }

    /// Looks up a chain by numeric chain ID.
    #[must_use]
    pub fn chain_by_id(&self, chain_id: u64) -> Option<Arc<ChainInfo>> {
        self.registry.by_chain_id(chain_id).cloned()
    }

    /// Looks up a chain by short name, case-insensitively.
    #[must_use]
    pub fn chain_by_short_name(&self, short_name: &str) -> Option<Arc<ChainInfo>> {
        self.registry.by_short_name(short_name).cloned()
    }
}
