//! Human-friendly chain aliases.
//!
//! Display names are a curated convenience layer over the registry's
//! canonical short names (`ethereum` → `eth`, `optimism` → `oeth`). An alias
//! only takes effect when its target is a registered short name.

use std::collections::BTreeMap;

use crate::registry::ChainRegistry;

/// Curated `(display name, short name)` pairs.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    // Major L1s
    ("ethereum", "eth"),
    ("polygon", "pol"),
    ("bnb", "bnb"),
    ("avalanche", "avax"),
    ("celo", "celo"),
    // Major L2s and superchains
    ("arbitrum", "arb1"),
    ("optimism", "oeth"),
    ("base", "base"),
    ("zkevm", "zkevm"),
    ("linea", "linea"),
    ("zora", "zora"),
    ("scroll", "scr"),
    // Non-EVM
    ("solana", "solana"),
    ("bitcoin", "bitcoin"),
];

/// Alias table mapping display names to registry short names.
#[derive(Debug, Clone)]
pub struct DisplayNames {
    mappings: BTreeMap<String, String>,
}

impl Default for DisplayNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DisplayNames {
    /// The curated alias table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            mappings: DISPLAY_NAMES
                .iter()
                .map(|&(display, short)| (display.to_owned(), short.to_owned()))
                .collect(),
        }
    }

    /// An empty alias table.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    /// Adds or replaces an alias. Both sides are lowercased and trimmed.
    #[must_use]
    pub fn with_alias(mut self, display_name: &str, short_name: &str) -> Self {
        self.mappings.insert(
            display_name.trim().to_lowercase(),
            short_name.trim().to_lowercase(),
        );
        self
    }

    /// Maps a chain spec to a registry short name.
    ///
    /// Returns the alias target when `spec` is a known display name whose
    /// target is registered in `registry`; otherwise the lowercased, trimmed
    /// `spec`.
    #[must_use]
    pub fn resolve(&self, spec: &str, registry: &ChainRegistry) -> String {
        let normalized = spec.trim().to_lowercase();
        match self.mappings.get(&normalized) {
            Some(short_name) if registry.contains_short_name(short_name) => short_name.clone(),
            _ => normalized,
        }
    }

    /// Returns the raw alias target for a display name, registered or not.
    #[must_use]
    pub fn mapping(&self, display_name: &str) -> Option<&str> {
        self.mappings
            .get(&display_name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// All display names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    /// All `(display name, short name)` pairs, sorted by display name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mappings
            .iter()
            .map(|(display, short)| (display.as_str(), short.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChainInfo;

    #[test]
    fn maps_display_name_to_short_name() {
        let registry = ChainRegistry::builtin();
        let names = DisplayNames::builtin();
        assert_eq!(names.resolve("ethereum", &registry), "eth");
        assert_eq!(names.resolve("  Optimism ", &registry), "oeth");
        assert_eq!(names.resolve("SCROLL", &registry), "scr");
    }

    #[test]
    fn unknown_spec_is_normalized_passthrough() {
        let registry = ChainRegistry::builtin();
        let names = DisplayNames::builtin();
        assert_eq!(names.resolve(" Base-Sepolia ", &registry), "base-sepolia");
        assert_eq!(names.resolve("8453", &registry), "8453");
    }

    #[test]
    fn unregistered_target_is_ignored() {
        let registry = ChainRegistry::from_entries([ChainInfo::evm(1, "eth", "Ethereum")]).unwrap();
        let names = DisplayNames::builtin();
        assert_eq!(names.resolve("ethereum", &registry), "eth");
        assert_eq!(names.resolve("Optimism", &registry), "optimism");
    }

    #[test]
    fn custom_alias() {
        let registry = ChainRegistry::builtin();
        let names = DisplayNames::empty().with_alias(" Mainnet", "ETH ");
        assert_eq!(names.mapping("mainnet"), Some("eth"));
        assert_eq!(names.resolve("MAINNET", &registry), "eth");
        assert_eq!(names.resolve("ethereum", &registry), "ethereum");
    }

    #[test]
    fn lists_curated_names() {
        let names = DisplayNames::builtin();
        assert_eq!(names.names().count(), 14);
        assert_eq!(names.mapping("arbitrum"), Some("arb1"));
        assert_eq!(names.mapping("fantom"), None);
    }
}
