//! Configuration loading and default template generation.
//!
//! This module provides:
//!
//! - [`Config`] — RPC endpoint, ENS registry, log level, extra display-name
//!   aliases and extra registry chains.
//! - [`load_config`] — Reads and parses a TOML configuration file.
//! - [`generate_default_config`] — Produces a commented TOML template.
//!
//! # Configuration File Format
//!
//! ```toml
//! rpc_url = "$ETH_RPC_URL"
//! log_level = "info"
//!
//! [aliases]
//! gnosis = "gno"
//!
//! [[chains]]
//! chainId = 100
//! shortName = "gno"
//! name = "Gnosis"
//! coinType = 2147483748
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain_resolver::ChainResolver;
use crate::display_names::DisplayNames;
use crate::ens::{DEFAULT_RPC_URL, ENS_REGISTRY_ADDRESS};
use crate::error::Error;
use crate::registry::{ChainInfo, ChainRegistry};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "eip7828.toml";

/// Resolver configuration.
///
/// String values may reference environment variables as `$VAR` or `${VAR}`;
/// references are expanded when the value is used, not when it is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ethereum mainnet JSON-RPC endpoint used for ENS lookups.
    pub rpc_url: String,
    /// ENS registry contract address.
    pub ens_registry: String,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Extra display names, mapped to registry short names.
    pub aliases: BTreeMap<String, String>,
    /// Extra chains merged into the built-in registry.
    pub chains: Vec<ChainInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            ens_registry: ENS_REGISTRY_ADDRESS.to_checksum(None),
            log_level: None,
            aliases: BTreeMap::new(),
            chains: Vec::new(),
        }
    }
}

impl Config {
    /// The RPC endpoint with environment references expanded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a referenced variable is unset.
    pub fn rpc_url(&self) -> Result<String, Error> {
        resolve_env(&self.rpc_url)
    }

    /// The ENS registry address with environment references expanded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a referenced variable is unset or the
    /// value is not a 20-byte hex address.
    pub fn ens_registry(&self) -> Result<Address, Error> {
        let value = resolve_env(&self.ens_registry)?;
        value
            .parse()
            .map_err(|e| Error::config_with(format!("invalid ens_registry '{value}'"), e))
    }

    /// The built-in registry extended with the configured chains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registry`] if a configured chain collides with an
    /// existing entry or breaks the coin type rules.
    pub fn registry(&self) -> Result<Arc<ChainRegistry>, Error> {
        let builtin = ChainRegistry::builtin();
        if self.chains.is_empty() {
            return Ok(builtin);
        }
        let registry = builtin.extended(self.chains.iter().cloned())?;
        debug!(extra = self.chains.len(), total = registry.len(), "registry extended");
        Ok(Arc::new(registry))
    }

    /// The curated display names plus the configured aliases.
    #[must_use]
    pub fn display_names(&self) -> DisplayNames {
        self.aliases
            .iter()
            .fold(DisplayNames::builtin(), |names, (display, short)| {
                names.with_alias(display, short)
            })
    }

    /// Builds the chain resolver described by this configuration.
    ///
    /// # Errors
    ///
    /// See [`Config::registry`].
    pub fn chain_resolver(&self) -> Result<ChainResolver, Error> {
        Ok(ChainResolver::new(self.registry()?).with_display_names(self.display_names()))
    }

    /// Builds a JSON-RPC ENS client, with `rpc_url` overriding the
    /// configured endpoint when given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL or registry address is invalid.
    #[cfg(feature = "rpc")]
    pub fn ens_client(&self, rpc_url: Option<&str>) -> Result<crate::ens::RpcEnsClient, Error> {
        let rpc_url = match rpc_url {
            Some(url) => resolve_env(url)?,
            None => self.rpc_url()?,
        };
        let url = rpc_url
            .parse::<url::Url>()
            .map_err(|e| Error::config_with(format!("invalid rpc_url '{rpc_url}'"), e))?;
        debug!(%url, "connecting ENS client");
        Ok(crate::ens::RpcEnsClient::new(url).with_registry(self.ens_registry()?))
    }
}

/// Expands a `$VAR` or `${VAR}` reference; any other value is returned as is.
///
/// # Errors
///
/// Returns [`Error::Config`] if the referenced variable is not set.
pub fn resolve_env(value: &str) -> Result<String, Error> {
    let var_name = if let Some(name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
        name
    } else if let Some(name) = value.strip_prefix('$')
        && !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        name
    } else {
        return Ok(value.to_owned());
    };
    std::env::var(var_name).map_err(|_| {
        Error::config(format!(
            "env var '{var_name}' not found (referenced as '{value}')"
        ))
    })
}

/// Load configuration from a TOML file at the given path.
///
/// A missing file yields [`Config::default`].
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(Error::config_with(
                format!("failed to read config file '{}'", path.display()),
                e,
            ));
        }
    };
    toml::from_str(&content).map_err(|e| {
        Error::config_with(format!("failed to parse TOML config '{}'", path.display()), e)
    })
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    format!(
        r#"# EIP-7828 resolver configuration
# Values support environment variable references: "$VAR" or "${{VAR}}"

# Ethereum mainnet JSON-RPC endpoint used for ENS lookups.
rpc_url = "{DEFAULT_RPC_URL}"

# ENS registry contract.
ens_registry = "{registry}"

# Log filter used when RUST_LOG is not set.
log_level = "info"

# ── Display-name aliases ────────────────────────────────────────────
# Maps a human name to a registry short name.

[aliases]
# gnosis = "gno"

# ── Extra chains ────────────────────────────────────────────────────
# EVM chains must use the ENSIP-11 coin type 0x80000000 | chainId.

# [[chains]]
# chainId = 100
# shortName = "gno"
# name = "Gnosis"
# coinType = 2147483748
"#,
        registry = ENS_REGISTRY_ADDRESS.to_checksum(None),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChainKey;

    #[test]
    fn default_template_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.ens_registry().unwrap(), ENS_REGISTRY_ADDRESS);
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(config.aliases.is_empty());
        assert!(config.chains.is_empty());
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file_is_default() {
        let config = load_config(Path::new("/nonexistent/eip7828.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn extra_chains_and_aliases() {
        let config: Config = toml::from_str(
            r#"
            [aliases]
            Gnosis = "gno"

            [[chains]]
            chainId = 100
            shortName = "gno"
            name = "Gnosis"
            coinType = 2147483748
            "#,
        )
        .unwrap();
        assert_eq!(config.chains[0].chain_id, ChainKey::Numeric(100));

        let resolver = config.chain_resolver().unwrap();
        let chain = resolver.resolve("gnosis").unwrap();
        assert_eq!(chain.chain_id, 100);
        assert_eq!(chain.coin_type, 2_147_483_748);
        assert_eq!(resolver.resolve("eip155:100").unwrap(), chain);
        assert_eq!(resolver.resolve("base").unwrap().chain_id, 8453);
    }

    #[test]
    fn conflicting_chain_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[chains]]
            chainId = 8453
            shortName = "base2"
            name = "Base again"
            coinType = 2147492101
            "#,
        )
        .unwrap();
        assert!(matches!(config.registry(), Err(Error::Registry(_))));
    }

    #[test]
    fn invalid_registry_address() {
        let config = Config {
            ens_registry: "0x1234".into(),
            ..Config::default()
        };
        assert!(matches!(config.ens_registry(), Err(Error::Config(_))));
    }

    #[test]
    fn env_references() {
        assert_eq!(resolve_env("https://rpc.example").unwrap(), "https://rpc.example");
        assert_eq!(resolve_env("$").unwrap(), "$");
        assert_eq!(resolve_env("$not a var").unwrap(), "$not a var");
        assert!(matches!(
            resolve_env("$EIP7828_TEST_UNSET_VARIABLE"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            resolve_env("${EIP7828_TEST_UNSET_VARIABLE}"),
            Err(Error::Config(_))
        ));
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(resolve_env("$PATH").unwrap(), path);
            assert_eq!(resolve_env("${PATH}").unwrap(), path);
        }
    }
}
