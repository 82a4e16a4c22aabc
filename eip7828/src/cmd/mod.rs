//! CLI definitions and command implementations for the resolver.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eip7828::config::{Config, DEFAULT_CONFIG_FILE, load_config};
use eip7828::error::Error;
use serde::Serialize;

#[cfg(feature = "telemetry")]
use crate::telemetry::Telemetry;

pub mod address;
pub mod chain;
pub mod chains;
pub mod init;
pub mod parse;
pub mod resolve;

/// EIP-7828 resolver — turn `name@chain` into a chain-native address.
#[derive(Debug, Parser)]
#[command(name = "eip7828")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        env = "EIP7828_CONFIG",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Resolve `<ensName>@<chainSpec>[#checksum]` through ENS.
    Resolve {
        /// Name to resolve, e.g. `vitalik.eth@base`.
        name: String,

        /// Ethereum mainnet JSON-RPC endpoint (overrides the config file).
        #[arg(long, env = "ETH_RPC_URL")]
        rpc_url: Option<String>,

        /// Print the full result as JSON instead of the bare address.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Resolve a chain specification (ID, CAIP-2, short or display name).
    Chain {
        /// Chain specification, e.g. `8453`, `eip155:10`, `arb1`, `optimism`.
        spec: String,
    },

    /// Parse a name without resolving it.
    Parse {
        /// Name to parse.
        name: String,

        /// Only report whether the name is valid (exit status 1 if not).
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Format a raw resolver payload for a chain, offline.
    Address {
        /// Chain specification.
        spec: String,

        /// `0x`-prefixed hex bytes as stored in the resolver.
        raw: String,
    },

    /// List the chains known to the registry.
    Chains {
        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Dispatches a parsed command line.
///
/// Every command except `init` loads the configuration file first.
///
/// # Errors
///
/// Returns the failing command's error.
pub async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Commands::Init { output, force } => init::run(&output, force),
        Commands::Resolve {
            name,
            rpc_url,
            json,
        } => resolve::run(&setup(&cli.config)?, &name, rpc_url.as_deref(), json).await,
        Commands::Chain { spec } => chain::run(&setup(&cli.config)?, &spec),
        Commands::Parse { name, check } => parse::run(&setup(&cli.config)?, &name, check),
        Commands::Address { spec, raw } => address::run(&setup(&cli.config)?, &spec, &raw),
        Commands::Chains { json } => chains::run(&setup(&cli.config)?, json),
    }
}

/// Loads the configuration file, then installs logging.
///
/// # Errors
///
/// Returns an error if the configuration file exists but is invalid.
pub fn setup(config_path: &Path) -> Result<Config, Error> {
    let config = load_config(config_path)?;

    #[cfg(feature = "telemetry")]
    {
        let telemetry = Telemetry::new();
        match &config.log_level {
            Some(level) => telemetry.with_log_level(level.clone()).register(),
            None => telemetry.register(),
        }
    }

    Ok(config)
}

/// Prints `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns [`Error::Io`] if serialization fails.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}
