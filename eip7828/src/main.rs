//! EIP-7828 resolver CLI
//!
//! Resolves `<ensName>@<chainSpec>` names to chain-native addresses through
//! ENS, and inspects the chain registry offline.
//!
//! ```sh
//! eip7828 init                          # Generate default eip7828.toml
//! eip7828 resolve vitalik.eth@base      # Resolve through ENS
//! eip7828 chain optimism                # Resolve a chain spec
//! eip7828 chains                        # List known chains
//! ```

mod cmd;
#[cfg(feature = "telemetry")]
mod telemetry;

use clap::Parser;
use cmd::Cli;
use dotenvy::dotenv;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    // .env may supply EIP7828_CONFIG and ETH_RPC_URL, so load it before parsing.
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
