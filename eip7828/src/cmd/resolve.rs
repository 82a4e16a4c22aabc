//! `eip7828 resolve` command — full ENS resolution.

use eip7828::Resolver;
use eip7828::config::Config;
use eip7828::error::Error;
use tracing::info;

use super::print_json;

/// Execute the `resolve` command.
///
/// Prints the bare address, or the whole [`eip7828::ResolvedAddress`] with
/// `json`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or resolution fails.
#[allow(clippy::print_stdout)]
pub async fn run(
    config: &Config,
    name: &str,
    rpc_url: Option<&str>,
    json: bool,
) -> Result<(), Error> {
    let client = config.ens_client(rpc_url)?;
    let resolver = Resolver::with_chains(config.chain_resolver()?, client);

    let resolved = resolver.resolve(name).await?;
    info!(name, address = %resolved.address, caip10 = %resolved.caip10, "resolved");

    if json {
        print_json(&resolved)
    } else {
        println!("{}", resolved.address);
        Ok(())
    }
}
