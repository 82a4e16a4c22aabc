//! `eip7828 chain` command.

use eip7828::config::Config;
use eip7828::error::Error;

use super::print_json;

/// Execute the `chain` command: print the resolved chain as JSON.
///
/// # Errors
///
/// Returns an error if the registry is invalid or the spec does not resolve.
pub fn run(config: &Config, spec: &str) -> Result<(), Error> {
    let chain = config.chain_resolver()?.resolve(spec)?;
    print_json(&chain)
}
