//! `eip7828 address` command — offline payload formatting.

use eip7828::config::Config;
use eip7828::error::Error;
use eip7828::resolver::format_raw_address;

use super::print_json;

/// Execute the `address` command.
///
/// # Errors
///
/// Returns an error if the chain does not resolve or the payload does not
/// fit the chain's address format.
pub fn run(config: &Config, spec: &str, raw: &str) -> Result<(), Error> {
    let chain = config.chain_resolver()?.resolve(spec)?;
    let resolved = format_raw_address(&chain, raw)?;
    print_json(&resolved)
}
