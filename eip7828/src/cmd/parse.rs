//! `eip7828 parse` command.

use eip7828::config::Config;
use eip7828::error::Error;
use eip7828::parse_7828_name;

use super::print_json;

/// Execute the `parse` command.
///
/// Without `check`, prints the parsed components as JSON. With `check`,
/// prints `true`/`false` for "well-formed name on a known chain" and fails
/// when it is `false`.
///
/// # Errors
///
/// Returns an error if the name is malformed or, with `check`, names an
/// unknown chain.
#[allow(clippy::print_stdout)]
pub fn run(config: &Config, name: &str, check: bool) -> Result<(), Error> {
    let parsed = parse_7828_name(name)?;
    if !check {
        return print_json(&parsed);
    }

    let result = config.chain_resolver()?.resolve(&parsed.chain_spec);
    println!("{}", result.is_ok());
    result.map(|_| ()).map_err(Error::from)
}
