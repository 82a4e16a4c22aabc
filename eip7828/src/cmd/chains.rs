//! `eip7828 chains` command — list the registry.

use eip7828::config::Config;
use eip7828::error::Error;

use super::print_json;

/// Execute the `chains` command.
///
/// # Errors
///
/// Returns an error if the configured registry is invalid.
#[allow(clippy::print_stdout)]
pub fn run(config: &Config, json: bool) -> Result<(), Error> {
    let resolver = config.chain_resolver()?;
    let chains = resolver.available_chains();
    if json {
        return print_json(&chains);
    }

    println!(
        "{:<10} {:>10} {:>12}  {:<50}  NAME",
        "SHORT", "CHAIN ID", "COIN TYPE", "CAIP-2"
    );
    for chain in &chains {
        let caip2 = chain.caip2().map_or_else(String::new, |id| id.to_string());
        println!(
            "{:<10} {:>10} {:>12}  {:<50}  {}",
            chain.short_name,
            chain.chain_id.to_string(),
            chain.coin_type,
            caip2,
            chain.name
        );
    }

    let aliases = resolver
        .display_names()
        .iter()
        .map(|(display, short)| format!("{display}={short}"))
        .collect::<Vec<_>>();
    println!("\ndisplay names: {}", aliases.join(", "));
    Ok(())
}
