//! Applying environment variables to the flag store.
//!
//! Variables are read from an injected list rather than the process
//! environment, so a load can be driven entirely from test data.

use std::collections::HashMap;

use tracing::debug;

use crate::error::FlagfigError;
use crate::flags::FlagSet;

/// Apply environment variables to every registered flag.
///
/// Each item is looked up under its EnvVarName (`{PREFIX}{SECTION_}{NAME}`,
/// upper-cased). Unset and empty variables are skipped. Returns how many
/// items were set.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn apply_env(
    flags: &mut FlagSet<'_>,
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<usize, FlagfigError> {
    let vars: HashMap<String, String> = vars.into_iter().collect();

    let found: Vec<(String, String, String)> = flags
        .flags()
        .filter_map(|flag| {
            let var = flag.item().env_var_name(prefix);
            match vars.get(&var) {
                Some(value) if !value.is_empty() => {
                    Some((flag.name().to_string(), var, value.clone()))
                }
                _ => None,
            }
        })
        .collect();

    for (name, var, value) in &found {
        debug!(var = %var, flag = %name, "applying environment variable");
        flags.set(name, value)?;
    }
    Ok(found.len())
}
