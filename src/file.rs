//! Reading a config file and applying it to the flag store.
//!
//! The file named by `--config` is read whole, parsed as INI (see
//! [`ini`](crate::ini)), and every key matching an item is set through the
//! flag store. A key matches by the item's env var name (`APP_COUNT` with
//! prefix `APP_`) or by its unprefixed INI key (`COUNT`), so dumped files
//! load whatever the prefix. Keys that match nothing are reported together:
//! a typo in a config file should never be silently ignored.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::FlagfigError;
use crate::flags::FlagSet;
use crate::ini::IniDict;

/// Read a config file into memory.
///
/// An explicitly named file that is missing or unreadable is an error.
pub fn read_config_file(path: &Path) -> Result<String, FlagfigError> {
    std::fs::read_to_string(path).map_err(|source| FlagfigError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply a parsed INI dictionary to every matching flag.
///
/// Keys are matched under the item's env var name for `prefix`, then under
/// its unprefixed INI key; when both are present the prefixed one wins and
/// both are consumed. With `strict`, any keys left over fail with
/// [`FlagfigError::UnknownKeys`] naming every one of them; otherwise they are
/// logged and ignored. Returns how many items were set.
pub fn apply_ini(
    flags: &mut FlagSet<'_>,
    mut dict: IniDict,
    prefix: &str,
    strict: bool,
) -> Result<usize, FlagfigError> {
    let matched: Vec<(String, String)> = flags
        .flags()
        .filter_map(|flag| {
            let item = flag.item();
            let prefixed = if prefix.is_empty() {
                None
            } else {
                dict.remove(&item.env_var_name(prefix))
            };
            let plain = dict.remove(&item.ini_key());
            prefixed
                .or(plain)
                .map(|entry| (flag.name().to_string(), entry.value))
        })
        .collect();

    for (name, value) in &matched {
        debug!(flag = %name, "applying config file value");
        flags.set(name, value)?;
    }

    if !dict.is_empty() {
        let path = dict.origin().map(Path::to_path_buf).unwrap_or_default();
        let unknown: Vec<FlagfigError> = dict
            .iter()
            .map(|(key, entry)| FlagfigError::UnknownKey {
                key: key.to_string(),
                path: path.clone(),
                line: entry.line,
            })
            .collect();
        if strict {
            return Err(FlagfigError::UnknownKeys(unknown));
        }
        for err in &unknown {
            warn!("{err}");
        }
    }
    Ok(matched.len())
}
