//! Config operations: dumping, key lookup, listing, and result types.
//!
//! Provides the logic behind `config dump`, `config get`, `config list`, and
//! the `ConfigResult` enum that callers use to display results. Every
//! operation reads the record as it is; none of them loads anything.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::FlagfigError;
use crate::ini::items_as_ini;
use crate::record::ConfigItem;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// The record rendered as INI text.
    Dump(String),
    /// Confirmation that a dump was written to a file.
    DumpWritten { path: PathBuf },
    /// One item's current value and its help text.
    KeyValue {
        key: String,
        value: String,
        help: String,
    },
    /// Every item as (flag name, value).
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Dump(text) => write!(f, "{text}"),
            ConfigResult::DumpWritten { path } => {
                write!(f, "Config written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value, help } => {
                if !help.is_empty() {
                    writeln!(f, "# {help}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Render items as INI text, or write it to `output`.
///
/// Parent directories of `output` are created as needed.
pub fn dump(
    items: &[ConfigItem<'_>],
    output: Option<&Path>,
) -> Result<ConfigResult, FlagfigError> {
    let text = items_as_ini(items);
    let Some(path) = output else {
        return Ok(ConfigResult::Dump(text));
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FlagfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, &text).map_err(|e| FlagfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(ConfigResult::DumpWritten {
        path: path.to_path_buf(),
    })
}

/// Look up one item by flag name (`nested1-a`) or INI key (`NESTED1_A`),
/// ignoring case.
pub fn get_value(items: &[ConfigItem<'_>], key: &str) -> Result<ConfigResult, FlagfigError> {
    let item = items
        .iter()
        .find(|i| {
            i.cmd_flag_name().eq_ignore_ascii_case(key) || i.ini_key().eq_ignore_ascii_case(key)
        })
        .ok_or_else(|| FlagfigError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: item.cmd_flag_name(),
        value: item.value.get(),
        help: item.help.clone(),
    })
}

/// List every item with its current value, in declaration order.
pub fn list_values(items: &[ConfigItem<'_>]) -> ConfigResult {
    let entries = items
        .iter()
        .map(|i| (i.cmd_flag_name(), i.value.get()))
        .collect();
    ConfigResult::Listing { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::test_config;
    use crate::record::scan_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn get_by_flag_name() {
        let mut config = test_config();
        let items = scan_config(&mut config);
        match get_value(&items, "count").unwrap() {
            ConfigResult::KeyValue { key, value, help } => {
                assert_eq!(key, "count");
                assert_eq!(value, "42");
                assert_eq!(help, "number of items");
            }
            other => panic!("Expected KeyValue, got {other:?}"),
        }
    }

    #[test]
    fn get_by_ini_key_any_case() {
        let mut config = test_config();
        let items = scan_config(&mut config);
        for key in ["NESTED1_B", "nested1_b", "Nested1-B"] {
            match get_value(&items, key).unwrap() {
                ConfigResult::KeyValue { key, value, .. } => {
                    assert_eq!(key, "nested1-b");
                    assert_eq!(value, "baa");
                }
                other => panic!("Expected KeyValue, got {other:?}"),
            }
        }
    }

    #[test]
    fn get_missing_key() {
        let mut config = test_config();
        let items = scan_config(&mut config);
        match get_value(&items, "nested1.a") {
            Err(FlagfigError::KeyNotFound(k)) => assert_eq!(k, "nested1.a"),
            other => panic!("Expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn list_in_declaration_order() {
        let mut config = test_config();
        let items = scan_config(&mut config);
        match list_values(&items) {
            ConfigResult::Listing { entries } => {
                assert_eq!(entries.len(), 7);
                assert_eq!(entries[0], ("debug".into(), "false".into()));
                assert_eq!(entries[6], ("ttl".into(), "1s".into()));
            }
            other => panic!("Expected Listing, got {other:?}"),
        }
    }

    #[test]
    fn dump_to_string() {
        let mut config = test_config();
        let items = scan_config(&mut config);
        match dump(&items, None).unwrap() {
            ConfigResult::Dump(text) => assert!(text.contains("[nested1]\n")),
            other => panic!("Expected Dump, got {other:?}"),
        }
    }

    #[test]
    fn dump_to_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("out.ini");
        let mut config = test_config();
        let items = scan_config(&mut config);
        let result = dump(&items, Some(path.as_path())).unwrap();
        assert_eq!(result, ConfigResult::DumpWritten { path: path.clone() });
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("debug = false\n"));
    }

    #[test]
    fn display_key_value_with_help() {
        let result = ConfigResult::KeyValue {
            key: "count".into(),
            value: "42".into(),
            help: "number of items".into(),
        };
        assert_eq!(result.to_string(), "# number of items\ncount = 42");
    }

    #[test]
    fn display_listing() {
        let result = ConfigResult::Listing {
            entries: vec![
                ("debug".into(), "true".into()),
                ("count".into(), "1".into()),
            ],
        };
        assert_eq!(result.to_string(), "debug = true\ncount = 1");
    }
}
