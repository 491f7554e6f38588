//! The INI subset read from config files and written by dumps.
//!
//! ```ini
//! ; comments start with ';' or '#'
//! debug = true
//! ttl = 30m
//!
//! [nested1]
//! a = sometag
//! ```
//!
//! Lines are trimmed. A `[section]` header applies to every following key
//! until the next header. Keys are stored upper-cased and section-qualified
//! (`NESTED1_A`), the same form as [`ini_key`](crate::naming::ini_key), so
//! matching against items is case-insensitive. Lines that are neither
//! comments, headers, nor `key = value` pairs are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::record::{ConfigItem, Record, scan_config};

/// One parsed `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub value: String,
    /// 1-based line number of the occurrence that won.
    pub line: usize,
}

/// Section-qualified key → value, parsed from one INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDict {
    entries: BTreeMap<String, IniEntry>,
    origin: Option<PathBuf>,
}

impl IniDict {
    /// Record the file this dictionary was read from, for error messages.
    pub fn with_origin(mut self, path: impl Into<PathBuf>) -> Self {
        self.origin = Some(path.into());
        self
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    /// Remove and return an entry, marking it consumed.
    pub fn remove(&mut self, key: &str) -> Option<IniEntry> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining entries, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IniEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }
}

/// Parse INI text. Never fails: malformed lines are skipped.
pub fn parse_ini(content: &str) -> IniDict {
    let mut dict = IniDict::default();
    let mut section = String::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.trim().to_uppercase();
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let full_key = if section.is_empty() {
            key.to_uppercase()
        } else {
            format!("{section}_{}", key.to_uppercase())
        };
        dict.entries.insert(
            full_key,
            IniEntry {
                value: value.trim().to_string(),
                line: idx + 1,
            },
        );
    }
    dict
}

/// Render items as INI text.
///
/// Top-level items come first without a header, then each section in the
/// order it was first declared. Every group ends with a blank line.
pub fn items_as_ini(items: &[ConfigItem<'_>]) -> String {
    let mut out = String::new();

    let top: Vec<&ConfigItem<'_>> = items.iter().filter(|i| i.section.is_empty()).collect();
    if !top.is_empty() {
        push_group(&mut out, &top);
    }

    let mut sections: Vec<&str> = Vec::new();
    for item in items {
        if !item.section.is_empty() && !sections.contains(&item.section.as_str()) {
            sections.push(&item.section);
        }
    }
    for section in sections {
        out.push_str(&format!("[{section}]\n"));
        let members: Vec<&ConfigItem<'_>> =
            items.iter().filter(|i| i.section == section).collect();
        push_group(&mut out, &members);
    }
    out
}

/// Render a record's current values as INI text.
pub fn config_as_ini<R: Record>(record: &mut R) -> String {
    items_as_ini(&scan_config(record))
}

fn push_group(out: &mut String, items: &[&ConfigItem<'_>]) {
    for item in items {
        out.push_str(&format!("{} = {}\n", item.name, item.value.get()));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::test_config;
    use crate::fixtures::test::TEST_INI;

    #[test]
    fn section_key_is_qualified() {
        let dict = parse_ini("[Nested1]\nA = sometag\n; comment\n");
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("NESTED1_A"), Some("sometag"));
    }

    #[test]
    fn top_level_keys_and_comments() {
        let dict = parse_ini(TEST_INI);
        assert_eq!(dict.get("DEBUG"), Some("true"));
        assert_eq!(dict.get("COUNT"), Some("65535"));
        assert_eq!(dict.get("TTL"), Some("30m"));
        assert_eq!(dict.get("NESTED1_A"), Some("sometag"));
        assert_eq!(dict.len(), 4);
    }

    #[test]
    fn records_line_numbers() {
        let dict = parse_ini("\n; header\ncount = 1\n");
        let (_, entry) = dict.iter().next().unwrap();
        assert_eq!(entry.line, 3);
    }

    #[test]
    fn last_occurrence_wins() {
        let dict = parse_ini("count = 1\ncount = 2\n");
        assert_eq!(dict.get("COUNT"), Some("2"));
    }

    #[test]
    fn splits_at_first_equals() {
        let dict = parse_ini("url = a=b=c\n");
        assert_eq!(dict.get("URL"), Some("a=b=c"));
    }

    #[test]
    fn ignores_empty_keys_and_junk() {
        let dict = parse_ini("= value\nnot a pair\n[unterminated\n");
        assert!(dict.is_empty());
    }

    #[test]
    fn empty_value_is_kept() {
        let dict = parse_ini("name =\n");
        assert_eq!(dict.get("NAME"), Some(""));
    }

    #[test]
    fn origin_is_carried() {
        let dict = parse_ini("").with_origin("/tmp/app.ini");
        assert_eq!(dict.origin(), Some(Path::new("/tmp/app.ini")));
    }

    #[test]
    fn dump_layout() {
        let mut config = test_config();
        let text = config_as_ini(&mut config);
        assert_eq!(
            text,
            "debug = false\n\
             count = 42\n\
             count2 = 0\n\
             ttl = 1s\n\
             \n\
             [nested1]\n\
             a = \n\
             b = baa\n\
             \n\
             [nested2]\n\
             zzz = false\n\
             \n"
        );
    }

    #[test]
    fn dump_without_top_level_items_has_no_leading_blank() {
        let mut config = test_config();
        let items: Vec<_> = scan_config(&mut config)
            .into_iter()
            .filter(|i| !i.section.is_empty())
            .collect();
        assert!(items_as_ini(&items).starts_with("[nested1]\n"));
    }

    #[test]
    fn dump_parses_back_to_item_keys() {
        let mut config = test_config();
        let text = config_as_ini(&mut config);
        let dict = parse_ini(&text);
        let items = scan_config(&mut config);
        for item in &items {
            assert_eq!(dict.get(&item.ini_key()), Some(item.value.get().as_str()));
        }
    }
}
