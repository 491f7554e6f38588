//! Derived identifiers for a config item.
//!
//! | Item (section, name) | Env var (prefix `APP_`) | INI key | Flag |
//! |----------------------|-------------------------|---------|------|
//! | `("", "count")` | `APP_COUNT` | `COUNT` | `--count` |
//! | `("nested1", "a")` | `APP_NESTED1_A` | `NESTED1_A` | `--nested1-a` |
//!
//! All three are pure functions of the item's position; nothing here can fail.

/// `PREFIX` + `SECTION_` (when nested) + `NAME`, upper-cased.
pub fn env_var_name(prefix: &str, section: &str, name: &str) -> String {
    format!("{prefix}{}", ini_key(section, name)).to_uppercase()
}

/// The key an INI file uses for an item: the env var name without the
/// prefix. INI keys are matched case-insensitively by normalizing to this.
pub fn ini_key(section: &str, name: &str) -> String {
    if section.is_empty() {
        name.to_uppercase()
    } else {
        format!("{section}_{name}").to_uppercase()
    }
}

/// `section-` (when nested) + `name`, lower-cased.
pub fn cmd_flag_name(section: &str, name: &str) -> String {
    if section.is_empty() {
        name.to_lowercase()
    } else {
        format!("{section}-{name}").to_lowercase()
    }
}
