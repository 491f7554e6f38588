//! Command-line flags, environment variables, and an INI config file, merged
//! into one typed config record.
//!
//! Describe which fields of your struct are configurable, hand it to the
//! loader, and every field becomes a flag, an environment variable, and an
//! INI key at once:
//!
//! ```ignore
//! struct Config {
//!     debug: bool,
//!     count: i32,
//!     server: Server,
//! }
//! flagfig::record!(Config {
//!     field debug,
//!     field count: "number of items",
//!     group server,
//! });
//!
//! let mut config = Config::default();
//! let rest = Flagfig::builder().env_prefix("MYAPP_").load(&mut config)?;
//! ```
//!
//! That call reads the file named by `--config` (if given), then `MYAPP_*`
//! variables, then the command line, writing each value straight into
//! `config`. Whatever the struct held before the call is the default.
//!
//! # Records
//!
//! A record is any struct implementing [`Record`], usually through the
//! [`record!`] macro. The table lists configurable fields in declaration
//! order:
//!
//! - **`field name`** is a scalar item. `field name: "help"` attaches help
//!   text shown in `--help` and by `config get`.
//! - **`group name`** is a nested struct (itself a record) whose scalar fields
//!   form one section. Groups nested inside a group are not descended into.
//! - **Unlisted fields** are private. No source can reach them.
//!
//! Supported field types are `bool`, `i32`, `i64`, `f64`, `String`,
//! [`Duration`](std::time::Duration), and `Vec` of `i64`, `f64`, or `String`.
//! Listing a field of any other type is a schema error reported by `load`.
//!
//! # Names
//!
//! Each item's position determines three names:
//!
//! | Item | Flag | Env var (prefix `MYAPP_`) | INI |
//! |------|------|---------------------------|-----|
//! | `count` | `--count` | `MYAPP_COUNT` | `count = 3` |
//! | `server.port` | `--server-port` | `MYAPP_SERVER_PORT` | `port = 80` under `[server]` |
//!
//! Flags are lower-cased and joined with `-`; env vars are upper-cased and
//! joined with `_`. INI keys match case-insensitively, either as shown or
//! with the env prefix (`MYAPP_COUNT = 3`). `config` and `help` are reserved
//! flag names.
//!
//! # Source precedence
//!
//! ```text
//! Record defaults       whatever the struct held before load
//!        ↑ overridden by
//! Config file           --config <path>
//!        ↑ overridden by
//! Environment vars      PREFIX + SECTION_ + NAME
//!        ↑ overridden by
//! Command-line flags    --section-name
//! ```
//!
//! Every source is sparse: only the items it mentions change. An environment
//! variable that is set but empty counts as unset.
//!
//! # Command line
//!
//! Flags are accepted as `-name value`, `-name=value`, `--name value`, or
//! `--name=value`. Boolean flags take no separate value (`--debug`,
//! `--debug=false`). The first positional argument ends flag parsing, and
//! [`load`](FlagfigBuilder::load) returns it with everything after it, so a
//! program can dispatch subcommands on the remainder (see [`ConfigArgs`]).
//!
//! `--help` is rendered by clap and comes back as [`FlagfigError::Cli`]; call
//! `exit()` on the inner error to print it the way clap does.
//!
//! # Config file
//!
//! The file named by `--config` is a small INI dialect: `key = value` lines,
//! `[section]` headers, and `;` or `#` comments. A key that matches no item
//! fails the load with every such key listed:
//!
//! ```text
//! Unknown parameters in config file: NESTED1_TYPO, VERBOSE
//! ```
//!
//! Turn that off with [`.strict(false)`](FlagfigBuilder::strict) to log and
//! skip unknown keys instead.
//!
//! # Dumping
//!
//! [`config_as_ini`] renders a record's current values in the same INI
//! dialect, and loading that output into a fresh record reproduces every
//! value. [`ConfigAction`] and [`Flagfig::handle`] wrap dump, get, and list
//! for programs that expose them as subcommands.
//!
//! # Error handling
//!
//! All fallible operations return [`FlagfigError`]. The library never exits
//! the process; that decision belongs to the caller.

pub mod error;
pub mod types;

mod builder;
mod cli;
mod env;
mod file;
mod flags;
mod ini;
mod macros;
mod naming;
mod ops;
mod record;
mod resolve;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use builder::{Flagfig, FlagfigBuilder};
pub use cli::{ConfigArgs, ConfigSubcommand, config_path_from_args};
pub use error::FlagfigError;
pub use flags::{CONFIG_FLAG, Flag, FlagSet};
pub use ini::{IniDict, IniEntry, config_as_ini, items_as_ini, parse_ini};
pub use naming::{cmd_flag_name, env_var_name, ini_key};
pub use ops::ConfigResult;
pub use record::{ConfigItem, Fields, Record, scan_config};
pub use resolve::{ResolveInput, resolve};
pub use types::{ConfigAction, Kind};
pub use value::{ParseValueError, Slot};
