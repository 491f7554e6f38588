//! The flag store: one command-line flag per config item, parsed with clap.
//!
//! Every write from every source (config file, environment, command line)
//! goes through [`FlagSet::set`], so all three share one coercion path and
//! one error shape.
//!
//! Flags are accepted in any of the forms `-name value`, `-name=value`,
//! `--name value`, and `--name=value`. Boolean flags never consume a separate
//! argument: `--debug` sets true, `--debug=false` sets false. Parsing stops
//! at the first positional argument; it and everything after it are handed
//! back to the caller.

use clap::{Arg, ArgAction, Command};
use tracing::debug;

use crate::cli::config_path_from_args;
use crate::error::FlagfigError;
use crate::record::ConfigItem;
use crate::types::Kind;
use crate::value::Slot;

/// Name of the reserved flag that points at a config file.
pub const CONFIG_FLAG: &str = "config";

/// clap's built-in help flag; no item may take it.
const HELP_FLAG: &str = "help";

const POSITIONAL: &str = "__positional";

/// A registered flag and the item it writes to.
#[derive(Debug)]
pub struct Flag<'a> {
    name: String,
    default: String,
    item: ConfigItem<'a>,
}

impl<'a> Flag<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item's value at registration time.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn item(&self) -> &ConfigItem<'a> {
        &self.item
    }

    fn kind(&self) -> Kind {
        // Registration rejects unsupported slots.
        self.item.value.kind().unwrap_or(Kind::Str)
    }

    fn help(&self) -> String {
        let default = if self.default.is_empty() {
            "\"\"".to_string()
        } else {
            self.default.clone()
        };
        if self.item.help.is_empty() {
            format!("[default: {default}]")
        } else {
            format!("{} [default: {default}]", self.item.help)
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help())
            .value_name(self.kind().value_name());
        if self.kind().is_bool() {
            arg.action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.action(ArgAction::Set).allow_hyphen_values(true)
        }
    }
}

/// The set of flags for one load. Create a fresh one per load.
#[derive(Debug)]
pub struct FlagSet<'a> {
    app_name: String,
    flags: Vec<Flag<'a>>,
}

impl<'a> FlagSet<'a> {
    /// An empty flag set. The reserved `config` flag is always present.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            flags: Vec::new(),
        }
    }

    /// Register one flag per item, named by its CmdFlagName, with the item's
    /// current value as the default.
    ///
    /// `config` and `help` are taken by the loader and clap; an item mapping
    /// to either is a [`FlagfigError::DuplicateFlag`].
    pub fn register(&mut self, items: Vec<ConfigItem<'a>>) -> Result<(), FlagfigError> {
        for item in items {
            let name = item.cmd_flag_name();
            if let Slot::Unsupported(type_name) = item.value {
                return Err(FlagfigError::UnsupportedType {
                    item: name,
                    type_name,
                });
            }
            if name == CONFIG_FLAG || name == HELP_FLAG || self.position(&name).is_some() {
                return Err(FlagfigError::DuplicateFlag(name));
            }
            let default = item.value.get();
            self.flags.push(Flag {
                name,
                default,
                item,
            });
        }
        debug!(flags = self.flags.len(), "registered flags");
        Ok(())
    }

    pub fn flags(&self) -> impl Iterator<Item = &Flag<'a>> {
        self.flags.iter()
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag<'a>> {
        self.position(name).map(|i| &self.flags[i])
    }

    /// Coerce `raw` into the item behind flag `name`.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FlagfigError> {
        let idx = self
            .position(name)
            .ok_or_else(|| FlagfigError::UnknownFlag(name.to_string()))?;
        self.flags[idx]
            .item
            .value
            .set(raw)
            .map_err(|source| FlagfigError::InvalidValue {
                key: name.to_string(),
                source,
            })
    }

    /// Give the items back, releasing the flag store.
    pub fn into_items(self) -> Vec<ConfigItem<'a>> {
        self.flags.into_iter().map(|f| f.item).collect()
    }

    /// The clap command describing every registered flag.
    pub fn command(&self) -> Command {
        Command::new(self.app_name.clone())
            .args_override_self(true)
            .arg(
                Arg::new(CONFIG_FLAG)
                    .long(CONFIG_FLAG)
                    .value_name("PATH")
                    .help("Path to an INI config file")
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true),
            )
            .args(self.flags.iter().map(Flag::to_arg))
            .arg(
                Arg::new(POSITIONAL)
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .hide(true),
            )
    }

    /// Parse `args` (without the program name), apply every flag given, and
    /// return the positional arguments.
    pub fn parse<I, S>(&mut self, args: I) -> Result<Vec<String>, FlagfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv = self.normalize(args.into_iter().map(Into::into));
        let matches = self
            .command()
            .try_get_matches_from(std::iter::once(self.app_name.clone()).chain(argv))?;

        let given: Vec<(String, String)> = self
            .flags
            .iter()
            .filter_map(|f| {
                matches
                    .get_one::<String>(&f.name)
                    .map(|raw| (f.name.clone(), raw.clone()))
            })
            .collect();
        debug!(flags = given.len(), "applying command-line flags");
        for (name, raw) in &given {
            self.set(name, raw)?;
        }

        Ok(matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default())
    }

    /// Find the `--config` path the way [`parse`](Self::parse) will see it.
    ///
    /// Unlike [`config_path_from_args`], an argument consumed as another
    /// flag's value is never taken for the config flag, and scanning stops
    /// where flag parsing stops.
    pub fn config_path<S: AsRef<str>>(&self, args: &[S]) -> Option<String> {
        let mut i = 0;
        while let Some(arg) = args.get(i) {
            let arg = arg.as_ref();
            if arg == "--" || arg == "-" || !arg.starts_with('-') {
                break;
            }
            let name = arg.trim_start_matches('-');
            if name == CONFIG_FLAG || name.starts_with(&format!("{CONFIG_FLAG}=")) {
                return config_path_from_args(&args[i..]);
            }
            i += if !name.contains('=') && self.takes_separate_value(name) {
                2
            } else {
                1
            };
        }
        None
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.flags.iter().position(|f| f.name == name)
    }

    fn takes_separate_value(&self, name: &str) -> bool {
        name == CONFIG_FLAG || self.lookup(name).is_some_and(|f| !f.kind().is_bool())
    }

    /// Rewrite single-dash long flags to the double-dash form clap expects,
    /// and end flag parsing at the first positional argument.
    fn normalize(&self, args: impl Iterator<Item = String>) -> Vec<String> {
        let mut out = Vec::new();
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            if arg == "--" {
                out.push(arg);
                out.extend(args);
                break;
            }
            if arg == "-" || !arg.starts_with('-') {
                out.push("--".to_string());
                out.push(arg);
                out.extend(args);
                break;
            }
            let short_help = arg == "-h" && self.lookup("h").is_none();
            let arg = if arg.starts_with("--") || short_help {
                arg
            } else {
                format!("-{arg}")
            };
            let (name, inline) = match arg.trim_start_matches('-').split_once('=') {
                Some((name, _)) => (name.to_string(), true),
                None => (arg.trim_start_matches('-').to_string(), false),
            };
            out.push(arg);
            if !inline && self.takes_separate_value(&name) {
                if let Some(value) = args.next() {
                    out.push(value);
                }
            }
        }
        out
    }
}
