//! Command-line helpers that run outside the flag store.
//!
//! [`config_path_from_args`] finds the `--config` path before any flag is
//! parsed, because the file it names must be applied before the command line
//! is. It knows nothing about other flags; a load uses
//! [`FlagSet::config_path()`](crate::FlagSet::config_path), which skips
//! arguments consumed as another flag's value. [`ConfigArgs`] is a clap derive type an application can embed to get
//! `config dump|get|list` subcommands; [`ConfigArgs::into_action()`] turns it
//! into a [`ConfigAction`] for
//! [`Flagfig::handle()`](crate::Flagfig::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::flags::CONFIG_FLAG;
use crate::types::ConfigAction;

/// Locate the config file path in raw arguments (without the program name).
///
/// Recognizes `-config X`, `--config X`, `-config=X`, and `--config=X`. In
/// the `=` forms one pair of surrounding double quotes is stripped. A
/// trailing `--config` with nothing after it, or an empty path, yields
/// `None`.
pub fn config_path_from_args<S: AsRef<str>>(args: &[S]) -> Option<String> {
    let single = format!("-{CONFIG_FLAG}");
    let double = format!("--{CONFIG_FLAG}");

    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        if arg == single || arg == double {
            return args
                .get(i + 1)
                .map(|next| next.as_ref().to_string())
                .filter(|path| !path.is_empty());
        }
        let inline = arg
            .strip_prefix(&format!("{double}="))
            .or_else(|| arg.strip_prefix(&format!("{single}=")));
        if let Some(value) = inline {
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            return (!value.is_empty()).then(|| value.to_string());
        }
    }
    None
}

/// Clap-derived args for a `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every config item with its resolved value.
    List,
    /// Write the resolved configuration as an INI file.
    Dump {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved value and help text for one item.
    Get {
        /// Flag name (e.g. "nested1-a") or INI key (e.g. "NESTED1_A").
        key: String,
    },
}

impl ConfigArgs {
    /// Bare `config` and `config list` both map to `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Dump { output }) => ConfigAction::Dump { output },
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
        }
    }
}
