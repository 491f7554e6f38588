use std::path::Path;

use crate::error::FlagfigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::record::{Record, scan_config};
use crate::resolve::{self, ResolveInput};
use crate::types::ConfigAction;

/// Entry point for loading a configuration record.
pub struct Flagfig;

impl Flagfig {
    pub fn builder() -> FlagfigBuilder {
        FlagfigBuilder::new()
    }

    /// Handle a `ConfigAction` (dump / get / list) against a loaded record.
    pub fn handle<R: Record>(
        record: &mut R,
        action: &ConfigAction,
    ) -> Result<ConfigResult, FlagfigError> {
        let items = scan_config(record);
        match action {
            ConfigAction::Dump { output } => ops::dump(&items, output.as_deref()),
            ConfigAction::Get { key } => ops::get_value(&items, key),
            ConfigAction::List => Ok(ops::list_values(&items)),
        }
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print<R: Record>(
        record: &mut R,
        action: &ConfigAction,
    ) -> Result<(), FlagfigError> {
        let text = Self::handle(record, action)?.to_string();
        if text.ends_with('\n') {
            print!("{text}");
        } else {
            println!("{text}");
        }
        Ok(())
    }
}

/// Builder for loading a record from its config file, environment, and
/// command line.
///
/// Arguments and environment default to the process's own; both can be
/// replaced, which is how tests drive a full load without touching global
/// state.
pub struct FlagfigBuilder {
    app_name: Option<String>,
    env_prefix: String,
    env_enabled: bool,
    strict: bool,
    args: Option<Vec<String>>,
    env_vars: Option<Vec<(String, String)>>,
}

impl FlagfigBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            env_prefix: String::new(),
            env_enabled: true,
            strict: true,
            args: None,
            env_vars: None,
        }
    }

    /// Set the program name used in `--help` and errors (default: the file
    /// name of the first argument).
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Prepend `prefix` to every environment variable name (default: none).
    ///
    /// The prefix is used verbatim, so include any separator: `"MYAPP_"`
    /// makes `count` read from `MYAPP_COUNT`.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, unknown keys in the config file produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use these arguments instead of `std::env::args()`. The first one is
    /// the program name, as with `std::env::args()`.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Use these variables instead of `std::env::vars()`.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        self.env_enabled.then(|| self.env_prefix.clone())
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(self) -> ResolveInput {
        let env_prefix = self.effective_env_prefix();
        let mut args = self
            .args
            .unwrap_or_else(|| std::env::args().collect())
            .into_iter();
        let program = args.next().unwrap_or_default();
        let app_name = self.app_name.unwrap_or_else(|| {
            Path::new(&program)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "app".to_string())
        });
        let env_vars = match env_prefix {
            Some(_) => self.env_vars.unwrap_or_else(|| std::env::vars().collect()),
            None => Vec::new(),
        };

        ResolveInput {
            app_name,
            args: args.collect(),
            env_vars,
            env_prefix,
            strict: self.strict,
        }
    }

    /// Populate `record` through all sources and return the positional
    /// arguments left after the flags.
    pub fn load<R: Record>(self, record: &mut R) -> Result<Vec<String>, FlagfigError> {
        resolve::resolve(record, self.build_input(), file::read_config_file)
    }
}
