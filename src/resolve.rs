//! Core resolution pipeline: populate a record from every source in
//! precedence order.
//!
//! Operates on pre-collected arguments and environment (`ResolveInput`); the
//! only I/O is the config file read, which goes through a caller-supplied
//! function so the full pipeline is testable without touching the disk.
//! Steps:
//!
//! 1. Discover the record's items
//! 2. Register one flag per item (plus the reserved `config` flag)
//! 3. Apply the config file named by `--config`, if any (keys match with or
//!    without the env prefix)
//! 4. Apply environment variables, if enabled
//! 5. Parse the command line (highest priority)
//!
//! Each later step overwrites what earlier ones set. A failure stops the
//! pipeline; values already applied stay in the record.

use std::path::Path;

use tracing::{debug, info};

use crate::env;
use crate::error::FlagfigError;
use crate::file;
use crate::flags::FlagSet;
use crate::ini::parse_ini;
use crate::record::{Record, scan_config};

/// All pre-collected data needed to populate a record.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    /// Program name used in help and errors.
    pub app_name: String,
    /// Command-line arguments, without the program name.
    pub args: Vec<String>,
    /// Raw environment variable pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"MYAPP_"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Whether unknown config file keys are an error.
    pub strict: bool,
}

/// Populate `record` from defaults, config file, environment, and command
/// line, in that order. Returns the positional arguments left after flags.
pub fn resolve<R, F>(
    record: &mut R,
    input: ResolveInput,
    read_file: F,
) -> Result<Vec<String>, FlagfigError>
where
    R: Record,
    F: FnOnce(&Path) -> Result<String, FlagfigError>,
{
    // 1-2: Discover and register
    let items = scan_config(record);
    let mut flags = FlagSet::new(input.app_name);
    flags.register(items)?;

    // 3: Config file
    match flags.config_path(&input.args) {
        Some(path) => {
            let path = Path::new(&path);
            let content = read_file(path)?;
            let dict = parse_ini(&content).with_origin(path);
            let prefix = input.env_prefix.as_deref().unwrap_or_default();
            let applied = file::apply_ini(&mut flags, dict, prefix, input.strict)?;
            info!(path = %path.display(), applied, "loaded config file");
        }
        None => debug!("no config file given"),
    }

    // 4: Environment
    if let Some(prefix) = &input.env_prefix {
        let applied = env::apply_env(&mut flags, prefix, input.env_vars)?;
        debug!(prefix = %prefix, applied, "applied environment");
    }

    // 5: Command line
    let rest = flags.parse(input.args)?;
    debug!(positional = rest.len(), "parsed command line");
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{ListConfig, TEST_INI, TestConfig, UnsupportedConfig, test_config};
    use std::cell::Cell;
    use std::time::Duration;

    fn input(args: &[&str], env: &[(&str, &str)]) -> ResolveInput {
        ResolveInput {
            app_name: "test".into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            env_vars: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            env_prefix: Some(String::new()),
            strict: true,
        }
    }

    fn no_file(path: &Path) -> Result<String, FlagfigError> {
        panic!("unexpected read of {}", path.display())
    }

    fn run(args: &[&str], env: &[(&str, &str)], file: &str) -> TestConfig {
        let mut config = test_config();
        resolve(&mut config, input(args, env), |_| Ok(file.to_string())).unwrap();
        config
    }

    #[test]
    fn defaults_only() {
        let mut config = test_config();
        let rest = resolve(&mut config, input(&[], &[]), no_file).unwrap();
        assert!(rest.is_empty());
        assert_eq!(config.count, 42);
        assert_eq!(config.nested1.b, "baa");
    }

    #[test]
    fn file_overrides_default() {
        let config = run(&["--config", "app.ini"], &[], "count = 1\n");
        assert_eq!(config.count, 1);
    }

    #[test]
    fn env_overrides_file() {
        let config = run(&["--config", "app.ini"], &[("COUNT", "2")], "count = 1\n");
        assert_eq!(config.count, 2);
    }

    #[test]
    fn flag_overrides_all() {
        let config = run(
            &["--config", "app.ini", "--count", "3"],
            &[("COUNT", "2")],
            "count = 1\n",
        );
        assert_eq!(config.count, 3);
    }

    #[test]
    fn sparse_across_layers() {
        let config = run(
            &["-config=app.ini", "-debug"],
            &[("NESTED1_B", "from-env")],
            TEST_INI,
        );
        assert!(config.debug);
        assert_eq!(config.count, 65535);
        assert_eq!(config.nested1.a, "sometag");
        assert_eq!(config.nested1.b, "from-env");
        assert_eq!(config.ttl, Duration::from_secs(1800));
    }

    #[test]
    fn file_path_is_passed_through() {
        let mut config = test_config();
        let seen = Cell::new(None);
        resolve(
            &mut config,
            input(&["--config=\"/etc/app.ini\""], &[]),
            |path| {
                seen.set(Some(path.to_path_buf()));
                Ok(String::new())
            },
        )
        .unwrap();
        assert_eq!(seen.take(), Some("/etc/app.ini".into()));
    }

    #[test]
    fn env_disabled() {
        let mut config = test_config();
        let mut inp = input(&[], &[("COUNT", "2")]);
        inp.env_prefix = None;
        resolve(&mut config, inp, no_file).unwrap();
        assert_eq!(config.count, 42);
    }

    #[test]
    fn env_prefix_applies() {
        let mut config = test_config();
        let mut inp = input(&[], &[("COUNT", "2"), ("APP_COUNT", "5")]);
        inp.env_prefix = Some("APP_".into());
        resolve(&mut config, inp, no_file).unwrap();
        assert_eq!(config.count, 5);
    }

    #[test]
    fn prefixed_file_keys_apply() {
        let mut config = test_config();
        let mut inp = input(&["--config", "app.ini"], &[]);
        inp.env_prefix = Some("APP_".into());
        resolve(&mut config, inp, |_| {
            Ok("APP_COUNT = 1\n[nested1]\nb = from-file\n".to_string())
        })
        .unwrap();
        assert_eq!(config.count, 1);
        assert_eq!(config.nested1.b, "from-file");
    }

    #[test]
    fn config_taken_as_flag_value_is_not_read() {
        let mut config = test_config();
        let rest = resolve(
            &mut config,
            input(&["--nested1-a", "--config", "app.ini"], &[]),
            no_file,
        )
        .unwrap();
        assert_eq!(config.nested1.a, "--config");
        assert_eq!(rest, vec!["app.ini"]);
    }

    #[test]
    fn positional_arguments_returned() {
        let mut config = test_config();
        let rest = resolve(&mut config, input(&["-count=7", "serve", "now"], &[]), no_file)
            .unwrap();
        assert_eq!(config.count, 7);
        assert_eq!(rest, vec!["serve", "now"]);
    }

    #[test]
    fn read_error_propagates() {
        let mut config = test_config();
        let result = resolve(&mut config, input(&["--config", "gone.ini"], &[]), |path| {
            Err(FlagfigError::IoError {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        match result {
            Err(FlagfigError::IoError { path, .. }) => assert_eq!(path, Path::new("gone.ini")),
            other => panic!("Expected IoError, got {other:?}"),
        }
    }

    #[test]
    fn unknown_file_key_stops_before_env_and_flags() {
        let mut config = test_config();
        let result = resolve(
            &mut config,
            input(&["--config", "app.ini", "--count=3"], &[("DEBUG", "true")]),
            |_| Ok("count = 1\nbogus = 1\n".to_string()),
        );
        assert!(matches!(result, Err(FlagfigError::UnknownKeys(_))));
        // Matched keys were applied before the failure; later sources were not.
        assert_eq!(config.count, 1);
        assert!(!config.debug);
    }

    #[test]
    fn lenient_mode_continues() {
        let mut config = test_config();
        let mut inp = input(&["--config", "app.ini"], &[]);
        inp.strict = false;
        resolve(&mut config, inp, |_| Ok("count = 1\nbogus = 1\n".to_string())).unwrap();
        assert_eq!(config.count, 1);
    }

    #[test]
    fn schema_error_before_any_source() {
        let mut config = UnsupportedConfig::default();
        let result = resolve(&mut config, input(&["--config", "x.ini"], &[]), no_file);
        assert!(matches!(result, Err(FlagfigError::UnsupportedType { .. })));
    }

    #[test]
    fn repeated_load_is_independent() {
        let first = run(&["--count=3"], &[], "");
        let second = run(&[], &[], "");
        assert_eq!(first.count, 3);
        assert_eq!(second.count, 42);
    }

    #[test]
    fn list_fields_from_every_source() {
        let mut config = ListConfig::default();
        resolve(
            &mut config,
            input(&["--config", "app.ini", "--tags", "a, b"], &[("RATIOS", "0.5,1.5")]),
            |_| Ok("ports = 1, 2,3\nrate = 2.5\n".to_string()),
        )
        .unwrap();
        assert_eq!(config.ports, vec![1, 2, 3]);
        assert_eq!(config.ratios, vec![0.5, 1.5]);
        assert_eq!(config.tags, vec!["a", "b"]);
        assert_eq!(config.rate, 2.5);
    }

    #[test]
    fn bad_list_element_leaves_field_untouched() {
        let mut config = ListConfig {
            ports: vec![80],
            ..Default::default()
        };
        let result = resolve(&mut config, input(&["--ports=1,x,3"], &[]), no_file);
        match result {
            Err(FlagfigError::InvalidValue { key, source }) => {
                assert_eq!(key, "ports");
                assert_eq!(source.expected, "list of int");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
        assert_eq!(config.ports, vec![80]);
    }
}
