//! # flagfig demo application
//!
//! A sample CLI tool that shows how to wire flagfig into an application. It
//! exists to demonstrate and manually verify the library's behavior.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagfig_demo -- echo
//! cargo run --example flagfig_demo -- --server-port 9000 config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature              | How to exercise it                                                     |
//! |----------------------|------------------------------------------------------------------------|
//! | Record defaults      | `cargo run --example flagfig_demo -- echo`                             |
//! | Config file          | `cargo run --example flagfig_demo -- --config demo.ini echo`           |
//! | Env var override     | `FLAGFIG_DEMO_DISPLAY_COLOR=red cargo run --example flagfig_demo -- echo` |
//! | Flag override        | `cargo run --example flagfig_demo -- -verbose -server-port=9 echo`     |
//! | Generated help       | `cargo run --example flagfig_demo -- --help`                           |
//! | `config dump`        | `cargo run --example flagfig_demo -- config dump -o demo.ini`          |
//! | `config get`         | `cargo run --example flagfig_demo -- config get SERVER_PORT`           |
//! | `config list`        | `cargo run --example flagfig_demo -- config list`                      |
//! | Debug logging        | `RUST_LOG=flagfig=debug cargo run --example flagfig_demo -- echo`      |

mod config;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use flagfig::{ConfigArgs, Flagfig, FlagfigError};

use config::DemoConfig;

const APP_NAME: &str = "flagfig-demo";

/// Subcommands run after the flags have been applied.
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved configuration.
    Echo,
    /// Inspect the configuration (dump, get, list).
    Config(ConfigArgs),
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flagfig=info")))
        .init();
}

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

fn echo(config: &DemoConfig) {
    let color = ansi_color_code(&config.display.color);
    if config.verbose {
        println!("{color}[verbose] Resolved configuration for {:?}{RESET}", config.name);
        println!();
    }
    let tags = config.display.tags.join(", ");
    let entries = [
        ("name", config.name.clone()),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        ("server.timeout", format!("{:?}", config.server.timeout)),
        ("display.color", config.display.color.clone()),
        ("display.tags", tags),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{color}{key:<width$}{RESET}  {value}");
    }
}

fn run(config: &mut DemoConfig) -> Result<(), FlagfigError> {
    let rest = Flagfig::builder()
        .app_name(APP_NAME)
        .env_prefix("FLAGFIG_DEMO_")
        .load(config)?;

    let cli = Cli::try_parse_from(std::iter::once(APP_NAME.to_string()).chain(rest))?;
    match cli.command {
        None | Some(Commands::Echo) => echo(config),
        Some(Commands::Config(args)) => Flagfig::handle_and_print(config, &args.into_action())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let mut config = DemoConfig::default();
    match run(&mut config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(FlagfigError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
