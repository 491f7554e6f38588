//! Configuration record for the flagfig demo application.
//!
//! One top-level block of settings plus two groups, to show how sections map
//! onto flags, environment variables, and INI headers.
//!
//! | Flag | Env var | INI |
//! |------|---------|-----|
//! | `--name` | `FLAGFIG_DEMO_NAME` | `name` |
//! | `--verbose` | `FLAGFIG_DEMO_VERBOSE` | `verbose` |
//! | `--server-host` | `FLAGFIG_DEMO_SERVER_HOST` | `host` under `[server]` |
//! | `--server-port` | `FLAGFIG_DEMO_SERVER_PORT` | `port` under `[server]` |
//! | `--server-timeout` | `FLAGFIG_DEMO_SERVER_TIMEOUT` | `timeout` under `[server]` |
//! | `--display-color` | `FLAGFIG_DEMO_DISPLAY_COLOR` | `color` under `[display]` |
//! | `--display-tags` | `FLAGFIG_DEMO_DISPLAY_TAGS` | `tags` under `[display]` |

use std::time::Duration;

/// Root configuration for the demo application.
#[derive(Debug)]
pub struct DemoConfig {
    pub name: String,
    pub verbose: bool,
    pub server: ServerConfig,
    pub display: DisplayConfig,
}
flagfig::record!(DemoConfig {
    field name: "Application name shown in the echo banner",
    field verbose: "Enable verbose output",
    group server,
    group display,
});

#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: i32,
    pub timeout: Duration,
}
flagfig::record!(ServerConfig {
    field host: "Address to bind",
    field port: "Port to listen on",
    field timeout: "Request timeout, e.g. 30s or 1m30s",
});

#[derive(Debug)]
pub struct DisplayConfig {
    pub color: String,
    pub tags: Vec<String>,
}
flagfig::record!(DisplayConfig {
    field color: "Output color (red, green, yellow, blue, magenta, cyan)",
    field tags: "Comma-separated labels printed with each line",
});

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: "flagfig-demo".into(),
            verbose: false,
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
                timeout: Duration::from_secs(30),
            },
            display: DisplayConfig {
                color: "yellow".into(),
                tags: Vec::new(),
            },
        }
    }
}
