//! Handles settings for the application.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults,
//! 2. the optional settings file (`settings.toml` unless `--config` says otherwise),
//! 3. `EXPENSES__*` environment variables (`EXPENSES__SERVER__PORT=9000`),
//! 4. command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level applied to the workspace crates.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// The only origin allowed to call the API from a browser.
    pub cors_origin: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "expense-tracker", about = "In-memory expense tracking API")]
struct Args {
    /// Settings file, extension optional.
    #[arg(long, env = "EXPENSES_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let builder = Config::builder()
            .add_source(File::with_name(&args.config).required(false))
            .add_source(
                Environment::with_prefix("EXPENSES")
                    .separator("__")
                    .try_parsing(true),
            );
        let mut settings = Self::from_builder(builder)?;

        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    fn from_builder(builder: config::ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// `tracing` filter directive for our crates at the configured level.
    pub fn log_filter(&self) -> String {
        format!(
            "expense_tracker={level},server={level},engine={level},tower_http={level}",
            level = self.app.level
        )
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn nothing_configured_uses_defaults() {
        let settings = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.address(), "0.0.0.0:8000");
        assert_eq!(settings.server.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn file_overrides_only_what_it_sets() {
        let settings = from_toml("[server]\nport = 9100\n").unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.bind, "0.0.0.0");
        assert_eq!(settings.app.level, "info");
    }

    #[test]
    fn log_filter_covers_every_crate() {
        let settings = from_toml("[app]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(
            settings.log_filter(),
            "expense_tracker=debug,server=debug,engine=debug,tower_http=debug"
        );
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(from_toml("[server]\nport = \"http\"\n").is_err());
    }
}
