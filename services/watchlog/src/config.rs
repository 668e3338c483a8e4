//! Service settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config/watchlog.{toml,yaml,json}` file, then `WATCHLOG__*` environment
//! variables (for example `WATCHLOG__SERVER__PORT=8080`). Database settings
//! are read separately by [`common::database::DatabaseConfig::from_env`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Fallback filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Settings {
    /// Load settings from defaults, the optional config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("config/watchlog").required(false))
            .add_source(
                Environment::with_prefix("WATCHLOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
