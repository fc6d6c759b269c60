//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `GAVEL` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use gavel::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod server;
mod websocket;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use websocket::WebSocketConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults; the service starts with no
/// environment set at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, log level)
    #[serde(default)]
    pub server: ServerConfig,

    /// WebSocket transport configuration
    #[serde(default)]
    pub websocket: WebSocketConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `GAVEL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GAVEL__WEBSOCKET__MAX_CHAT_CHARS=256` -> `websocket.max_chat_chars = 256`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GAVEL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.websocket.validate()?;
        Ok(())
    }
}
