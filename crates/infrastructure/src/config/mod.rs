//! Application configuration
//!
//! Split into focused sub-modules:
//! - `places`: places web service (base URL, API key, timeout, language)
//! - `storage`: SQLite key-value storage
//!
//! Search tunables come from [`application::SearchConfig`] and logging from
//! [`crate::telemetry::TelemetryConfig`].
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml` in the working directory, then environment variables such as
//! `VETMAP_PLACES__API_KEY` or `VETMAP_SEARCH__DEBOUNCE_MS`.

mod places;
mod storage;

use application::SearchConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use places::PlacesAppConfig;
pub use storage::StorageConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "VETMAP";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Places web service
    #[serde(default)]
    pub places: PlacesAppConfig,

    /// Search coordinator tunables
    #[serde(default)]
    pub search: SearchConfig,

    /// Local storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(
            config::File::with_name("config").required(false),
            environment(),
        )
    }

    /// Load configuration from a TOML document, ignoring the environment
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn from_sources<F>(file: F, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.places.validate().map_err(|e| format!("places: {e}"))?;
        self.search.validate().map_err(|e| format!("search: {e}"))?;
        self.storage.validate().map_err(|e| format!("storage: {e}"))?;
        self.telemetry
            .validate()
            .map_err(|e| format!("telemetry: {e}"))?;
        Ok(())
    }
}

/// Environment source: `VETMAP_<SECTION>__<KEY>`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
