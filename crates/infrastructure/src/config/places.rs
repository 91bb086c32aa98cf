//! Places provider configuration.

use integration_places::PlacesConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Places web service settings as loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesAppConfig {
    /// Base URL of the maps API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static API key (sensitive - uses `SecretString`)
    #[serde(default = "empty_secret", skip_serializing)]
    pub api_key: SecretString,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Result language
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "ko".to_string()
}

impl Default for PlacesAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: empty_secret(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

impl PlacesAppConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL, got '{}'", self.base_url));
        }

        if self.api_key.expose_secret().trim().is_empty() {
            return Err("api_key must be set (VETMAP_PLACES__API_KEY)".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }

        Ok(())
    }
}

impl From<&PlacesAppConfig> for PlacesConfig {
    fn from(config: &PlacesAppConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.expose_secret().to_string(),
            timeout_secs: config.timeout_secs,
            language: config.language.clone(),
        }
    }
}
