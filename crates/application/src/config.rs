//! Search behaviour configuration

use std::time::Duration;

use domain::Coordinate;
use serde::{Deserialize, Serialize};

/// Tunables of the search coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Inactivity window before an autocomplete request is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Radius of the nearby search in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Place category searched around the resolved coordinate
    #[serde(default = "default_category")]
    pub category: String,

    /// Upper bound for any gateway or location call, in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Map centre used until a coordinate is known
    #[serde(default = "Coordinate::fallback")]
    pub fallback_coordinate: Coordinate,
}

const fn default_debounce_ms() -> u64 {
    500
}

const fn default_radius_meters() -> u32 {
    5000
}

fn default_category() -> String {
    "veterinary_care".to_string()
}

const fn default_call_timeout_secs() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            radius_meters: default_radius_meters(),
            category: default_category(),
            call_timeout_secs: default_call_timeout_secs(),
            fallback_coordinate: Coordinate::fallback(),
        }
    }
}

impl SearchConfig {
    /// Debounce window as a duration
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Call timeout as a duration
    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.radius_meters == 0 || self.radius_meters > 50_000 {
            return Err("radius_meters must be between 1 and 50000".to_string());
        }

        if self.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }

        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
