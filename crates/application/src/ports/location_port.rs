//! Device location port

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Outcome of a location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Foreground location access granted
    Granted,
    /// Access refused or restricted
    Denied,
}

/// Accuracy hint passed to the location sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationAccuracy {
    /// City-block level, cheapest
    Low,
    /// Roughly 100 meters
    Balanced,
    /// Best available (GPS)
    #[default]
    High,
}

/// Port for the device location sensor
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Ask the user for foreground location access
    async fn request_permission(&self) -> PermissionStatus;

    /// Acquire a single position fix
    async fn current_fix(&self, accuracy: LocationAccuracy)
    -> Result<Coordinate, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LocationPort>();
    }

    #[test]
    fn default_accuracy_is_high() {
        assert_eq!(LocationAccuracy::default(), LocationAccuracy::High);
    }
}
