//! Composition root
//!
//! Wires the SQLite store, the places adapter and the host-provided location
//! and presentation ports into a running search coordinator.

use std::sync::Arc;

use application::{
    ApplicationError, FavoritesService, LocationPort, PresentationPort, SearchCoordinator,
    SearchDependencies, SearchHandle,
};
use integration_places::PlacesConfig;
use thiserror::Error;
use tracing::info;

use crate::{
    adapters::PlacesAdapter,
    config::AppConfig,
    persistence::{DatabaseError, SqliteKeyValueStore, create_pool},
};

/// Errors raised while assembling the coordinator
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration did not validate
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Storage could not be opened or migrated
    #[error("Storage initialization failed: {0}")]
    Database(#[from] DatabaseError),

    /// Places client could not be created
    #[error("Places client initialization failed: {0}")]
    Places(#[from] ApplicationError),
}

/// Build every adapter and spawn the search coordinator
///
/// Must be called from within a tokio runtime. The coordinator loads the
/// persisted favorites and requests the device location as soon as it starts.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database cannot be
/// opened, or the places client cannot be created.
pub fn build_coordinator(
    config: &AppConfig,
    location: Arc<dyn LocationPort>,
    presentation: Arc<dyn PresentationPort>,
) -> Result<SearchHandle, BootstrapError> {
    config.validate().map_err(BootstrapError::Config)?;

    let pool = Arc::new(create_pool(&config.storage)?);
    let store = Arc::new(SqliteKeyValueStore::new(pool));
    let places = Arc::new(PlacesAdapter::from_config(&PlacesConfig::from(&config.places))?);

    info!(
        storage = %config.storage.path,
        radius_meters = config.search.radius_meters,
        category = %config.search.category,
        "Starting search coordinator"
    );

    Ok(SearchCoordinator::spawn(SearchDependencies {
        places,
        location,
        favorites: Arc::new(FavoritesService::new(store)),
        presentation,
        config: config.search.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoSurface;

    impl PresentationPort for NoSurface {
        fn on_coordinate_changed(&self, _coordinate: domain::Coordinate) {}
        fn on_markers_changed(&self, _nearby: &[domain::Place], _favorites: &[domain::Place]) {}
        fn on_suggestions_changed(&self, _suggestions: &[domain::SuggestionEntry]) {}
        fn on_selection_changed(&self, _place: Option<&domain::Place>) {}
        fn on_route_changed(&self, _route: Option<domain::Route>) {}
        fn on_error(&self, _message: &str) {}
    }

    #[derive(Debug)]
    struct NoSensor;

    #[async_trait::async_trait]
    impl LocationPort for NoSensor {
        async fn request_permission(&self) -> application::PermissionStatus {
            application::PermissionStatus::Denied
        }

        async fn current_fix(
            &self,
            _accuracy: application::LocationAccuracy,
        ) -> Result<domain::Coordinate, ApplicationError> {
            Err(ApplicationError::PermissionDenied)
        }
    }

    #[tokio::test]
    async fn rejects_config_without_api_key() {
        let result = build_coordinator(&AppConfig::default(), Arc::new(NoSensor), Arc::new(NoSurface));
        assert!(matches!(result, Err(BootstrapError::Config(ref m)) if m.contains("api_key")));
    }

    #[tokio::test]
    async fn builds_with_in_memory_storage() {
        let config = AppConfig::from_toml(
            "[places]\napi_key = \"test-key\"\n[storage]\npath = \":memory:\"\nmax_connections = 1\n",
        )
        .unwrap();

        let handle = build_coordinator(&config, Arc::new(NoSensor), Arc::new(NoSurface)).unwrap();
        assert!(!handle.is_closed());
        handle.shutdown();
    }
}
