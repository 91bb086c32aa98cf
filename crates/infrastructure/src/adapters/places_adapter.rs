//! Places adapter - Implements PlacesPort using integration_places

use std::sync::Arc;

use application::{error::ApplicationError, ports::PlacesPort};
use async_trait::async_trait;
use domain::{Coordinate, DomainError, Place, SuggestionEntry};
use integration_places::{GooglePlacesClient, PlacesClient, PlacesConfig, PlacesError};
use tracing::{debug, instrument, warn};

/// Adapter for the places provider
pub struct PlacesAdapter {
    client: Arc<dyn PlacesClient>,
}

impl std::fmt::Debug for PlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesAdapter").finish_non_exhaustive()
    }
}

impl PlacesAdapter {
    /// Wrap an existing places client
    pub fn new(client: Arc<dyn PlacesClient>) -> Self {
        Self { client }
    }

    /// Build the Google Places client from configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the client cannot be created.
    pub fn from_config(config: &PlacesConfig) -> Result<Self, ApplicationError> {
        let client = GooglePlacesClient::new(config).map_err(map_places_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Map an integration error to an application-layer error
fn map_places_error(e: PlacesError) -> ApplicationError {
    match e {
        PlacesError::ConnectionFailed(_)
        | PlacesError::RequestFailed(_)
        | PlacesError::Timeout { .. } => ApplicationError::Network(e.to_string()),
        PlacesError::ProviderStatus { status, message } => {
            if let Some(message) = message {
                warn!(%status, %message, "Places provider rejected request");
            }
            ApplicationError::Provider { status }
        },
        PlacesError::ParseError(msg) => ApplicationError::MalformedResponse(msg),
        PlacesError::InvalidInput(msg) => DomainError::ValidationError(msg).into(),
        PlacesError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
    }
}

#[async_trait]
impl PlacesPort for PlacesAdapter {
    #[instrument(skip(self))]
    async fn nearby_search(
        &self,
        center: &Coordinate,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Place>, ApplicationError> {
        let places = self
            .client
            .nearby_search(center, radius_meters, category)
            .await
            .map_err(map_places_error)?;

        debug!(count = places.len(), "Nearby search complete");
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn autocomplete(
        &self,
        prefix_text: &str,
    ) -> Result<Vec<SuggestionEntry>, ApplicationError> {
        if prefix_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.client
            .autocomplete(prefix_text)
            .await
            .map_err(map_places_error)
    }

    #[instrument(skip(self))]
    async fn resolve_details(&self, suggestion_id: &str) -> Result<Place, ApplicationError> {
        self.client
            .place_details(suggestion_id)
            .await
            .map_err(map_places_error)
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Place, ApplicationError> {
        self.client.geocode(address).await.map_err(map_places_error)
    }
}

#[cfg(test)]
mod tests {
    use domain::PlaceId;
    use mockall::mock;

    use super::*;

    mock! {
        Client {}

        #[async_trait]
        impl PlacesClient for Client {
            async fn nearby_search(
                &self,
                center: &Coordinate,
                radius_meters: u32,
                category: &str,
            ) -> Result<Vec<Place>, PlacesError>;
            async fn autocomplete(&self, input: &str) -> Result<Vec<SuggestionEntry>, PlacesError>;
            async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError>;
            async fn geocode(&self, address: &str) -> Result<Place, PlacesError>;
        }
    }

    fn clinic() -> Place {
        Place::new(
            PlaceId::parse("p1").unwrap(),
            "Haemaru Animal Hospital",
            Coordinate::new(37.3595, 127.1052).unwrap(),
            "Bundang-gu",
        )
    }

    fn adapter(client: MockClient) -> PlacesAdapter {
        PlacesAdapter::new(Arc::new(client))
    }

    #[tokio::test]
    async fn nearby_passes_arguments_through() {
        let mut client = MockClient::new();
        client
            .expect_nearby_search()
            .withf(|center, radius, category| {
                *center == Coordinate::fallback() && *radius == 5000 && category == "veterinary_care"
            })
            .returning(|_, _, _| Ok(vec![clinic()]));

        let places = adapter(client)
            .nearby_search(&Coordinate::fallback(), 5000, "veterinary_care")
            .await
            .unwrap();
        assert_eq!(places, vec![clinic()]);
    }

    #[tokio::test]
    async fn blank_autocomplete_skips_client() {
        let mut client = MockClient::new();
        client.expect_autocomplete().never();

        let suggestions = adapter(client).autocomplete("  ").await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn provider_status_maps_to_provider_error() {
        let mut client = MockClient::new();
        client.expect_nearby_search().returning(|_, _, _| {
            Err(PlacesError::ProviderStatus {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: Some("quota".to_string()),
            })
        });

        let err = adapter(client)
            .nearby_search(&Coordinate::fallback(), 5000, "veterinary_care")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Provider { ref status } if status == "OVER_QUERY_LIMIT"));
    }

    #[tokio::test]
    async fn timeout_maps_to_network_error() {
        let mut client = MockClient::new();
        client
            .expect_place_details()
            .returning(|_| Err(PlacesError::Timeout { timeout_secs: 10 }));

        let err = adapter(client).resolve_details("s1").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Network(_)));
    }

    #[tokio::test]
    async fn parse_error_maps_to_malformed_response() {
        let mut client = MockClient::new();
        client
            .expect_geocode()
            .returning(|_| Err(PlacesError::ParseError("missing geometry".to_string())));

        let err = adapter(client).geocode("Seoul").await.unwrap_err();
        assert!(matches!(err, ApplicationError::MalformedResponse(ref m) if m == "missing geometry"));
    }

    #[test]
    fn error_mapping_table() {
        assert!(matches!(
            map_places_error(PlacesError::ConnectionFailed("refused".to_string())),
            ApplicationError::Network(_)
        ));
        assert!(matches!(
            map_places_error(PlacesError::RequestFailed("HTTP 500".to_string())),
            ApplicationError::Network(_)
        ));
        assert!(matches!(
            map_places_error(PlacesError::InvalidInput("empty id".to_string())),
            ApplicationError::Domain(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            map_places_error(PlacesError::ConfigurationError("no key".to_string())),
            ApplicationError::Configuration(_)
        ));
    }

    #[test]
    fn from_config_rejects_missing_key() {
        let err = PlacesAdapter::from_config(&PlacesConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}
