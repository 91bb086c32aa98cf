//! Google Places web service client
//!
//! Provides nearby search, autocomplete, place details and geocoding using the
//! JSON endpoints under `maps/api`. The API key travels as the `key` query
//! parameter and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, Place, SuggestionEntry};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::PlacesConfig;
use crate::error::PlacesError;
use crate::models::{
    AutocompleteResponse, DetailsResponse, GeocodeResponse, NearbySearchResponse, ProviderStatus,
};

/// Fields requested from the details endpoint
const DETAILS_FIELDS: &str = "place_id,name,geometry,formatted_address,rating";

/// Trait for places service clients
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Search for places of a category within `radius_meters` of `center`
    async fn nearby_search(
        &self,
        center: &Coordinate,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError>;

    /// Suggest places for a partially typed query
    ///
    /// Blank input returns an empty list without a request.
    async fn autocomplete(&self, input: &str) -> Result<Vec<SuggestionEntry>, PlacesError>;

    /// Resolve a place id (e.g., from a suggestion) into a full place
    async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError>;

    /// Resolve a free-form address into the best matching place
    async fn geocode(&self, address: &str) -> Result<Place, PlacesError>;
}

/// Places client backed by the Google Maps Platform web service
#[derive(Debug)]
pub struct GooglePlacesClient {
    client: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    /// Create a new places client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        config.validate().map_err(PlacesError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("VetMap/0.1")
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Issue a GET against `endpoint` and return the body
    ///
    /// Appends the API key and language to `params`.
    async fn get(
        &self,
        endpoint: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<String, PlacesError> {
        let url = format!("{}/{endpoint}", self.config.base_url);
        params.push(("key", self.config.api_key.clone()));
        params.push(("language", self.config.language.clone()));

        debug!(%endpoint, "Querying places service");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::RequestFailed(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| self.transport_error(&e))
    }

    fn transport_error(&self, e: &reqwest::Error) -> PlacesError {
        if e.is_timeout() {
            PlacesError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            PlacesError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse a nearby-search body into places
    fn parse_nearby_response(body: &str) -> Result<Vec<Place>, PlacesError> {
        let raw: NearbySearchResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        if !ProviderStatus::check_list(&raw.status, raw.error_message)? {
            return Ok(Vec::new());
        }

        raw.results.into_iter().map(Place::try_from).collect()
    }

    /// Parse an autocomplete body into suggestions
    fn parse_autocomplete_response(body: &str) -> Result<Vec<SuggestionEntry>, PlacesError> {
        let raw: AutocompleteResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        if !ProviderStatus::check_list(&raw.status, raw.error_message)? {
            return Ok(Vec::new());
        }

        Ok(raw
            .predictions
            .into_iter()
            .map(SuggestionEntry::from)
            .collect())
    }

    /// Parse a details body into a place
    fn parse_details_response(body: &str) -> Result<Place, PlacesError> {
        let raw: DetailsResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        ProviderStatus::check_single(&raw.status, raw.error_message)?;

        raw.result
            .ok_or_else(|| PlacesError::ParseError("details response without result".to_string()))
            .and_then(Place::try_from)
    }

    /// Parse a geocode body into the first matching place
    fn parse_geocode_response(body: &str) -> Result<Place, PlacesError> {
        let raw: GeocodeResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        ProviderStatus::check_single(&raw.status, raw.error_message)?;

        raw.results
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::ParseError("geocode response without results".to_string()))
            .and_then(Place::try_from)
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    #[instrument(skip(self), fields(center = %center))]
    async fn nearby_search(
        &self,
        center: &Coordinate,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let params = vec![
            ("location", center.to_query_param()),
            ("radius", radius_meters.to_string()),
            ("type", category.to_string()),
        ];

        let body = self.get("place/nearbysearch/json", params).await?;
        let places = Self::parse_nearby_response(&body)?;

        if places.is_empty() {
            warn!("No nearby places found");
        }

        debug!(count = places.len(), "Nearby places found");
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn autocomplete(&self, input: &str) -> Result<Vec<SuggestionEntry>, PlacesError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .get("place/autocomplete/json", vec![("input", input.to_string())])
            .await?;
        let suggestions = Self::parse_autocomplete_response(&body)?;

        debug!(count = suggestions.len(), "Suggestions found");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError> {
        if place_id.trim().is_empty() {
            return Err(PlacesError::InvalidInput(
                "Place id must not be empty".to_string(),
            ));
        }

        let params = vec![
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
        ];

        let body = self.get("place/details/json", params).await?;
        let place = Self::parse_details_response(&body)?;

        debug!(id = %place.id, name = %place.name, "Resolved place details");
        Ok(place)
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Place, PlacesError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(PlacesError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }

        let body = self
            .get("geocode/json", vec![("address", address.to_string())])
            .await?;
        let place = Self::parse_geocode_response(&body)?;

        debug!(coordinate = %place.coordinate, "Geocoded address");
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nearby_response() {
        let json = r#"{
            "html_attributions": [],
            "results": [
                {
                    "place_id": "ChIJ-vet-1",
                    "name": "Haneul Animal Hospital",
                    "geometry": { "location": { "lat": 37.5651, "lng": 126.9895 } },
                    "vicinity": "12 Eulji-ro, Jung-gu",
                    "rating": 4.6,
                    "types": ["veterinary_care", "point_of_interest"]
                },
                {
                    "place_id": "ChIJ-vet-2",
                    "name": "Mapo Pet Clinic",
                    "geometry": { "location": { "lat": 37.5536, "lng": 126.9143 } },
                    "vicinity": "3 Yanghwa-ro, Mapo-gu"
                }
            ],
            "status": "OK"
        }"#;

        let places = GooglePlacesClient::parse_nearby_response(json).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id.as_str(), "ChIJ-vet-1");
        assert_eq!(places[0].name, "Haneul Animal Hospital");
        assert_eq!(places[0].address, "12 Eulji-ro, Jung-gu");
        assert_eq!(places[0].rating, Some(4.6));
        assert!((places[0].coordinate.latitude() - 37.5651).abs() < 1e-9);
        assert_eq!(places[1].rating, None);
    }

    #[test]
    fn test_parse_nearby_zero_results() {
        let json = r#"{ "html_attributions": [], "results": [], "status": "ZERO_RESULTS" }"#;
        let places = GooglePlacesClient::parse_nearby_response(json).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_parse_nearby_over_query_limit() {
        let json = r#"{
            "results": [],
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API."
        }"#;
        let err = GooglePlacesClient::parse_nearby_response(json).unwrap_err();
        match err {
            PlacesError::ProviderStatus { status, message } => {
                assert_eq!(status, "OVER_QUERY_LIMIT");
                assert!(message.unwrap().contains("quota"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_nearby_missing_name_is_rejected() {
        let json = r#"{
            "results": [{
                "place_id": "p1",
                "geometry": { "location": { "lat": 37.5, "lng": 127.0 } }
            }],
            "status": "OK"
        }"#;
        assert!(matches!(
            GooglePlacesClient::parse_nearby_response(json),
            Err(PlacesError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_missing_status_is_rejected() {
        assert!(GooglePlacesClient::parse_nearby_response(r#"{ "results": [] }"#).is_err());
        assert!(GooglePlacesClient::parse_autocomplete_response(r#"{ "predictions": [] }"#).is_err());
    }

    #[test]
    fn test_parse_autocomplete_response() {
        let json = r#"{
            "predictions": [
                { "description": "Seoul, South Korea", "place_id": "ChIJzWXFYYuifDUR64Pq5LTtioU" },
                { "description": "Seoul Station, Yongsan-gu", "place_id": "ChIJ-station" }
            ],
            "status": "OK"
        }"#;
        let suggestions = GooglePlacesClient::parse_autocomplete_response(json).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].id, "ChIJzWXFYYuifDUR64Pq5LTtioU");
        assert_eq!(suggestions[0].description, "Seoul, South Korea");
    }

    #[test]
    fn test_parse_autocomplete_zero_results() {
        let json = r#"{ "predictions": [], "status": "ZERO_RESULTS" }"#;
        assert!(
            GooglePlacesClient::parse_autocomplete_response(json)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_details_response() {
        let json = r#"{
            "html_attributions": [],
            "result": {
                "place_id": "ChIJ-vet-1",
                "name": "Haneul Animal Hospital",
                "formatted_address": "12 Eulji-ro, Jung-gu, Seoul",
                "geometry": { "location": { "lat": 37.5651, "lng": 126.9895 } },
                "rating": 4.6
            },
            "status": "OK"
        }"#;
        let place = GooglePlacesClient::parse_details_response(json).unwrap();
        assert_eq!(place.name, "Haneul Animal Hospital");
        assert_eq!(place.address, "12 Eulji-ro, Jung-gu, Seoul");
    }

    #[test]
    fn test_parse_details_not_found() {
        let json = r#"{ "html_attributions": [], "status": "NOT_FOUND" }"#;
        assert!(matches!(
            GooglePlacesClient::parse_details_response(json),
            Err(PlacesError::ProviderStatus { ref status, .. }) if status == "NOT_FOUND"
        ));
    }

    #[test]
    fn test_parse_details_ok_without_result() {
        let json = r#"{ "status": "OK" }"#;
        assert!(matches!(
            GooglePlacesClient::parse_details_response(json),
            Err(PlacesError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_geocode_response_takes_first() {
        let json = r#"{
            "results": [
                {
                    "place_id": "g1",
                    "formatted_address": "Gangnam-gu, Seoul, South Korea",
                    "geometry": { "location": { "lat": 37.5172, "lng": 127.0473 } }
                },
                {
                    "place_id": "g2",
                    "formatted_address": "Gangnam Station, Seoul",
                    "geometry": { "location": { "lat": 37.4979, "lng": 127.0276 } }
                }
            ],
            "status": "OK"
        }"#;
        let place = GooglePlacesClient::parse_geocode_response(json).unwrap();
        assert_eq!(place.id.as_str(), "g1");
    }

    #[test]
    fn test_parse_geocode_zero_results_is_error() {
        let json = r#"{ "results": [], "status": "ZERO_RESULTS" }"#;
        assert!(matches!(
            GooglePlacesClient::parse_geocode_response(json),
            Err(PlacesError::ProviderStatus { ref status, .. }) if status == "ZERO_RESULTS"
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(GooglePlacesClient::parse_nearby_response("not json").is_err());
    }

    #[test]
    fn test_new_rejects_missing_key() {
        let result = GooglePlacesClient::new(&PlacesConfig::default());
        assert!(matches!(result, Err(PlacesError::ConfigurationError(_))));
    }
}
