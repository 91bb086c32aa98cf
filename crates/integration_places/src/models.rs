//! Places API response schemas
//!
//! Explicit serde types for the four endpoints. Required fields are non-optional
//! so that a response missing them fails to decode rather than producing a
//! partially populated place.

use std::fmt;

use domain::{Coordinate, Place, PlaceId, SuggestionEntry};
use serde::Deserialize;

use crate::error::PlacesError;

/// Status code reported in every places API envelope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderStatus {
    /// Request succeeded with results
    Ok,
    /// Request succeeded but nothing matched
    ZeroResults,
    /// Quota or rate exceeded
    OverQueryLimit,
    /// Key missing, invalid, or not authorized for the API
    RequestDenied,
    /// Missing or malformed parameters
    InvalidRequest,
    /// Referenced place id no longer exists
    NotFound,
    /// Transient server-side error
    UnknownError,
    /// Any status this client does not know
    Other(String),
}

impl ProviderStatus {
    /// Parse the provider's status string
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "NOT_FOUND" => Self::NotFound,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Other(other.to_string()),
        }
    }

    /// Provider wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(s) => s,
        }
    }

    /// Check the status of a list endpoint, where `ZERO_RESULTS` means an empty list
    ///
    /// Returns `true` if results should be read, `false` for an empty answer.
    pub(crate) fn check_list(
        status: &str,
        message: Option<String>,
    ) -> Result<bool, PlacesError> {
        match Self::parse(status) {
            Self::Ok => Ok(true),
            Self::ZeroResults => Ok(false),
            other => Err(other.into_error(message)),
        }
    }

    /// Check the status of a single-result endpoint, where only `OK` is success
    pub(crate) fn check_single(status: &str, message: Option<String>) -> Result<(), PlacesError> {
        match Self::parse(status) {
            Self::Ok => Ok(()),
            other => Err(other.into_error(message)),
        }
    }

    fn into_error(self, message: Option<String>) -> PlacesError {
        PlacesError::ProviderStatus {
            status: self.as_str().to_string(),
            message,
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    pub result: Option<RawPlace>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawGeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub place_id: String,
    pub name: String,
    pub geometry: RawGeometry,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPrediction {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodeResult {
    pub place_id: String,
    pub formatted_address: String,
    pub geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    pub location: RawLatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl RawLatLng {
    fn to_coordinate(&self) -> Result<Coordinate, PlacesError> {
        Coordinate::new(self.lat, self.lng).map_err(|e| PlacesError::ParseError(e.to_string()))
    }
}

fn parse_place_id(id: String) -> Result<PlaceId, PlacesError> {
    PlaceId::parse(id).map_err(|e| PlacesError::ParseError(e.to_string()))
}

impl TryFrom<RawPlace> for Place {
    type Error = PlacesError;

    fn try_from(raw: RawPlace) -> Result<Self, Self::Error> {
        let coordinate = raw.geometry.location.to_coordinate()?;
        let address = raw
            .vicinity
            .or(raw.formatted_address)
            .unwrap_or_default();

        Ok(Self {
            id: parse_place_id(raw.place_id)?,
            name: raw.name,
            coordinate,
            address,
            rating: raw.rating,
        })
    }
}

impl TryFrom<RawGeocodeResult> for Place {
    type Error = PlacesError;

    fn try_from(raw: RawGeocodeResult) -> Result<Self, Self::Error> {
        let coordinate = raw.geometry.location.to_coordinate()?;
        Ok(Self {
            id: parse_place_id(raw.place_id)?,
            name: raw.formatted_address.clone(),
            coordinate,
            address: raw.formatted_address,
            rating: None,
        })
    }
}

impl From<RawPrediction> for SuggestionEntry {
    fn from(raw: RawPrediction) -> Self {
        Self::new(raw.place_id, raw.description)
    }
}
