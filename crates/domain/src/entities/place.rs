//! Places and autocomplete suggestions

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, PlaceId};

/// A point of interest identified by the places provider
///
/// Identity is the [`PlaceId`]: two places with the same id are the same place,
/// even if name, address or rating differ between fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider-assigned identifier
    pub id: PlaceId,
    /// Display name
    pub name: String,
    /// Location of the place
    pub coordinate: Coordinate,
    /// Short address (vicinity or formatted address)
    pub address: String,
    /// Average user rating, if the provider has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Place {
    /// Create a place without a rating
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        coordinate: Coordinate,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            address: address.into(),
            rating: None,
        }
    }

    /// Set the rating
    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Whether both values refer to the same provider place
    #[must_use]
    pub fn same_place(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Rating formatted for the detail panel, or a placeholder
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating
            .map_or_else(|| "No rating".to_string(), |r| format!("{r:.1}"))
    }
}

/// A lightweight autocomplete entry, resolved into a [`Place`] on selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    /// Provider id used for the details lookup
    pub id: String,
    /// Human-readable description shown in the suggestion list
    pub description: String,
}

impl SuggestionEntry {
    /// Create a suggestion entry
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
