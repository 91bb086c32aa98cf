//! Places gateway port
//!
//! Uniform request/response contract over the remote places provider. Every
//! operation either returns a fully populated value or a typed failure; there is
//! no caching and no retry behind this boundary.

use async_trait::async_trait;
use domain::{Coordinate, Place, SuggestionEntry};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for places queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlacesPort: Send + Sync {
    /// Places of `category` within `radius_meters` of `center`
    ///
    /// A provider "no results" answer is an empty list, not an error. Any other
    /// non-success status is `ApplicationError::Provider`.
    async fn nearby_search(
        &self,
        center: &Coordinate,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Place>, ApplicationError>;

    /// Suggestions for partially typed text
    ///
    /// Blank input returns an empty list without a remote call.
    async fn autocomplete(&self, prefix_text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError>;

    /// Resolve a suggestion into a concrete place
    async fn resolve_details(&self, suggestion_id: &str) -> Result<Place, ApplicationError>;

    /// Resolve a free-form address into the best matching place
    async fn geocode(&self, address: &str) -> Result<Place, ApplicationError>;
}
