//! Presentation surface port
//!
//! Out-bound callbacks from the coordinator to whatever renders the map. Calls
//! are made from the coordinator task and must not block.

use domain::{Coordinate, Place, Route, SuggestionEntry};

/// Port for the map rendering surface
pub trait PresentationPort: Send + Sync {
    /// Recenter the map on `coordinate`
    fn on_coordinate_changed(&self, coordinate: Coordinate);

    /// Replace both marker layers
    fn on_markers_changed(&self, nearby: &[Place], favorites: &[Place]);

    /// Replace the suggestion dropdown
    fn on_suggestions_changed(&self, suggestions: &[SuggestionEntry]);

    /// Show or hide the detail panel
    fn on_selection_changed(&self, place: Option<&Place>);

    /// Draw, move or remove the driving route
    fn on_route_changed(&self, route: Option<Route>);

    /// Show a non-fatal error notification
    fn on_error(&self, message: &str);
}
