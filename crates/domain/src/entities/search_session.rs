//! Search session state
//!
//! The session is a value: every transition consumes it and returns the next
//! state, so a half-applied update is never observable.

use serde::{Deserialize, Serialize};

use super::place::{Place, SuggestionEntry};
use crate::value_objects::Coordinate;

/// A driving route between the user's coordinate and a selected place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Where the route starts (the user's current coordinate)
    pub origin: Coordinate,
    /// Where the route ends (the selected place)
    pub destination: Coordinate,
}

/// View state of one search screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    query_text: String,
    suggestions: Vec<SuggestionEntry>,
    resolved_coordinate: Option<Coordinate>,
    nearby_results: Vec<Place>,
    selected_place: Option<Place>,
    route_destination: Option<Coordinate>,
}

impl SearchSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of the search box
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Whether the query is blank after trimming
    #[must_use]
    pub fn query_is_blank(&self) -> bool {
        self.query_text.trim().is_empty()
    }

    /// Current suggestion list
    #[must_use]
    pub fn suggestions(&self) -> &[SuggestionEntry] {
        &self.suggestions
    }

    /// Coordinate confirmed by a resolution or a device fix
    #[must_use]
    pub const fn resolved_coordinate(&self) -> Option<Coordinate> {
        self.resolved_coordinate
    }

    /// Places returned by the last successful nearby search
    #[must_use]
    pub fn nearby_results(&self) -> &[Place] {
        &self.nearby_results
    }

    /// Place shown in the detail panel
    #[must_use]
    pub const fn selected_place(&self) -> Option<&Place> {
        self.selected_place.as_ref()
    }

    /// Destination of the route, if a marker has been selected
    #[must_use]
    pub const fn route_destination(&self) -> Option<Coordinate> {
        self.route_destination
    }

    /// Replace the query text
    #[must_use]
    pub fn with_query(self, text: impl Into<String>) -> Self {
        Self {
            query_text: text.into(),
            ..self
        }
    }

    /// Replace the suggestion list
    #[must_use]
    pub fn with_suggestions(self, suggestions: Vec<SuggestionEntry>) -> Self {
        Self {
            suggestions,
            ..self
        }
    }

    /// Apply a resolved place: query becomes its name, suggestions clear,
    /// and its coordinate becomes the resolved coordinate
    #[must_use]
    pub fn resolved(self, place: &Place) -> Self {
        Self {
            query_text: place.name.clone(),
            suggestions: Vec::new(),
            resolved_coordinate: Some(place.coordinate),
            ..self
        }
    }

    /// Apply a device location fix
    #[must_use]
    pub fn located(self, coordinate: Coordinate) -> Self {
        Self {
            resolved_coordinate: Some(coordinate),
            ..self
        }
    }

    /// Replace the nearby results wholesale
    #[must_use]
    pub fn with_nearby(self, places: Vec<Place>) -> Self {
        Self {
            nearby_results: places,
            ..self
        }
    }

    /// Focus a place: select it and route to it
    #[must_use]
    pub fn focused(self, place: Place) -> Self {
        Self {
            route_destination: Some(place.coordinate),
            selected_place: Some(place),
            ..self
        }
    }

    /// Close the detail panel; the route is kept
    #[must_use]
    pub fn unfocused(self) -> Self {
        Self {
            selected_place: None,
            ..self
        }
    }

    /// Route from `origin` to the current destination, if there is one
    #[must_use]
    pub fn route_from(&self, origin: Option<Coordinate>) -> Option<Route> {
        Some(Route {
            origin: origin?,
            destination: self.route_destination?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::PlaceId;

    fn clinic() -> Place {
        Place::new(
            PlaceId::parse("p1").unwrap(),
            "Seoul Animal Medical Center",
            Coordinate::new(37.55, 126.99).unwrap(),
            "Yongsan-gu",
        )
    }

    #[test]
    fn new_session_is_empty() {
        let session = SearchSession::new();
        assert!(session.query_is_blank());
        assert!(session.suggestions().is_empty());
        assert!(session.resolved_coordinate().is_none());
        assert!(session.nearby_results().is_empty());
        assert!(session.selected_place().is_none());
        assert!(session.route_destination().is_none());
    }

    #[test]
    fn resolved_replaces_query_and_clears_suggestions() {
        let session = SearchSession::new()
            .with_query("seoul ani")
            .with_suggestions(vec![SuggestionEntry::new("s1", "Seoul Animal")])
            .resolved(&clinic());

        assert_eq!(session.query_text(), "Seoul Animal Medical Center");
        assert!(session.suggestions().is_empty());
        assert_eq!(session.resolved_coordinate(), Some(clinic().coordinate));
    }

    #[test]
    fn focus_sets_route_destination() {
        let session = SearchSession::new().focused(clinic());
        assert_eq!(session.selected_place(), Some(&clinic()));
        assert_eq!(session.route_destination(), Some(clinic().coordinate));
    }

    #[test]
    fn unfocus_keeps_route() {
        let session = SearchSession::new().focused(clinic()).unfocused();
        assert!(session.selected_place().is_none());
        assert!(session.route_destination().is_some());
    }

    #[test]
    fn route_requires_origin_and_destination() {
        let origin = Coordinate::new(37.5, 127.0).unwrap();
        let session = SearchSession::new();
        assert!(session.route_from(Some(origin)).is_none());

        let session = session.focused(clinic());
        assert!(session.route_from(None).is_none());
        assert_eq!(
            session.route_from(Some(origin)),
            Some(Route {
                origin,
                destination: clinic().coordinate
            })
        );
    }

    #[test]
    fn blank_query_detection() {
        assert!(SearchSession::new().with_query("   ").query_is_blank());
        assert!(!SearchSession::new().with_query(" a ").query_is_blank());
    }
}
