//! Pure search state machine
//!
//! [`SearchMachine::handle`] takes one input at a time and answers with the
//! effects the runtime has to carry out. It never blocks, never spawns, and
//! never reads the clock, so every ordering rule can be tested synchronously.

use std::{collections::HashSet, time::Duration};

use domain::{
    Coordinate, FavoriteChange, FavoriteSet, Place, PlaceId, Route, SearchSession,
    SuggestionEntry,
};
use tracing::{debug, warn};

use super::tokens::{RequestKind, RequestToken, RequestTokens};
use crate::{
    config::SearchConfig,
    error::ApplicationError,
    services::{CoordinateStore, FavoritesSnapshot},
};

/// User and system events accepted by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Search box text changed
    TextChanged(String),
    /// A suggestion from the dropdown was picked
    SuggestionSelected(String),
    /// The search button was pressed with the current text
    SearchSubmitted,
    /// Reload nearby places around a centre
    NearbyRefresh(Coordinate),
    /// A map marker was tapped
    MarkerSelected(Place),
    /// The detail panel was closed
    SelectionCleared,
    /// The favorite button was pressed for a place
    FavoriteToggled(Place),
    /// The "my location" button was pressed
    LocateRequested,
}

/// Everything the machine reacts to: external events and completions of the
/// work it previously requested
#[derive(Debug)]
pub enum Input {
    /// External event
    Event(SearchEvent),
    /// Favorites read from storage at start
    FavoritesLoaded(FavoriteSet),
    /// The debounce window elapsed
    DebounceElapsed {
        /// Token the window was scheduled with
        token: RequestToken,
    },
    /// Autocomplete finished
    AutocompleteCompleted {
        /// Token the request was issued with
        token: RequestToken,
        /// Query text the request was issued for
        text: String,
        /// Outcome
        result: Result<Vec<SuggestionEntry>, ApplicationError>,
    },
    /// Details lookup or geocode finished
    ResolutionCompleted {
        /// Token the request was issued with
        token: RequestToken,
        /// Outcome
        result: Result<Place, ApplicationError>,
    },
    /// Nearby search finished
    NearbyCompleted {
        /// Token the request was issued with
        token: RequestToken,
        /// Outcome
        result: Result<Vec<Place>, ApplicationError>,
    },
    /// Device location request finished
    LocationCompleted {
        /// Token the request was issued with
        token: RequestToken,
        /// Outcome
        result: Result<Coordinate, ApplicationError>,
    },
    /// A favorite toggle was persisted, or failed to be
    FavoriteCompleted {
        /// Place that was toggled
        place_id: PlaceId,
        /// Outcome
        result: Result<FavoriteChange, ApplicationError>,
        /// Committed favorites after the attempt
        favorites: FavoritesSnapshot,
    },
}

/// Work the runtime performs on behalf of the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start (or restart) the debounce window
    ScheduleDebounce {
        /// Token to report back with
        token: RequestToken,
        /// Window length
        delay: Duration,
    },
    /// Abort the pending debounce window
    CancelDebounce,
    /// Call autocomplete
    Autocomplete {
        /// Token to report back with
        token: RequestToken,
        /// Text to complete
        text: String,
    },
    /// Resolve a suggestion into a place
    ResolveDetails {
        /// Token to report back with
        token: RequestToken,
        /// Suggestion identifier
        suggestion_id: String,
    },
    /// Geocode free text into a place
    Geocode {
        /// Token to report back with
        token: RequestToken,
        /// Address text
        address: String,
    },
    /// Search places around a centre
    NearbySearch {
        /// Token to report back with
        token: RequestToken,
        /// Search centre
        center: Coordinate,
        /// Radius in meters
        radius_meters: u32,
        /// Place category
        category: String,
    },
    /// Request permission and a device fix
    Locate {
        /// Token to report back with
        token: RequestToken,
    },
    /// Persist the toggled favorites
    ToggleFavorite(Place),
    /// Recentre the surface
    PublishCoordinate(Coordinate),
    /// Redraw both marker layers
    PublishMarkers {
        /// Nearby layer
        nearby: Vec<Place>,
        /// Favorites layer
        favorites: Vec<Place>,
    },
    /// Redraw the suggestion dropdown
    PublishSuggestions(Vec<SuggestionEntry>),
    /// Show or hide the detail panel
    PublishSelection(Option<Place>),
    /// Draw or move the route
    PublishRoute(Option<Route>),
    /// Surface a non-fatal error
    ReportError(String),
}

/// Synchronous core of the search coordinator
#[derive(Debug)]
pub struct SearchMachine {
    config: SearchConfig,
    session: SearchSession,
    coordinates: CoordinateStore,
    favorites: FavoriteSet,
    favorites_revision: u64,
    tokens: RequestTokens,
    pending_favorites: HashSet<PlaceId>,
}

impl SearchMachine {
    /// Create a machine with an empty session
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            session: SearchSession::new(),
            coordinates: CoordinateStore::new(),
            favorites: FavoriteSet::new(),
            favorites_revision: 0,
            tokens: RequestTokens::default(),
            pending_favorites: HashSet::new(),
        }
    }

    /// Current session state
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The user's current coordinate, if known
    pub const fn current_coordinate(&self) -> Option<Coordinate> {
        self.coordinates.current()
    }

    /// Favorites as last committed
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Process one input and return the effects to execute, in order
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::Event(event) => self.on_event(event),
            Input::FavoritesLoaded(favorites) => {
                self.favorites = favorites;
                vec![self.markers()]
            },
            Input::DebounceElapsed { token } => self.on_debounce_elapsed(token),
            Input::AutocompleteCompleted {
                token,
                text,
                result,
            } => self.on_autocomplete(token, &text, result),
            Input::ResolutionCompleted { token, result } => self.on_resolution(token, result),
            Input::NearbyCompleted { token, result } => self.on_nearby(token, result),
            Input::LocationCompleted { token, result } => self.on_location(token, result),
            Input::FavoriteCompleted {
                place_id,
                result,
                favorites,
            } => self.on_favorite(&place_id, result, favorites),
        }
    }

    fn on_event(&mut self, event: SearchEvent) -> Vec<Effect> {
        match event {
            SearchEvent::TextChanged(text) => self.on_text_changed(text),
            SearchEvent::SuggestionSelected(suggestion_id) => {
                let token = self.begin_resolution();
                vec![
                    Effect::CancelDebounce,
                    Effect::ResolveDetails {
                        token,
                        suggestion_id,
                    },
                ]
            },
            SearchEvent::SearchSubmitted => {
                if self.session.query_is_blank() {
                    debug!("Ignoring search for empty query");
                    return Vec::new();
                }
                let token = self.begin_resolution();
                vec![
                    Effect::CancelDebounce,
                    Effect::Geocode {
                        token,
                        address: self.session.query_text().trim().to_string(),
                    },
                ]
            },
            SearchEvent::NearbyRefresh(center) => vec![self.refresh_nearby(center)],
            SearchEvent::MarkerSelected(place) => {
                self.take_session(|s| s.focused(place));
                let mut effects = vec![Effect::PublishSelection(
                    self.session.selected_place().cloned(),
                )];
                effects.extend(self.route());
                effects
            },
            SearchEvent::SelectionCleared => {
                self.take_session(SearchSession::unfocused);
                vec![Effect::PublishSelection(None)]
            },
            SearchEvent::FavoriteToggled(place) => {
                if !self.pending_favorites.insert(place.id.clone()) {
                    debug!(place_id = %place.id, "Favorite save in flight, ignoring repeat toggle");
                    return Vec::new();
                }
                vec![Effect::ToggleFavorite(place)]
            },
            SearchEvent::LocateRequested => {
                let token = self.tokens.issue(RequestKind::Location);
                vec![Effect::Locate { token }]
            },
        }
    }

    fn on_text_changed(&mut self, text: String) -> Vec<Effect> {
        self.take_session(|s| s.with_query(text));

        if self.session.query_is_blank() {
            self.tokens.supersede(RequestKind::Debounce);
            self.tokens.supersede(RequestKind::Autocomplete);
            self.take_session(|s| s.with_suggestions(Vec::new()));
            return vec![Effect::CancelDebounce, Effect::PublishSuggestions(Vec::new())];
        }

        // Typing replaces any lookup still in flight
        self.tokens.supersede(RequestKind::Resolution);

        let token = self.tokens.issue(RequestKind::Debounce);
        vec![Effect::ScheduleDebounce {
            token,
            delay: self.config.debounce(),
        }]
    }

    fn on_debounce_elapsed(&mut self, token: RequestToken) -> Vec<Effect> {
        if !self.tokens.is_latest(RequestKind::Debounce, token) {
            debug!(%token, "Debounce window superseded");
            return Vec::new();
        }
        if self.session.query_is_blank() {
            return Vec::new();
        }

        let token = self.tokens.issue(RequestKind::Autocomplete);
        vec![Effect::Autocomplete {
            token,
            text: self.session.query_text().to_string(),
        }]
    }

    fn on_autocomplete(
        &mut self,
        token: RequestToken,
        text: &str,
        result: Result<Vec<SuggestionEntry>, ApplicationError>,
    ) -> Vec<Effect> {
        if !self.tokens.is_latest(RequestKind::Autocomplete, token)
            || self.session.query_text() != text
        {
            debug!(%token, "Discarding stale autocomplete result");
            return Vec::new();
        }

        match result {
            Ok(suggestions) => {
                self.take_session(|s| s.with_suggestions(suggestions));
                vec![Effect::PublishSuggestions(
                    self.session.suggestions().to_vec(),
                )]
            },
            Err(e) => vec![report(&e)],
        }
    }

    fn on_resolution(
        &mut self,
        token: RequestToken,
        result: Result<Place, ApplicationError>,
    ) -> Vec<Effect> {
        if !self.tokens.is_latest(RequestKind::Resolution, token) {
            debug!(%token, "Discarding stale resolution");
            return Vec::new();
        }

        match result {
            Ok(place) => {
                self.tokens.supersede(RequestKind::Debounce);
                self.tokens.supersede(RequestKind::Autocomplete);
                self.take_session(|s| s.resolved(&place));
                self.coordinates.set_current(place.coordinate);

                let mut effects = vec![
                    Effect::CancelDebounce,
                    Effect::PublishSuggestions(Vec::new()),
                    Effect::PublishCoordinate(place.coordinate),
                ];
                effects.extend(self.route());
                effects.push(self.refresh_nearby(place.coordinate));
                effects
            },
            Err(e) => vec![report(&e)],
        }
    }

    fn on_nearby(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Place>, ApplicationError>,
    ) -> Vec<Effect> {
        if !self.tokens.is_latest(RequestKind::Nearby, token) {
            debug!(%token, "Discarding stale nearby results");
            return Vec::new();
        }

        match result {
            Ok(places) => {
                debug!(count = places.len(), "Nearby results replaced");
                self.take_session(|s| s.with_nearby(places));
                vec![self.markers()]
            },
            Err(e) => vec![report(&e)],
        }
    }

    fn on_location(
        &mut self,
        token: RequestToken,
        result: Result<Coordinate, ApplicationError>,
    ) -> Vec<Effect> {
        if !self.tokens.is_latest(RequestKind::Location, token) {
            debug!(%token, "Discarding stale location fix");
            return Vec::new();
        }

        match result {
            Ok(coordinate) => {
                self.coordinates.set_current(coordinate);
                self.take_session(|s| s.located(coordinate));

                let mut effects = vec![Effect::PublishCoordinate(coordinate)];
                effects.extend(self.route());
                effects.push(self.refresh_nearby(coordinate));
                effects
            },
            Err(e) => {
                let mut effects = vec![report(&e)];
                if self.coordinates.current().is_none() {
                    effects.push(Effect::PublishCoordinate(self.config.fallback_coordinate));
                }
                effects
            },
        }
    }

    fn on_favorite(
        &mut self,
        place_id: &PlaceId,
        result: Result<FavoriteChange, ApplicationError>,
        snapshot: FavoritesSnapshot,
    ) -> Vec<Effect> {
        self.pending_favorites.remove(place_id);

        let mut effects = Vec::new();
        match &result {
            Ok(change) => debug!(%place_id, ?change, "Favorite committed"),
            Err(e) => effects.push(report(e)),
        }

        if snapshot.revision > self.favorites_revision {
            self.favorites_revision = snapshot.revision;
            self.favorites = snapshot.favorites;
            effects.push(self.markers());
        } else if result.is_ok() {
            debug!(revision = snapshot.revision, "Newer favorites already shown");
        }
        effects
    }

    /// Supersede any typing in progress and issue a new resolution token
    fn begin_resolution(&mut self) -> RequestToken {
        self.tokens.supersede(RequestKind::Debounce);
        self.tokens.supersede(RequestKind::Autocomplete);
        self.tokens.issue(RequestKind::Resolution)
    }

    fn refresh_nearby(&mut self, center: Coordinate) -> Effect {
        Effect::NearbySearch {
            token: self.tokens.issue(RequestKind::Nearby),
            center,
            radius_meters: self.config.radius_meters,
            category: self.config.category.clone(),
        }
    }

    fn markers(&self) -> Effect {
        Effect::PublishMarkers {
            nearby: self.session.nearby_results().to_vec(),
            favorites: self.favorites.as_slice().to_vec(),
        }
    }

    fn route(&self) -> Option<Effect> {
        self.session
            .route_from(self.coordinates.current())
            .map(|route| Effect::PublishRoute(Some(route)))
    }

    fn take_session(&mut self, f: impl FnOnce(SearchSession) -> SearchSession) {
        self.session = f(std::mem::take(&mut self.session));
    }
}

fn report(error: &ApplicationError) -> Effect {
    warn!(error = %error, "Search request failed");
    Effect::ReportError(error.to_string())
}
