//! Search coordinator
//!
//! Turns typed text or a device fix into a confirmed coordinate, then into
//! favorite-aware markers and an optional route.
//!
//! The decision logic lives in [`SearchMachine`]. [`SearchCoordinator`] runs it
//! inside one tokio task: external events and completions of spawned work are
//! fed to the machine strictly one at a time, and the returned effects are
//! executed against the ports.

mod debounce;
mod machine;
mod tokens;

use std::{future::Future, sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use self::debounce::DebounceTimer;
pub use self::{
    machine::{Effect, Input, SearchEvent, SearchMachine},
    tokens::{RequestKind, RequestToken},
};
use crate::{
    config::SearchConfig,
    error::ApplicationError,
    ports::{LocationAccuracy, LocationPort, PermissionStatus, PlacesPort, PresentationPort},
    services::FavoritesService,
};

/// Collaborators of the coordinator
#[derive(Clone)]
pub struct SearchDependencies {
    /// Remote places gateway
    pub places: Arc<dyn PlacesPort>,
    /// Device location sensor
    pub location: Arc<dyn LocationPort>,
    /// Persisted favorites
    pub favorites: Arc<FavoritesService>,
    /// Rendering surface
    pub presentation: Arc<dyn PresentationPort>,
    /// Tunables
    pub config: SearchConfig,
}

impl std::fmt::Debug for SearchDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchDependencies")
            .field("favorites", &self.favorites)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum Command {
    Event(SearchEvent),
    Shutdown,
}

/// Cloneable handle for sending events to a running coordinator
///
/// The coordinator stops once every handle is dropped or [`shutdown`](Self::shutdown)
/// is called.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SearchHandle {
    /// Send an event to the coordinator
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the coordinator has stopped.
    pub fn send(&self, event: SearchEvent) -> Result<(), ApplicationError> {
        self.commands
            .send(Command::Event(event))
            .map_err(|_| ApplicationError::Internal("Search coordinator has stopped".to_string()))
    }

    /// The search box text changed
    pub fn text_changed(&self, text: impl Into<String>) -> Result<(), ApplicationError> {
        self.send(SearchEvent::TextChanged(text.into()))
    }

    /// A suggestion was picked from the dropdown
    pub fn select_suggestion(&self, suggestion_id: impl Into<String>) -> Result<(), ApplicationError> {
        self.send(SearchEvent::SuggestionSelected(suggestion_id.into()))
    }

    /// The search button was pressed
    pub fn submit_search(&self) -> Result<(), ApplicationError> {
        self.send(SearchEvent::SearchSubmitted)
    }

    /// Reload nearby places around `center`
    pub fn refresh_nearby(&self, center: domain::Coordinate) -> Result<(), ApplicationError> {
        self.send(SearchEvent::NearbyRefresh(center))
    }

    /// A marker was tapped
    pub fn select_marker(&self, place: domain::Place) -> Result<(), ApplicationError> {
        self.send(SearchEvent::MarkerSelected(place))
    }

    /// The detail panel was closed
    pub fn clear_selection(&self) -> Result<(), ApplicationError> {
        self.send(SearchEvent::SelectionCleared)
    }

    /// The favorite button was pressed
    pub fn toggle_favorite(&self, place: domain::Place) -> Result<(), ApplicationError> {
        self.send(SearchEvent::FavoriteToggled(place))
    }

    /// The "my location" button was pressed
    pub fn locate(&self) -> Result<(), ApplicationError> {
        self.send(SearchEvent::LocateRequested)
    }

    /// Stop the coordinator; pending work is abandoned
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Whether the coordinator task has stopped
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Actor driving a [`SearchMachine`]
pub struct SearchCoordinator {
    machine: SearchMachine,
    deps: SearchDependencies,
    commands: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<Input>,
    completions: mpsc::UnboundedReceiver<Input>,
    debounce: DebounceTimer,
}

impl std::fmt::Debug for SearchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCoordinator")
            .field("machine", &self.machine)
            .finish_non_exhaustive()
    }
}

impl SearchCoordinator {
    /// Spawn the coordinator on the current tokio runtime
    ///
    /// On start it loads the persisted favorites and requests the device
    /// location once.
    pub fn spawn(deps: SearchDependencies) -> SearchHandle {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (completions_tx, completions) = mpsc::unbounded_channel();

        let coordinator = Self {
            machine: SearchMachine::new(deps.config.clone()),
            deps,
            commands,
            completions_tx,
            completions,
            debounce: DebounceTimer::new(),
        };
        tokio::spawn(coordinator.run());

        SearchHandle {
            commands: commands_tx,
        }
    }

    #[instrument(name = "search_coordinator", skip(self))]
    async fn run(mut self) {
        info!("Search coordinator started");

        let favorites = self.deps.favorites.initialize().await;
        self.apply(Input::FavoritesLoaded(favorites));
        self.apply(Input::Event(SearchEvent::LocateRequested));

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Event(event)) => self.apply(Input::Event(event)),
                    Some(Command::Shutdown) | None => break,
                },
                Some(input) = self.completions.recv() => self.apply(input),
            }
        }

        self.debounce.cancel();
        info!("Search coordinator stopped");
    }

    fn apply(&mut self, input: Input) {
        for effect in self.machine.handle(input) {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        let limit = self.deps.config.call_timeout();
        let presentation = &self.deps.presentation;

        match effect {
            Effect::ScheduleDebounce { token, delay } => {
                self.debounce.schedule(
                    delay,
                    self.completions_tx.clone(),
                    Input::DebounceElapsed { token },
                );
            },
            Effect::CancelDebounce => self.debounce.cancel(),
            Effect::Autocomplete { token, text } => {
                let places = Arc::clone(&self.deps.places);
                self.spawn_request(async move {
                    let result = bounded(limit, places.autocomplete(&text)).await;
                    Input::AutocompleteCompleted {
                        token,
                        text,
                        result,
                    }
                });
            },
            Effect::ResolveDetails {
                token,
                suggestion_id,
            } => {
                let places = Arc::clone(&self.deps.places);
                self.spawn_request(async move {
                    let result = bounded(limit, places.resolve_details(&suggestion_id)).await;
                    Input::ResolutionCompleted { token, result }
                });
            },
            Effect::Geocode { token, address } => {
                let places = Arc::clone(&self.deps.places);
                self.spawn_request(async move {
                    let result = bounded(limit, places.geocode(&address)).await;
                    Input::ResolutionCompleted { token, result }
                });
            },
            Effect::NearbySearch {
                token,
                center,
                radius_meters,
                category,
            } => {
                let places = Arc::clone(&self.deps.places);
                self.spawn_request(async move {
                    let result = bounded(
                        limit,
                        places.nearby_search(&center, radius_meters, &category),
                    )
                    .await;
                    Input::NearbyCompleted { token, result }
                });
            },
            Effect::Locate { token } => {
                let location = Arc::clone(&self.deps.location);
                self.spawn_request(async move {
                    let result = locate(location.as_ref(), limit).await;
                    Input::LocationCompleted { token, result }
                });
            },
            Effect::ToggleFavorite(place) => {
                let favorites = Arc::clone(&self.deps.favorites);
                self.spawn_request(async move {
                    let result = favorites.toggle(&place).await;
                    Input::FavoriteCompleted {
                        place_id: place.id,
                        result,
                        favorites: favorites.snapshot(),
                    }
                });
            },
            Effect::PublishCoordinate(coordinate) => {
                presentation.on_coordinate_changed(coordinate);
            },
            Effect::PublishMarkers { nearby, favorites } => {
                presentation.on_markers_changed(&nearby, &favorites);
            },
            Effect::PublishSuggestions(suggestions) => {
                presentation.on_suggestions_changed(&suggestions);
            },
            Effect::PublishSelection(place) => presentation.on_selection_changed(place.as_ref()),
            Effect::PublishRoute(route) => presentation.on_route_changed(route),
            Effect::ReportError(message) => presentation.on_error(&message),
        }
    }

    fn spawn_request<F>(&self, work: F)
    where
        F: Future<Output = Input> + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let input = work.await;
            if tx.send(input).is_err() {
                debug!("Coordinator stopped before request completed");
            }
        });
    }
}

/// Run a gateway call under `limit`; running out of time is a network failure
async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ApplicationError>>,
) -> Result<T, ApplicationError> {
    tokio::time::timeout(limit, call).await.map_err(|_| {
        ApplicationError::Network(format!("No response within {}s", limit.as_secs()))
    })?
}

/// Ask for permission, then for a high-accuracy fix, each bounded by `limit`
async fn locate(
    location: &dyn LocationPort,
    limit: Duration,
) -> Result<domain::Coordinate, ApplicationError> {
    let unavailable =
        || ApplicationError::LocationUnavailable(format!("No fix within {}s", limit.as_secs()));

    match tokio::time::timeout(limit, location.request_permission()).await {
        Ok(PermissionStatus::Granted) => {},
        Ok(PermissionStatus::Denied) => return Err(ApplicationError::PermissionDenied),
        Err(_) => return Err(unavailable()),
    }

    tokio::time::timeout(limit, location.current_fix(LocationAccuracy::High))
        .await
        .map_err(|_| unavailable())?
}
