//! Application services - Use case implementations

mod coordinate_store;
mod favorites_service;
mod search_coordinator;

pub use coordinate_store::CoordinateStore;
pub use favorites_service::{FAVORITES_KEY, FavoritesService, FavoritesSnapshot};
pub use search_coordinator::{
    Effect, Input, RequestKind, RequestToken, SearchCoordinator, SearchDependencies, SearchEvent,
    SearchHandle, SearchMachine,
};
