//! Domain entities - Objects with identity and lifecycle

mod favorite_set;
mod place;
mod search_session;

pub use favorite_set::{FavoriteChange, FavoriteSet};
pub use place::{Place, SuggestionEntry};
pub use search_session::{Route, SearchSession};
