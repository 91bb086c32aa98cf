//! Favorites service - persisted set of bookmarked places
//!
//! The in-memory set only changes after the new set has been written to
//! storage, so what the user sees never diverges from what survives a restart.

use std::{fmt, sync::Arc};

use domain::{FavoriteChange, FavoriteSet, Place, PlaceId};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::KeyValueStorePort};

/// Storage key under which the serialized favorites live
pub const FAVORITES_KEY: &str = "favorites";

/// Committed favorites tagged with the commit that produced them
///
/// `revision` grows by one on every successful toggle, so of two snapshots the
/// one with the higher revision is the newer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesSnapshot {
    /// Number of commits so far
    pub revision: u64,
    /// Committed set
    pub favorites: FavoriteSet,
}

/// Service owning the committed favorites set
pub struct FavoritesService {
    store: Arc<dyn KeyValueStorePort>,
    committed: RwLock<FavoritesSnapshot>,
    write_lock: Mutex<()>,
}

impl fmt::Debug for FavoritesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesService")
            .field("favorites", &self.committed.read().favorites.len())
            .finish_non_exhaustive()
    }
}

impl FavoritesService {
    /// Create a service with an empty committed set
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            store,
            committed: RwLock::new(FavoritesSnapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the persisted set
    ///
    /// A missing entry is an empty set.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if storage fails or the stored value cannot be decoded.
    pub async fn load(&self) -> Result<FavoriteSet, ApplicationError> {
        let Some(raw) = self.store.get(FAVORITES_KEY).await? else {
            return Ok(FavoriteSet::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::Persistence(format!("Stored favorites are unreadable: {e}"))
        })
    }

    /// Load the persisted set and make it the committed set
    ///
    /// Failures are logged and leave the app usable with no favorites.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> FavoriteSet {
        let set = match self.load().await {
            Ok(set) => {
                info!(count = set.len(), "Loaded favorites");
                set
            },
            Err(e) => {
                warn!(error = %e, "Failed to load favorites, starting empty");
                FavoriteSet::new()
            },
        };

        self.committed.write().favorites = set.clone();
        set
    }

    /// Write `set` to storage
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if serialization or storage fails.
    pub async fn save(&self, set: &FavoriteSet) -> Result<(), ApplicationError> {
        let raw = serde_json::to_string(set)
            .map_err(|e| ApplicationError::Persistence(format!("Cannot encode favorites: {e}")))?;

        self.store
            .set(FAVORITES_KEY, &raw)
            .await
            .map_err(|e| match e {
                ApplicationError::Persistence(_) => e,
                other => ApplicationError::Persistence(other.to_string()),
            })
    }

    /// Add the place if absent, remove it if present
    ///
    /// The toggled set is saved first and committed only if the save succeeds.
    /// Concurrent toggles are applied one after another.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the save fails; the committed set is unchanged.
    #[instrument(skip(self, place), fields(place_id = %place.id))]
    pub async fn toggle(&self, place: &Place) -> Result<FavoriteChange, ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let (next, change) = self.committed.read().favorites.toggled(place);
        self.save(&next).await?;

        let mut committed = self.committed.write();
        committed.revision += 1;
        committed.favorites = next;
        drop(committed);

        debug!(?change, "Favorite toggled");
        Ok(change)
    }

    /// Copy of the committed set and its revision
    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.committed.read().clone()
    }

    /// Whether the place is a committed favorite
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.committed.read().favorites.contains(id)
    }
}
