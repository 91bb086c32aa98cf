//! Bookmarked places

use serde::{Deserialize, Serialize};

use super::place::Place;
use crate::value_objects::PlaceId;

/// Result of toggling a place in a [`FavoriteSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    /// The place was not a favorite and has been added
    Added,
    /// The place was a favorite and has been removed
    Removed,
}

impl FavoriteChange {
    /// Whether the place is a favorite after the change
    #[must_use]
    pub const fn is_favorite(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Set of favorite places, keyed by id and kept in insertion order
///
/// Never holds two entries with the same id. Mutations return a new set so the
/// caller can persist it before committing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Place>", into = "Vec<Place>")]
pub struct FavoriteSet {
    places: Vec<Place>,
}

impl FavoriteSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self { places: Vec::new() }
    }

    /// Whether a place with this id is a favorite
    #[must_use]
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.places.iter().any(|p| &p.id == id)
    }

    /// Number of favorites
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Favorites in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    /// Favorites in insertion order, as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    /// Return a set that includes `place`; unchanged if already present
    #[must_use]
    pub fn with(&self, place: Place) -> Self {
        if self.contains(&place.id) {
            return self.clone();
        }
        let mut places = self.places.clone();
        places.push(place);
        Self { places }
    }

    /// Return a set without the place identified by `id`
    #[must_use]
    pub fn without(&self, id: &PlaceId) -> Self {
        Self {
            places: self.places.iter().filter(|p| &p.id != id).cloned().collect(),
        }
    }

    /// Return the toggled set and which way the toggle went
    #[must_use]
    pub fn toggled(&self, place: &Place) -> (Self, FavoriteChange) {
        if self.contains(&place.id) {
            (self.without(&place.id), FavoriteChange::Removed)
        } else {
            (self.with(place.clone()), FavoriteChange::Added)
        }
    }
}

impl From<Vec<Place>> for FavoriteSet {
    /// Builds a set, keeping the first occurrence of any duplicated id
    fn from(places: Vec<Place>) -> Self {
        places
            .into_iter()
            .fold(Self::new(), |set, place| set.with(place))
    }
}

impl From<FavoriteSet> for Vec<Place> {
    fn from(set: FavoriteSet) -> Self {
        set.places
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Coordinate;

    fn place(id: &str) -> Place {
        Place::new(
            PlaceId::parse(id).unwrap(),
            format!("Clinic {id}"),
            Coordinate::new(37.5, 127.0).unwrap(),
            "Seoul",
        )
    }

    #[test]
    fn toggle_adds_then_removes() {
        let set = FavoriteSet::new();
        let (set, change) = set.toggled(&place("a"));
        assert_eq!(change, FavoriteChange::Added);
        assert!(set.contains(&place("a").id));

        let (set, change) = set.toggled(&place("a"));
        assert_eq!(change, FavoriteChange::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn toggle_does_not_mutate_original() {
        let set = FavoriteSet::new().with(place("a"));
        let (toggled, _) = set.toggled(&place("a"));
        assert_eq!(set.len(), 1);
        assert!(toggled.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let set = FavoriteSet::new()
            .with(place("c"))
            .with(place("a"))
            .with(place("b"));
        let ids: Vec<&str> = set.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn with_ignores_duplicate_ids() {
        let mut renamed = place("a");
        renamed.name = "Renamed".to_string();
        let set = FavoriteSet::new().with(place("a")).with(renamed);
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].name, "Clinic a");
    }

    #[test]
    fn toggle_matches_by_id_not_by_value() {
        let mut stale = place("a");
        stale.rating = Some(3.0);
        let set = FavoriteSet::new().with(place("a"));
        let (set, change) = set.toggled(&stale);
        assert_eq!(change, FavoriteChange::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn deserialize_drops_duplicates() {
        let json = serde_json::to_string(&vec![place("a"), place("b"), place("a")]).unwrap();
        let set: FavoriteSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_as_array() {
        let set = FavoriteSet::new().with(place("a"));
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));
    }
}
