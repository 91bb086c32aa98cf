//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod places_adapter;

pub use places_adapter::PlacesAdapter;
