//! Places integration for VetMap
//!
//! Provides nearby search, autocomplete, place details and address geocoding via
//! the [Google Maps Platform](https://developers.google.com/maps/documentation/places/web-service)
//! web service API.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`PlacesClient`] defines the four
//! read-only queries and [`GooglePlacesClient`] implements them over HTTP. Every
//! response is decoded into an explicit schema and converted into domain types;
//! a response missing a required field becomes [`PlacesError::ParseError`]
//! instead of a partial object. Provider status codes other than `OK` (and the
//! benign `ZERO_RESULTS` where an empty list makes sense) surface as
//! [`PlacesError::ProviderStatus`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::Coordinate;
//! use integration_places::{GooglePlacesClient, PlacesClient, PlacesConfig};
//!
//! let config = PlacesConfig::with_api_key("my-key");
//! let client = GooglePlacesClient::new(&config)?;
//!
//! let hospitals = client
//!     .nearby_search(&Coordinate::fallback(), 5000, "veterinary_care")
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GooglePlacesClient, PlacesClient};
pub use config::PlacesConfig;
pub use error::PlacesError;
pub use models::ProviderStatus;
