//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the places gateway
//! over the Google Places client and durable key-value storage over SQLite.
//! Also owns configuration loading, logging setup, and the composition root
//! that wires everything into a running search coordinator.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::PlacesAdapter;
pub use bootstrap::{BootstrapError, build_coordinator};
pub use config::{AppConfig, PlacesAppConfig, StorageConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteKeyValueStore, create_pool};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
