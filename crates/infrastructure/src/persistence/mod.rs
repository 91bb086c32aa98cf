//! Persistence module
//!
//! SQLite-backed durable key-value storage.

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use kv_store::SqliteKeyValueStore;
