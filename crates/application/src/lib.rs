//! Application layer - Use cases and orchestration
//!
//! Contains the search coordinator, the favorites and coordinate stores, and the
//! port definitions through which the core talks to the places provider, the
//! device location sensor, local storage, and the presentation surface.

pub mod config;
pub mod error;
pub mod ports;
pub mod services;

pub use config::SearchConfig;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
