//! Domain layer for VetMap
//!
//! Contains the value objects and entities of the nearby-hospital search:
//! coordinates, places, suggestions, the favorites set, and the search session.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
