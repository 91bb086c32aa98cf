//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer (or the host
//! application) implement these ports.

mod key_value_store;
mod location_port;
mod places_port;
mod presentation_port;

pub use key_value_store::KeyValueStorePort;
#[cfg(test)]
pub use key_value_store::MockKeyValueStorePort;
pub use location_port::{LocationAccuracy, LocationPort, PermissionStatus};
#[cfg(test)]
pub use location_port::MockLocationPort;
pub use places_port::PlacesPort;
#[cfg(test)]
pub use places_port::MockPlacesPort;
pub use presentation_port::PresentationPort;
