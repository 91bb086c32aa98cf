//! Logging infrastructure
//!
//! Installs a `tracing` subscriber with an env-driven filter and either
//! human-readable or JSON output.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
