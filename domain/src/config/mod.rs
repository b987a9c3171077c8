//! Logging configuration for the domain layer
//!
//! [`ConfigRegistry`] decides whether an entry may be emitted: it owns the
//! default level, per-logger overrides and the topic allow-list.

mod registry;

pub use registry::{ConfigRegistry, ConfigSnapshot};
