//! Domain layer for chainlog
//!
//! This crate contains the value objects and rules of the logging engine.
//! It has no dependencies on sinks, threads or I/O.
//!
//! # Core Concepts
//!
//! ## Entry
//!
//! One logical log statement, from its first fragment to its terminator.
//! Whether an entry is emitted at all is decided once, from:
//!
//! - **Level**: the entry level must reach the logger's effective level
//! - **Topic**: an optional tag filtered by the topic allow-list
//! - **Condition**: caller-supplied boolean gating
//!
//! ## Configuration
//!
//! [`ConfigRegistry`] holds the default level, set-once per-logger overrides
//! and the topic allow-list, and can be frozen irreversibly.

pub mod config;
pub mod core;
pub mod entry;

// Re-export commonly used types
pub use config::{ConfigRegistry, ConfigSnapshot};
pub use core::{
    error::{ConfigError, UsageError},
    id::InstanceId,
    level::LogLevel,
    topic::Topic,
};
pub use entry::{EntryMeta, Location};
