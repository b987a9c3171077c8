//! Application layer for chainlog
//!
//! This crate contains the logging engine: the sink port, loggers, the
//! statement/entry chain, decorators and the call-site location tracker.
//! It depends only on the domain layer.

pub mod condition;
pub mod context;
pub mod decorator;
pub mod entry;
pub mod location;
pub mod logger;
pub mod message;
pub mod ports;
pub mod statement;
pub mod target;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use condition::ConditionGate;
pub use context::LogContext;
pub use decorator::{
    DEFAULT_TIMESTAMP_FORMAT, Decorated, Decoration, DecoratorError, LevelDecorator,
    LocationDecorator, TimestampDecorator, has_location_capability,
};
pub use entry::Entry;
pub use location::{consume_location, locate, mark_location, pending_location};
pub use logger::{CallDefaults, Logger, TERMINATOR};
pub use message::{BitPattern, Binary};
pub use ports::sink::{NullSink, Sink, SinkError};
pub use statement::{Emit, Statement};
pub use target::{Fragment, LogTarget};
