//! Infrastructure layer for chainlog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the logger registry, and configuration
//! file loading.

pub mod config;
pub mod registry;
pub mod sinks;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, DecoratorKind, FileConfig, LoggerConfig, SetupError,
    SinkKind, build_logger, build_registry,
};
pub use registry::LoggerRegistry;
pub use sinks::{ConsoleSink, FileSink, MemorySink, console_logger, file_logger};
