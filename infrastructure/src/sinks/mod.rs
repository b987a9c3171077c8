//! Sink adapters
//!
//! Implementations of the application layer's [`Sink`] port, plus helpers
//! that build a named [`Logger`] around each of them.
//!
//! [`Sink`]: chainlog_application::Sink

mod console;
mod file;
mod memory;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;

use chainlog_application::{Logger, SinkError};
use chainlog_domain::ConfigRegistry;
use std::path::Path;
use std::sync::Arc;

/// A logger writing to standard output.
pub fn console_logger(name: &str, config: Arc<ConfigRegistry>) -> Arc<Logger> {
    Logger::shared(name, Arc::new(ConsoleSink::new()), config)
}

/// A logger appending to the file at `path`.
pub fn file_logger(
    name: &str,
    path: impl AsRef<Path>,
    config: Arc<ConfigRegistry>,
) -> Result<Arc<Logger>, SinkError> {
    let sink = FileSink::open(path)?;
    Ok(Logger::shared(name, Arc::new(sink), config))
}
