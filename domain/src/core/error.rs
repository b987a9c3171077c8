//! Domain error types

use crate::core::level::LogLevel;
use thiserror::Error;

/// Errors raised when mutating logging configuration
///
/// A failed mutation never has a partial effect: the configuration stays
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration already frozen")]
    Frozen,

    #[error("Log level for '{logger}' already set: {level}")]
    LevelAlreadySet { logger: String, level: LogLevel },
}

impl ConfigError {
    /// Check if this error was caused by a frozen configuration
    pub fn is_frozen(&self) -> bool {
        matches!(self, ConfigError::Frozen)
    }
}

/// Errors caused by using the logging API incorrectly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("'{target}' has no location decorator in its chain")]
    MissingLocationDecorator { target: String },

    #[error("No logger registered under '{0}'")]
    LoggerNotFound(String),
}
