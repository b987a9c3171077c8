//! Log level value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log entry (Value Object)
///
/// Levels are ordered from `None` (lowest) to `Error` (highest). An entry is
/// emitted when its level is greater than or equal to the effective level of
/// the logger it is sent to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Lowest level; an effective level of `None` lets everything through
    #[default]
    None,
    Debug,
    Log,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels in ascending order
    pub const ALL: [LogLevel; 6] = [
        LogLevel::None,
        LogLevel::Debug,
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Get the canonical upper-case name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Log => "LOG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Whether an entry at this level passes the given threshold
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a log level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl std::str::FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
