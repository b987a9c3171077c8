//! Entry value objects
//!
//! [`EntryMeta`] carries the facts about one log statement that decorators
//! need to format it; [`Location`] is a call-site position.

use crate::core::{level::LogLevel, topic::Topic};

/// Immutable facts of one log entry.
///
/// Resolved once when the entry is created and passed along with the
/// end-of-entry sentinel, so formatting never depends on shared mutable
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// Name of the innermost logger the entry is written to
    pub logger: String,
    pub level: LogLevel,
    pub topic: Topic,
}

impl EntryMeta {
    pub fn new(logger: impl Into<String>, level: LogLevel, topic: Topic) -> Self {
        Self {
            logger: logger.into(),
            level,
            topic,
        }
    }
}

/// A source position (file and line) of a log call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
