//! The [`LogTarget`] trait shared by loggers and decorators.
//!
//! A target receives an entry as a stream of [`Fragment`]s: any number of
//! text fragments followed by exactly one [`Fragment::End`]. The end
//! sentinel is a distinct variant, so text that happens to contain a newline
//! is never mistaken for the end of an entry.
//!
//! ```text
//! Entry ──Text──Text──End──> Decorator ──Text──End──> Logger ──> Sink
//!                            (buffers, decorates on End)
//! ```

use crate::logger::Logger;
use crate::ports::sink::SinkError;
use chainlog_domain::{EntryMeta, InstanceId, LogLevel, Topic};
use std::sync::Arc;

/// One piece of an entry travelling down a target chain.
#[derive(Debug, Clone, Copy)]
pub enum Fragment<'a> {
    /// Serialized message text
    Text(&'a str),
    /// End-of-entry sentinel; never decorated, always forwarded
    End(&'a EntryMeta),
}

/// Anything an entry can be written to: a [`Logger`] or a decorator
/// wrapping one.
pub trait LogTarget: Send + Sync {
    /// Instance name; decorators derive theirs from the wrapped target.
    fn name(&self) -> &str;

    fn id(&self) -> InstanceId;

    /// Accept one fragment of the current entry.
    ///
    /// Only called while the emission lock is held.
    fn write(&self, fragment: Fragment<'_>) -> Result<(), SinkError>;

    /// The innermost logger of this chain.
    ///
    /// Identity queries (last message, level, call defaults, gating) are
    /// answered there, never by a decorator.
    fn origin(&self) -> &Logger;

    /// The target this one wraps, if any.
    fn wrapped(&self) -> Option<&Arc<dyn LogTarget>> {
        None
    }

    /// Whether this target itself renders pending call-site locations.
    fn provides_location(&self) -> bool {
        false
    }

    /// Undecorated text of the last entry this thread started on the
    /// innermost logger.
    fn last_message(&self) -> String {
        self.origin().last_message()
    }

    /// Level of the last entry this thread started on the innermost logger.
    fn log_level(&self) -> LogLevel {
        self.origin().log_level()
    }

    /// Topic used by statements that do not select one.
    fn default_topic(&self) -> Topic {
        self.origin().call_defaults().topic
    }
}

impl std::fmt::Debug for dyn LogTarget + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogTarget")
            .field("name", &self.name())
            .field("id", &self.id())
            .finish()
    }
}
