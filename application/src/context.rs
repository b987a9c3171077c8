//! Log context: a target bound to a topic and level.

use crate::entry::Entry;
use crate::statement::{Emit, Statement};
use crate::target::LogTarget;
use chainlog_domain::{LogLevel, Topic};
use std::fmt::Display;
use std::sync::Arc;

/// A target together with the topic and level a component logs under.
///
/// ```ignore
/// let ctx = LogContext::new(logger, "net");
/// ctx.push("connected");              // topic "net", level INFO
/// ctx.error().push("connection lost");
/// ```
#[derive(Debug, Clone)]
pub struct LogContext {
    target: Arc<dyn LogTarget>,
    topic: Topic,
    level: LogLevel,
}

impl LogContext {
    /// Bind `target` to `topic` with level INFO.
    pub fn new(target: Arc<dyn LogTarget>, topic: impl Into<Topic>) -> Self {
        Self::with_level(target, topic, LogLevel::Info)
    }

    pub fn with_level(target: Arc<dyn LogTarget>, topic: impl Into<Topic>, level: LogLevel) -> Self {
        Self {
            target,
            topic: topic.into(),
            level,
        }
    }

    /// The bound target, for statements outside this context's topic.
    pub fn raw(&self) -> &dyn LogTarget {
        self.target.as_ref()
    }

    pub fn target(&self) -> &Arc<dyn LogTarget> {
        &self.target
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Start an entry with the bound topic and level.
    pub fn push<V: Display>(&self, value: V) -> Entry<'_> {
        self.bound(self.level).push(value)
    }

    pub fn none(&self) -> Statement<'_> {
        self.bound(LogLevel::None)
    }

    pub fn debug(&self) -> Statement<'_> {
        self.bound(LogLevel::Debug)
    }

    pub fn log(&self) -> Statement<'_> {
        self.bound(LogLevel::Log)
    }

    pub fn info(&self) -> Statement<'_> {
        self.bound(LogLevel::Info)
    }

    pub fn warning(&self) -> Statement<'_> {
        self.bound(LogLevel::Warning)
    }

    pub fn error(&self) -> Statement<'_> {
        self.bound(LogLevel::Error)
    }

    fn bound(&self, level: LogLevel) -> Statement<'_> {
        self.raw().topic(self.topic.clone()).level(level)
    }
}
