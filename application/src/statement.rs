//! Fluent statement builder.
//!
//! A [`Statement`] collects the per-call options of one log statement
//! (topic, level, conditions) as an owned value, so selecting options on a
//! shared logger never races with another thread. The first fragment turns
//! the statement into an [`Entry`].
//!
//! ```ignore
//! logger.topic("net").warning().when(retrying).push("retry ").push(attempt);
//! ```
//!
//! Conditions can only be attached before the first fragment: [`Entry`] has
//! no `when` methods.

use crate::condition::ConditionGate;
use crate::entry::Entry;
use crate::target::LogTarget;
use chainlog_domain::{LogLevel, Topic};
use std::fmt::Display;

/// Per-call options of one log statement.
#[derive(Debug)]
pub struct Statement<'a> {
    pub(crate) target: &'a dyn LogTarget,
    pub(crate) topic: Option<Topic>,
    pub(crate) level: Option<LogLevel>,
    pub(crate) gate: ConditionGate<'a>,
}

impl<'a> Statement<'a> {
    /// A statement using the call defaults of the target's logger.
    pub fn new(target: &'a dyn LogTarget) -> Self {
        Self {
            target,
            topic: None,
            level: None,
            gate: ConditionGate::new(),
        }
    }

    pub fn target(&self) -> &'a dyn LogTarget {
        self.target
    }

    pub fn topic(mut self, topic: impl Into<Topic>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn when(mut self, condition: bool) -> Self {
        self.gate = self.gate.and_value(condition);
        self
    }

    pub fn when_with<F>(mut self, predicate: F) -> Self
    where
        F: FnOnce() -> bool + 'a,
    {
        self.gate = self.gate.and_predicate(predicate);
        self
    }

    /// Attach an optional predicate; `None` suppresses the entry.
    pub fn when_maybe<F>(mut self, predicate: Option<F>) -> Self
    where
        F: FnOnce() -> bool + 'a,
    {
        self.gate = self.gate.and_optional(predicate);
        self
    }

    pub fn none(self) -> Self {
        self.level(LogLevel::None)
    }

    pub fn debug(self) -> Self {
        self.level(LogLevel::Debug)
    }

    pub fn log(self) -> Self {
        self.level(LogLevel::Log)
    }

    pub fn info(self) -> Self {
        self.level(LogLevel::Info)
    }

    pub fn warning(self) -> Self {
        self.level(LogLevel::Warning)
    }

    pub fn error(self) -> Self {
        self.level(LogLevel::Error)
    }

    /// Push the first fragment, opening the entry.
    pub fn push<V: Display>(self, value: V) -> Entry<'a> {
        Entry::open(self, value)
    }
}

/// Fluent entry points shared by loggers and decorators.
///
/// Every method starts a fresh [`Statement`] from the target's call
/// defaults.
pub trait Emit {
    fn target(&self) -> &dyn LogTarget;

    fn statement(&self) -> Statement<'_> {
        Statement::new(self.target())
    }

    fn topic(&self, topic: impl Into<Topic>) -> Statement<'_> {
        self.statement().topic(topic)
    }

    fn level(&self, level: LogLevel) -> Statement<'_> {
        self.statement().level(level)
    }

    fn when(&self, condition: bool) -> Statement<'_> {
        self.statement().when(condition)
    }

    fn when_with<'a, F>(&'a self, predicate: F) -> Statement<'a>
    where
        F: FnOnce() -> bool + 'a,
    {
        self.statement().when_with(predicate)
    }

    fn when_maybe<'a, F>(&'a self, predicate: Option<F>) -> Statement<'a>
    where
        F: FnOnce() -> bool + 'a,
    {
        self.statement().when_maybe(predicate)
    }

    fn none(&self) -> Statement<'_> {
        self.level(LogLevel::None)
    }

    fn debug(&self) -> Statement<'_> {
        self.level(LogLevel::Debug)
    }

    fn log(&self) -> Statement<'_> {
        self.level(LogLevel::Log)
    }

    fn info(&self) -> Statement<'_> {
        self.level(LogLevel::Info)
    }

    fn warning(&self) -> Statement<'_> {
        self.level(LogLevel::Warning)
    }

    fn error(&self) -> Statement<'_> {
        self.level(LogLevel::Error)
    }

    /// Push the first fragment with the call defaults.
    fn push<V: Display>(&self, value: V) -> Entry<'_> {
        self.statement().push(value)
    }
}

impl Emit for dyn LogTarget + '_ {
    fn target(&self) -> &dyn LogTarget {
        self
    }
}
