//! Entry lifecycle ("chain").
//!
//! An [`Entry`] is one logical log statement from its first fragment to its
//! terminator. Gating is decided once, when the entry opens:
//!
//! ```text
//! doLog = (topic empty OR topic enabled)
//!     AND level >= effective level of the logger
//!     AND every attached condition
//! ```
//!
//! An emitting entry holds the process-wide emission lock for its whole
//! lifetime, so no fragment of another entry can reach any sink between two
//! of its fragments. The lock is released at the single point where the
//! entry ends: [`Entry::finish`], or drop when the entry goes out of scope
//! (including early returns and unwinding).
//!
//! Suppressed entries never take the lock and never format their fragments.
//!
//! Fragments must not log through chainlog themselves while an entry is open
//! on the same thread; the emission lock is not reentrant.

use crate::location::consume_location;
use crate::ports::sink::SinkError;
use crate::statement::Statement;
use crate::target::{Fragment, LogTarget};
use chainlog_domain::EntryMeta;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::error;

static EMISSION_LOCK: Mutex<()> = Mutex::new(());

fn acquire_emission_lock() -> MutexGuard<'static, ()> {
    // The lock guards no data, so a panic inside another entry leaves
    // nothing to repair.
    EMISSION_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One log statement in flight.
pub struct Entry<'a> {
    target: &'a dyn LogTarget,
    meta: EntryMeta,
    emission: Option<MutexGuard<'static, ()>>,
    message: String,
    failure: Option<SinkError>,
    closed: bool,
}

impl<'a> Entry<'a> {
    pub(crate) fn open<V: Display>(statement: Statement<'a>, first: V) -> Self {
        let Statement {
            target,
            topic,
            level,
            gate,
        } = statement;

        // Predicates run before the lock so they may themselves log.
        let condition = gate.evaluate();

        let origin = target.origin();
        let defaults = origin.call_defaults();
        let meta = EntryMeta::new(
            origin.name(),
            level.unwrap_or(defaults.level),
            topic.unwrap_or(defaults.topic),
        );
        origin.begin_entry(meta.level);

        let emission = (condition && origin.should_log(&meta)).then(acquire_emission_lock);

        let mut entry = Self {
            target,
            meta,
            emission,
            message: String::new(),
            failure: None,
            closed: false,
        };
        entry.append(first);
        entry
    }

    /// Append a fragment without re-evaluating gating.
    pub fn push<V: Display>(mut self, value: V) -> Self {
        self.append(value);
        self
    }

    /// Whether this entry passed gating and reaches the sink.
    pub fn is_emitting(&self) -> bool {
        self.emission.is_some()
    }

    pub fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    /// End the entry now, returning the first sink error it met.
    pub fn finish(mut self) -> Result<(), SinkError> {
        self.close()
    }

    fn append<V: Display>(&mut self, value: V) {
        if self.emission.is_none() || self.closed {
            return;
        }
        let text = value.to_string();
        if self.failure.is_none()
            && let Err(e) = self.target.write(Fragment::Text(&text))
        {
            self.failure = Some(e);
        }
        self.message.push_str(&text);
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.emission.is_some() {
            // Always sent so decorators clear their pending buffers.
            if let Err(e) = self.target.write(Fragment::End(&self.meta)) {
                self.failure.get_or_insert(e);
            }
            self.target
                .origin()
                .record_message(std::mem::take(&mut self.message));
        }
        // A location marked for this entry never outlives it.
        consume_location();
        self.emission = None;

        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for Entry<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!(logger = %self.meta.logger, error = %e, "Log entry could not be written");
        }
    }
}

impl std::fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("target", &self.target.name())
            .field("meta", &self.meta)
            .field("emitting", &self.is_emitting())
            .field("closed", &self.closed)
            .finish()
    }
}
