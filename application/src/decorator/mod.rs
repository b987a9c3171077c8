//! Decorator composition.
//!
//! A [`Decorated`] target wraps exactly one other target and adds one
//! formatting concern, described by a [`Decoration`]. Text fragments are
//! buffered until the end-of-entry sentinel arrives; the complete message is
//! then decorated once, forwarded as a single fragment, and followed by the
//! sentinel itself, which is never decorated.
//!
//! Decorators nest arbitrarily. Because each one decorates on the way in,
//! the innermost decorator's prefix ends up first:
//!
//! ```text
//! Timestamp( Level( Location( Logger ) ) )
//!   => "[file:line] [LEVEL] [timestamp] text"
//! ```
//!
//! Decorators run on the caller's thread while the caller's entry holds the
//! emission lock, so they add no locking of their own beyond what `Sync`
//! requires.

mod level;
mod location;
mod timestamp;

pub use level::{LevelDecoration, LevelDecorator};
pub use location::{LocationDecoration, LocationDecorator};
pub use timestamp::{DEFAULT_TIMESTAMP_FORMAT, TimestampDecoration, TimestampDecorator};

use crate::logger::Logger;
use crate::ports::sink::SinkError;
use crate::statement::Emit;
use crate::target::{Fragment, LogTarget};
use chainlog_domain::{EntryMeta, InstanceId};
use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Errors raised when building a decorator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoratorError {
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestampFormat(String),
}

/// One formatting concern applied to a complete message.
pub trait Decoration: Send + Sync {
    /// Suffix of the decorator's name (`<wrapped>_<kind>`).
    fn kind(&self) -> &'static str;

    fn decorate(&self, message: &str, meta: &EntryMeta) -> String;

    /// Whether this decoration renders pending call-site locations.
    fn provides_location(&self) -> bool {
        false
    }
}

/// A target wrapped with one [`Decoration`].
pub struct Decorated<D> {
    name: String,
    id: InstanceId,
    wrapped: Arc<dyn LogTarget>,
    /// Text of the current, not yet terminated message
    pending: Mutex<String>,
    decoration: D,
}

impl<D: Decoration> Decorated<D> {
    pub fn new(wrapped: Arc<dyn LogTarget>, decoration: D) -> Self {
        let name = format!("{}_{}", wrapped.name(), decoration.kind());
        let id = InstanceId::next();
        debug!(decorator = %name, id = %id, "Created decorator");
        Self {
            name,
            id,
            wrapped,
            pending: Mutex::new(String::new()),
            decoration,
        }
    }

    pub fn decoration(&self) -> &D {
        &self.decoration
    }

    fn pending(&self) -> MutexGuard<'_, String> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: Decoration> LogTarget for Decorated<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InstanceId {
        self.id
    }

    fn write(&self, fragment: Fragment<'_>) -> Result<(), SinkError> {
        match fragment {
            Fragment::Text(text) => {
                self.pending().push_str(text);
                Ok(())
            }
            Fragment::End(meta) => {
                let message = std::mem::take(&mut *self.pending());
                let forwarded = if message.is_empty() {
                    Ok(())
                } else {
                    let decorated = self.decoration.decorate(&message, meta);
                    self.wrapped.write(Fragment::Text(&decorated))
                };
                let ended = self.wrapped.write(Fragment::End(meta));
                forwarded.and(ended)
            }
        }
    }

    fn origin(&self) -> &Logger {
        self.wrapped.origin()
    }

    fn wrapped(&self) -> Option<&Arc<dyn LogTarget>> {
        Some(&self.wrapped)
    }

    fn provides_location(&self) -> bool {
        self.decoration.provides_location()
    }
}

impl<D: Decoration> Emit for Decorated<D> {
    fn target(&self) -> &dyn LogTarget {
        self
    }
}

impl<D> std::fmt::Debug for Decorated<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decorated")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("wrapped", &self.wrapped.name())
            .finish_non_exhaustive()
    }
}

// ==================== Capability discovery ====================

thread_local! {
    /// Last root queried on this thread and whether its chain renders
    /// locations. Chains are immutable and ids never reused, so an entry
    /// stays valid until a different root is queried.
    static LOCATION_CAPABILITY: Cell<Option<(InstanceId, bool)>> = const { Cell::new(None) };
}

/// Whether any target in the chain starting at `root` renders locations.
///
/// Walks outward-to-inward through [`LogTarget::wrapped`].
pub fn has_location_capability(root: &dyn LogTarget) -> bool {
    let root_id = root.id();
    if let Some((cached_id, found)) = LOCATION_CAPABILITY.with(Cell::get)
        && cached_id == root_id
    {
        return found;
    }

    let found = chain(root).any(|target| target.provides_location());
    LOCATION_CAPABILITY.with(|cache| cache.set(Some((root_id, found))));
    found
}

/// Iterate a chain from `root` inward to its logger.
pub fn chain<'a>(root: &'a dyn LogTarget) -> impl Iterator<Item = &'a dyn LogTarget> + 'a {
    std::iter::successors(Some(root), |target| {
        target.wrapped().map(|inner| inner.as_ref() as &dyn LogTarget)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_at;
    use crate::test_support::recording_logger;
    use chainlog_domain::{ConfigRegistry, LogLevel};

    /// Wraps the message in braces; used to observe nesting order.
    struct Brace(&'static str);

    impl Decoration for Brace {
        fn kind(&self) -> &'static str {
            self.0
        }

        fn decorate(&self, message: &str, _meta: &EntryMeta) -> String {
            format!("{}{{{}}}", self.0, message)
        }
    }

    fn config() -> Arc<ConfigRegistry> {
        Arc::new(ConfigRegistry::new())
    }

    #[test]
    fn test_decorates_whole_message_once() {
        let (logger, sink) = recording_logger("console", config());
        let braced: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("b")));

        braced.push("one ").push(2).push(" three");

        assert_eq!(sink.appends(), vec!["b{one 2 three}", "\n"]);
    }

    #[test]
    fn test_nesting_order_innermost_first() {
        let (logger, sink) = recording_logger("console", config());
        let inner: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("in")));
        let outer: Arc<dyn LogTarget> = Arc::new(Decorated::new(inner, Brace("out")));

        outer.push("x");

        assert_eq!(sink.contents(), "in{out{x}}\n");
        assert_eq!(outer.name(), "console_in_out");
    }

    #[test]
    fn test_buffers_reset_between_entries() {
        let (logger, sink) = recording_logger("console", config());
        let braced: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("b")));

        braced.push("first");
        braced.push("second");

        assert_eq!(sink.lines(), vec!["b{first}", "b{second}"]);
    }

    #[test]
    fn test_empty_message_only_forwards_terminator() {
        let (logger, sink) = recording_logger("console", config());
        let braced: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("b")));

        braced.push("");

        assert_eq!(sink.appends(), vec!["\n"]);
    }

    #[test]
    fn test_suppressed_entries_never_reach_decorator() {
        let config = Arc::new(ConfigRegistry::with_default_level(LogLevel::Error));
        let (logger, sink) = recording_logger("console", config);
        let braced: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("b")));

        braced.info().push("hidden");
        braced.error().push("shown");

        assert_eq!(sink.lines(), vec!["b{shown}"]);
    }

    #[test]
    fn test_identity_queries_forward_to_logger() {
        let (logger, _sink) = recording_logger("console", config());
        let logger_id = logger.id();
        let inner: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger.clone(), Brace("a")));
        let outer: Arc<dyn LogTarget> = Arc::new(Decorated::new(inner, Brace("b")));

        outer.warning().push("raw ").push("text");

        assert_eq!(outer.origin().id(), logger_id);
        assert_ne!(outer.id(), logger_id);
        assert_eq!(outer.last_message(), "raw text");
        assert_eq!(logger.last_message(), "raw text");
        assert_eq!(outer.log_level(), LogLevel::Warning);
    }

    #[test]
    fn test_gating_uses_innermost_logger_name() {
        let config = Arc::new(ConfigRegistry::with_default_level(LogLevel::Error));
        config.set_logger_level("console", LogLevel::Debug).unwrap();
        let (logger, sink) = recording_logger("console", config);
        let braced: Arc<dyn LogTarget> = Arc::new(Decorated::new(logger, Brace("b")));

        braced.info().push("allowed by console override");

        assert_eq!(sink.lines(), vec!["b{allowed by console override}"]);
    }

    #[test]
    fn test_full_stack_output_order() {
        let (logger, sink) = recording_logger("console", config());
        let located = LocationDecorator::decorate(logger);
        let leveled = LevelDecorator::decorate(located);
        let stamped = TimestampDecorator::with_format(leveled, "TS").unwrap();

        let line = line!() + 1;
        log_at!(stamped).unwrap().warning().push("text");

        assert_eq!(
            sink.contents(),
            format!("[{}:{line}] [WARNING] [TS] text\n", file!())
        );
    }

    #[test]
    fn test_capability_discovery_walks_chain() {
        let (logger, _sink) = recording_logger("console", config());
        let plain: Arc<dyn LogTarget> = logger;
        let located = LocationDecorator::decorate(plain.clone());
        let leveled = LevelDecorator::decorate(located.clone());
        let only_level = LevelDecorator::decorate(plain.clone());

        assert!(!has_location_capability(plain.as_ref()));
        assert!(has_location_capability(located.as_ref()));
        assert!(has_location_capability(leveled.as_ref()));
        assert!(!has_location_capability(only_level.as_ref()));
        // Repeated query of the same root is answered from the cache.
        assert!(!has_location_capability(only_level.as_ref()));
        assert!(has_location_capability(leveled.as_ref()));

        let names: Vec<&str> = chain(leveled.as_ref()).map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec!["console_location_leveled", "console_location", "console"]
        );
    }

    #[test]
    fn test_concurrent_entries_through_decorators_stay_whole() {
        const THREADS: usize = 8;
        const ENTRIES: usize = 200;

        let (logger, sink) = recording_logger("console", config());
        let target =
            TimestampDecorator::with_format(LevelDecorator::decorate(logger), "TS").unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let target = target.clone();
                std::thread::spawn(move || {
                    for i in 0..ENTRIES {
                        target
                            .info()
                            .push("t")
                            .push(t)
                            .push("-")
                            .push(i)
                            .push("-end");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), THREADS * ENTRIES);

        let mut next_per_thread = [0usize; THREADS];
        for line in &lines {
            let body = line
                .strip_prefix("[INFO] [TS] t")
                .and_then(|rest| rest.strip_suffix("-end"))
                .unwrap_or_else(|| panic!("malformed line: {line:?}"));
            let (thread, index) = body.split_once('-').unwrap();
            let thread: usize = thread.parse().unwrap();
            let index: usize = index.parse().unwrap();
            assert_eq!(index, next_per_thread[thread], "out of order: {line:?}");
            next_per_thread[thread] += 1;
        }
        assert!(next_per_thread.iter().all(|&n| n == ENTRIES));
    }
}
