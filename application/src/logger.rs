//! Root logger bound to a sink.
//!
//! A [`Logger`] owns its identity (name and [`InstanceId`]), the sink it
//! writes to, the shared [`ConfigRegistry`] that gates its entries, and the
//! call defaults used by statements that do not select a topic or level.

use crate::ports::sink::{Sink, SinkError};
use crate::statement::Emit;
use crate::target::{Fragment, LogTarget};
use chainlog_domain::{ConfigError, ConfigRegistry, EntryMeta, InstanceId, LogLevel, Topic};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Text appended to the sink when an entry ends.
pub const TERMINATOR: &str = "\n";

// One slot per logger that started an entry on the thread. A dropped logger
// releases its slot on the dropping thread; slots on other threads go away
// when those threads exit.
thread_local! {
    static LAST_ENTRY: RefCell<HashMap<InstanceId, LastEntry>> = RefCell::new(HashMap::new());
}

#[derive(Debug, Default)]
struct LastEntry {
    message: String,
    level: LogLevel,
}

/// Topic and level applied to statements that do not choose their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDefaults {
    pub topic: Topic,
    pub level: LogLevel,
}

/// Root of every target chain.
pub struct Logger {
    name: String,
    id: InstanceId,
    sink: Arc<dyn Sink>,
    config: Arc<ConfigRegistry>,
    defaults: RwLock<CallDefaults>,
}

impl Logger {
    pub fn new(name: impl Into<String>, sink: Arc<dyn Sink>, config: Arc<ConfigRegistry>) -> Self {
        let name = name.into();
        let id = InstanceId::next();
        debug!(logger = %name, id = %id, "Created logger");
        Self {
            name,
            id,
            sink,
            config,
            defaults: RwLock::new(CallDefaults::default()),
        }
    }

    /// Create a logger ready to be shared between decorators and a registry.
    pub fn shared(
        name: impl Into<String>,
        sink: Arc<dyn Sink>,
        config: Arc<ConfigRegistry>,
    ) -> Arc<Self> {
        Arc::new(Self::new(name, sink, config))
    }

    pub fn config(&self) -> &Arc<ConfigRegistry> {
        &self.config
    }

    // ==================== Call defaults ====================

    /// Set the topic and level used by statements that select neither.
    ///
    /// Fails once the configuration registry is frozen.
    pub fn with_defaults(
        &self,
        topic: impl Into<Topic>,
        level: LogLevel,
    ) -> Result<&Self, ConfigError> {
        if self.config.is_frozen() {
            warn!(logger = %self.name, "Rejected call defaults: configuration frozen");
            return Err(ConfigError::Frozen);
        }
        *self.defaults.write().unwrap_or_else(PoisonError::into_inner) = CallDefaults {
            topic: topic.into(),
            level,
        };
        Ok(self)
    }

    pub fn call_defaults(&self) -> CallDefaults {
        self.defaults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ==================== Gating ====================

    /// Topic filter and level threshold for an entry.
    pub fn should_log(&self, meta: &EntryMeta) -> bool {
        if !meta.topic.is_empty() && !self.config.is_topic_enabled(meta.topic.as_str()) {
            return false;
        }
        meta.level.passes(self.config.effective_level(&self.name))
    }

    // ==================== Thread-scoped entry state ====================

    /// Undecorated text of the last entry started on this thread.
    pub fn last_message(&self) -> String {
        LAST_ENTRY.with(|last| {
            last.borrow()
                .get(&self.id)
                .map(|entry| entry.message.clone())
                .unwrap_or_default()
        })
    }

    /// Level of the last entry started on this thread, or the default call
    /// level if there was none.
    pub fn log_level(&self) -> LogLevel {
        LAST_ENTRY
            .with(|last| last.borrow().get(&self.id).map(|entry| entry.level))
            .unwrap_or_else(|| self.call_defaults().level)
    }

    pub(crate) fn begin_entry(&self, level: LogLevel) {
        LAST_ENTRY.with(|last| {
            last.borrow_mut().insert(
                self.id,
                LastEntry {
                    message: String::new(),
                    level,
                },
            );
        });
    }

    pub(crate) fn record_message(&self, message: String) {
        LAST_ENTRY.with(|last| {
            last.borrow_mut().entry(self.id).or_default().message = message;
        });
    }

    #[cfg(test)]
    fn has_entry_slot(&self) -> bool {
        LAST_ENTRY.with(|last| last.borrow().contains_key(&self.id))
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown
        let _ = LAST_ENTRY.try_with(|last| {
            if let Ok(mut last) = last.try_borrow_mut() {
                last.remove(&self.id);
            }
        });
    }
}

impl LogTarget for Logger {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InstanceId {
        self.id
    }

    fn write(&self, fragment: Fragment<'_>) -> Result<(), SinkError> {
        match fragment {
            Fragment::Text(text) => self.sink.append(text),
            Fragment::End(_) => self.sink.append(TERMINATOR),
        }
    }

    fn origin(&self) -> &Logger {
        self
    }
}

impl Emit for Logger {
    fn target(&self) -> &dyn LogTarget {
        self
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSink;

    #[test]
    fn test_identity() {
        let config = Arc::new(ConfigRegistry::new());
        let a = Logger::new("console", Arc::new(RecordingSink::default()), config.clone());
        let b = Logger::new("console", Arc::new(RecordingSink::default()), config);

        assert_eq!(a.name(), "console");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.origin().id(), a.id());
        assert!(a.wrapped().is_none());
        assert!(!a.provides_location());
    }

    #[test]
    fn test_write_appends_terminator_on_end() {
        let sink = Arc::new(RecordingSink::default());
        let logger = Logger::new("console", sink.clone(), Arc::new(ConfigRegistry::new()));
        let meta = EntryMeta::new("console", LogLevel::Info, Topic::none());

        logger.write(Fragment::Text("hello")).unwrap();
        logger.write(Fragment::Text("\n")).unwrap();
        logger.write(Fragment::End(&meta)).unwrap();

        assert_eq!(sink.appends(), vec!["hello", "\n", TERMINATOR]);
    }

    #[test]
    fn test_should_log_uses_override_then_default() {
        let config = Arc::new(ConfigRegistry::with_default_level(LogLevel::Warning));
        let logger = Logger::new("console", Arc::new(RecordingSink::default()), config.clone());
        let info = EntryMeta::new("console", LogLevel::Info, Topic::none());

        assert!(!logger.should_log(&info));
        config.set_logger_level("console", LogLevel::Debug).unwrap();
        assert!(logger.should_log(&info));
    }

    #[test]
    fn test_should_log_filters_topics() {
        let config = Arc::new(ConfigRegistry::new());
        config.set_topics(["net"]).unwrap();
        let logger = Logger::new("console", Arc::new(RecordingSink::default()), config);

        let listed = EntryMeta::new("console", LogLevel::Info, Topic::from("net"));
        let unlisted = EntryMeta::new("console", LogLevel::Info, Topic::from("db"));
        let untagged = EntryMeta::new("console", LogLevel::Info, Topic::none());

        assert!(logger.should_log(&listed));
        assert!(!logger.should_log(&unlisted));
        assert!(logger.should_log(&untagged));
    }

    #[test]
    fn test_drop_releases_entry_slot() {
        let config = Arc::new(ConfigRegistry::new());
        let logger = Logger::new("console", Arc::new(RecordingSink::default()), config.clone());
        let other = Logger::new("console", Arc::new(RecordingSink::default()), config);
        let id = logger.id();

        logger.begin_entry(LogLevel::Info);
        logger.record_message("hello".to_string());
        other.begin_entry(LogLevel::Error);
        assert!(logger.has_entry_slot());

        drop(logger);

        assert!(!LAST_ENTRY.with(|last| last.borrow().contains_key(&id)));
        assert!(other.has_entry_slot());
        assert_eq!(other.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_many_short_lived_loggers_leave_no_slots() {
        let config = Arc::new(ConfigRegistry::new());
        let before = LAST_ENTRY.with(|last| last.borrow().len());

        for _ in 0..100 {
            let logger = Logger::new("console", Arc::new(RecordingSink::default()), config.clone());
            logger.begin_entry(LogLevel::Info);
        }

        assert_eq!(LAST_ENTRY.with(|last| last.borrow().len()), before);
    }

    #[test]
    fn test_with_defaults_rejected_after_freeze() {
        let config = Arc::new(ConfigRegistry::new());
        let logger = Logger::new("console", Arc::new(RecordingSink::default()), config.clone());

        logger.with_defaults("net", LogLevel::Info).unwrap();
        config.freeze();

        assert_eq!(
            logger.with_defaults("db", LogLevel::Error).unwrap_err(),
            ConfigError::Frozen
        );
        assert_eq!(
            logger.call_defaults(),
            CallDefaults {
                topic: Topic::from("net"),
                level: LogLevel::Info,
            }
        );
    }

    #[test]
    fn test_last_entry_state_is_thread_scoped() {
        let logger = Arc::new(Logger::new(
            "console",
            Arc::new(RecordingSink::default()),
            Arc::new(ConfigRegistry::new()),
        ));
        logger.begin_entry(LogLevel::Error);
        logger.record_message("main thread".to_string());

        let other = logger.clone();
        let seen = std::thread::spawn(move || (other.last_message(), other.log_level()))
            .join()
            .unwrap();

        assert_eq!(seen, (String::new(), LogLevel::None));
        assert_eq!(logger.last_message(), "main thread");
        assert_eq!(logger.log_level(), LogLevel::Error);
    }
}
