//! Logger Registry
//!
//! The [`LoggerRegistry`] maps names to configured targets (a logger or the
//! outermost decorator of its chain) so components can look their logger up
//! instead of passing it around.
//!
//! # Usage
//!
//! ```ignore
//! let registry = LoggerRegistry::new();
//! registry.add(LevelDecorator::decorate(console_logger("console", config)));
//!
//! let console = registry.lookup("console_leveled")?;
//! console.warning().push("disk almost full");
//! ```
//!
//! Registering a name again replaces the previous target.

use chainlog_application::LogTarget;
use chainlog_domain::UsageError;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

/// Named targets, kept in name order.
#[derive(Default)]
pub struct LoggerRegistry {
    targets: RwLock<BTreeMap<String, Arc<dyn LogTarget>>>,
}

impl LoggerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` under `name`, replacing any previous target.
    pub fn register(&self, name: impl Into<String>, target: Arc<dyn LogTarget>) {
        let name = name.into();
        debug!(name = %name, target = %target.name(), "Registered logger");
        self.targets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, target);
    }

    /// Register `target` under its own name.
    pub fn add(&self, target: Arc<dyn LogTarget>) {
        self.register(target.name().to_string(), target);
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<dyn LogTarget>, UsageError> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| UsageError::LoggerNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Every registered name followed by a newline, in name order.
    pub fn list_names(&self) -> String {
        self.read()
            .keys()
            .map(|name| format!("{name}\n"))
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<dyn LogTarget>>> {
        self.targets.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
