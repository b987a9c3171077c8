//! Logging configuration registry with a one-way freeze.
//!
//! # Rules
//!
//! | Operation | Before freeze | After freeze |
//! |-----------|---------------|--------------|
//! | `set_default_level` | replaces the default | `Frozen` |
//! | `set_topics` | replaces the allow-list | `Frozen` |
//! | `set_logger_level` | sets once per name | `Frozen` |
//! | `apply` | all or nothing | `Frozen` |
//! | `freeze` | latches | no-op |
//!
//! Queries (`effective_level`, `is_topic_enabled`) never fail.
//!
//! A registry is constructed explicitly and shared by `Arc` with every
//! logger built against it, so independent registries can coexist (e.g.
//! one per test).

use crate::core::{error::ConfigError, level::LogLevel, topic::Topic};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Point-in-time copy of the registry state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub default_level: LogLevel,
    pub overrides: BTreeMap<String, LogLevel>,
    /// Empty means every topic is enabled
    pub topics: BTreeSet<Topic>,
    pub frozen: bool,
}

/// Process-wide logging configuration.
///
/// Mutators are expected to run during a single-threaded startup phase;
/// the internal lock only keeps concurrent reads memory-safe.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    state: RwLock<ConfigSnapshot>,
}

impl ConfigRegistry {
    /// Create a registry with default level `None` (everything emits),
    /// no overrides and no topic filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given default level.
    pub fn with_default_level(level: LogLevel) -> Self {
        Self {
            state: RwLock::new(ConfigSnapshot {
                default_level: level,
                ..ConfigSnapshot::default()
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ConfigSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access that fails while frozen.
    fn write(&self) -> Result<RwLockWriteGuard<'_, ConfigSnapshot>, ConfigError> {
        let state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.frozen {
            return Err(ConfigError::Frozen);
        }
        Ok(state)
    }

    // ==================== Mutators ====================

    /// Set default level and topic allow-list in one step.
    pub fn initialize<I, T>(&self, level: LogLevel, topics: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        let mut state = self.write()?;
        state.default_level = level;
        state.topics = topics.into_iter().map(Into::into).collect();
        Ok(())
    }

    pub fn set_default_level(&self, level: LogLevel) -> Result<(), ConfigError> {
        self.write()?.default_level = level;
        Ok(())
    }

    /// Replace the topic allow-list. An empty list enables every topic.
    pub fn set_topics<I, T>(&self, topics: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        let topics = topics.into_iter().map(Into::into).collect();
        self.write()?.topics = topics;
        Ok(())
    }

    /// Set the level override for one logger. Overrides are set-once.
    pub fn set_logger_level(&self, logger: &str, level: LogLevel) -> Result<(), ConfigError> {
        let mut state = self.write()?;
        if let Some(existing) = state.overrides.get(logger) {
            return Err(ConfigError::LevelAlreadySet {
                logger: logger.to_string(),
                level: *existing,
            });
        }
        state.overrides.insert(logger.to_string(), level);
        Ok(())
    }

    /// Set default level, topic allow-list and level overrides as one change.
    ///
    /// Every override is checked before anything is written, so a rejected
    /// call leaves the registry exactly as it was.
    pub fn apply<I, T>(
        &self,
        level: LogLevel,
        topics: I,
        overrides: &BTreeMap<String, LogLevel>,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        let topics = topics.into_iter().map(Into::into).collect();
        let mut state = self.write()?;
        if let Some((logger, existing)) = overrides
            .keys()
            .find_map(|logger| state.overrides.get_key_value(logger))
        {
            return Err(ConfigError::LevelAlreadySet {
                logger: logger.clone(),
                level: *existing,
            });
        }

        state.default_level = level;
        state.topics = topics;
        state
            .overrides
            .extend(overrides.iter().map(|(logger, level)| (logger.clone(), *level)));
        Ok(())
    }

    /// Disable all further mutation. Idempotent and irreversible.
    pub fn freeze(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .frozen = true;
    }

    // ==================== Queries ====================

    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    pub fn default_level(&self) -> LogLevel {
        self.read().default_level
    }

    /// Override for `logger` if one was set, else the default level.
    pub fn effective_level(&self, logger: &str) -> LogLevel {
        let state = self.read();
        state
            .overrides
            .get(logger)
            .copied()
            .unwrap_or(state.default_level)
    }

    /// True when the allow-list is empty or contains `topic` exactly.
    pub fn is_topic_enabled(&self, topic: &str) -> bool {
        let state = self.read();
        state.topics.is_empty() || state.topics.contains(topic)
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        self.read().clone()
    }
}
