//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use chainlog_domain::{ConfigError, ConfigRegistry, LogLevel};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("logger name cannot be empty")]
    EmptyLoggerName,

    #[error("logger name '{0}' has surrounding whitespace")]
    UntrimmedLoggerName(String),

    #[error("logger '{0}' is configured more than once")]
    DuplicateLoggerName(String),

    #[error("file logger '{0}' has no path")]
    MissingFilePath(String),
}

/// Where a configured logger writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Console,
    File,
}

/// A decorator in a configured logger's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoratorKind {
    Location,
    Level,
    Timestamp,
}

/// Raw logger configuration from a `[[loggers]]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub sink: SinkKind,
    /// Log file, required for file sinks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Decorator stack, innermost first
    #[serde(default)]
    pub decorators: Vec<DecoratorKind>,
    /// strftime pattern for the timestamp decorator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<String>,
    /// Topic used by statements that do not select one
    #[serde(default)]
    pub default_topic: String,
    /// Level used by statements that do not select one
    #[serde(default)]
    pub default_level: LogLevel,
}

impl LoggerConfig {
    /// A console logger with no decorators.
    pub fn console(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_decorators(mut self, decorators: impl IntoIterator<Item = DecoratorKind>) -> Self {
        self.decorators = decorators.into_iter().collect();
        self
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Level for loggers without an override
    pub default_level: LogLevel,
    /// Topic allow-list; empty enables every topic
    ///
    /// Accepts a list or a comma-separated string (`"net, db"`), which is
    /// how `CHAINLOG_TOPICS` arrives from the environment.
    #[serde(deserialize_with = "topic_list")]
    pub topics: Vec<String>,
    /// Freeze the configuration once loggers are built
    pub freeze: bool,
    /// Per-logger level overrides
    pub levels: BTreeMap<String, LogLevel>,
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TopicList {
    Joined(String),
    Items(Vec<String>),
}

fn topic_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TopicList::deserialize(deserializer)? {
        TopicList::Joined(joined) => split_topics(&joined),
        TopicList::Items(items) => items,
    })
}

/// Split a comma-separated topic list, dropping blank items.
fn split_topics(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for logger in &self.loggers {
            let name = logger.name.as_str();
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyLoggerName);
            }
            if name.trim() != name {
                return Err(ConfigValidationError::UntrimmedLoggerName(name.to_string()));
            }
            if !seen.insert(name) {
                return Err(ConfigValidationError::DuplicateLoggerName(name.to_string()));
            }
            if logger.sink == SinkKind::File && logger.path.is_none() {
                return Err(ConfigValidationError::MissingFilePath(name.to_string()));
            }
        }
        Ok(())
    }

    /// Apply default level, topics and level overrides to `registry`.
    ///
    /// Either everything is applied or, on error, nothing is. Does not
    /// freeze; that happens once loggers are built.
    pub fn apply(&self, registry: &ConfigRegistry) -> Result<(), ConfigError> {
        registry.apply(
            self.default_level,
            self.topics.iter().map(String::as_str),
            &self.levels,
        )
    }

    pub fn logger(&self, name: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|logger| logger.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
default_level = "warning"
topics = ["net", "db"]
freeze = true

[levels]
console = "debug"

[[loggers]]
name = "console"
decorators = ["location", "level", "timestamp"]
timestamp_format = "%H:%M"

[[loggers]]
name = "audit"
sink = "file"
path = "log/audit.log"
default_topic = "audit"
default_level = "info"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_level, LogLevel::Warning);
        assert_eq!(config.topics, vec!["net", "db"]);
        assert!(config.freeze);
        assert_eq!(config.levels.get("console"), Some(&LogLevel::Debug));

        let console = config.logger("console").unwrap();
        assert_eq!(console.sink, SinkKind::Console);
        assert_eq!(
            console.decorators,
            vec![
                DecoratorKind::Location,
                DecoratorKind::Level,
                DecoratorKind::Timestamp
            ]
        );
        assert_eq!(console.timestamp_format.as_deref(), Some("%H:%M"));

        let audit = config.logger("audit").unwrap();
        assert_eq!(audit.sink, SinkKind::File);
        assert_eq!(audit.path, Some(PathBuf::from("log/audit.log")));
        assert_eq!(audit.default_topic, "audit");
        assert_eq!(audit.default_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("topics = [\"ui\"]").unwrap();

        // Defaults should apply
        assert_eq!(config.default_level, LogLevel::None);
        assert!(!config.freeze);
        assert!(config.loggers.is_empty());
        assert_eq!(config.topics, vec!["ui"]);
    }

    #[test]
    fn test_topics_from_comma_separated_string() {
        let config: FileConfig = toml::from_str("topics = \"net, db,,\"").unwrap();
        assert_eq!(config.topics, vec!["net", "db"]);

        let single: FileConfig = toml::from_str("topics = \"net\"").unwrap();
        assert_eq!(single.topics, vec!["net"]);
    }

    #[test]
    fn test_split_topics_drops_blanks() {
        assert_eq!(split_topics(" ui ,net"), vec!["ui", "net"]);
        assert!(split_topics(" , ").is_empty());
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(toml::from_str::<FileConfig>("default_level = \"loud\"").is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let config = FileConfig {
            loggers: vec![LoggerConfig::console("  ")],
            ..FileConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyLoggerName)
        );
    }

    #[test]
    fn test_validate_rejects_untrimmed_name() {
        let config = FileConfig {
            loggers: vec![LoggerConfig::console("console ")],
            ..FileConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UntrimmedLoggerName("console ".to_string()))
        );
    }

    #[test]
    fn test_names_differing_in_whitespace_are_not_merged() {
        let config = FileConfig {
            loggers: vec![LoggerConfig::console("console"), LoggerConfig::console(" console")],
            ..FileConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UntrimmedLoggerName(" console".to_string()))
        );
    }

    #[test]
    fn test_validate_duplicate_name() {
        let config = FileConfig {
            loggers: vec![LoggerConfig::console("console"), LoggerConfig::console("console")],
            ..FileConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateLoggerName("console".to_string()))
        );
    }

    #[test]
    fn test_validate_file_without_path() {
        let config = FileConfig {
            loggers: vec![LoggerConfig {
                name: "audit".to_string(),
                sink: SinkKind::File,
                ..LoggerConfig::default()
            }],
            ..FileConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingFilePath("audit".to_string()))
        );
    }

    #[test]
    fn test_apply_to_registry() {
        let config: FileConfig = toml::from_str(
            r#"
default_level = "error"
topics = ["net"]

[levels]
console = "debug"
"#,
        )
        .unwrap();
        let registry = ConfigRegistry::new();

        config.apply(&registry).unwrap();

        assert_eq!(registry.default_level(), LogLevel::Error);
        assert_eq!(registry.effective_level("console"), LogLevel::Debug);
        assert_eq!(registry.effective_level("file"), LogLevel::Error);
        assert!(registry.is_topic_enabled("net"));
        assert!(!registry.is_topic_enabled("ui"));
        assert!(!registry.is_frozen());
    }

    #[test]
    fn test_apply_conflicting_override_leaves_registry_untouched() {
        let config: FileConfig = toml::from_str(
            r#"
default_level = "error"
topics = ["net"]

[levels]
a = "debug"
b = "info"
"#,
        )
        .unwrap();
        let registry = ConfigRegistry::new();
        registry.set_logger_level("b", LogLevel::Warning).unwrap();
        let before = registry.snapshot();

        assert_eq!(
            config.apply(&registry),
            Err(ConfigError::LevelAlreadySet {
                logger: "b".to_string(),
                level: LogLevel::Warning,
            })
        );
        assert_eq!(registry.snapshot(), before);
        assert_eq!(registry.effective_level("a"), LogLevel::None);
    }

    #[test]
    fn test_apply_to_frozen_registry_fails() {
        let registry = ConfigRegistry::new();
        registry.freeze();

        assert_eq!(
            FileConfig::default().apply(&registry),
            Err(ConfigError::Frozen)
        );
    }

    #[test]
    fn test_serialize_roundtrip_through_toml() {
        let config = FileConfig {
            default_level: LogLevel::Info,
            loggers: vec![LoggerConfig::console("console").with_decorators([DecoratorKind::Level])],
            ..FileConfig::default()
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
