//! Building loggers from configuration
//!
//! [`build_registry`] turns a validated [`FileConfig`] into live targets:
//!
//! 1. validate the file configuration
//! 2. for each `[[loggers]]` entry: open its sink, set its call defaults
//!    and wrap it in its decorator stack (innermost first)
//! 3. apply default level, topics and overrides to the [`ConfigRegistry`]
//! 4. register the loggers and freeze the configuration if requested
//!
//! Any failure before step 3 leaves the [`ConfigRegistry`] untouched.

use super::file_config::{ConfigValidationError, DecoratorKind, FileConfig, LoggerConfig, SinkKind};
use crate::registry::LoggerRegistry;
use crate::sinks::{ConsoleSink, FileSink};
use chainlog_application::{
    DecoratorError, LevelDecorator, LocationDecorator, LogTarget, Logger, Sink, SinkError,
    TimestampDecorator,
};
use chainlog_domain::{ConfigError, ConfigRegistry};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while wiring loggers from configuration
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ConfigValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Logger '{logger}': {source}")]
    Decorator {
        logger: String,
        #[source]
        source: DecoratorError,
    },
}

/// Build every configured logger against `config` and register it.
pub fn build_registry(
    file_config: &FileConfig,
    config: Arc<ConfigRegistry>,
) -> Result<LoggerRegistry, SetupError> {
    file_config.validate()?;

    let targets = file_config
        .loggers
        .iter()
        .map(|logger_config| build_logger(logger_config, config.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    file_config.apply(&config)?;

    let registry = LoggerRegistry::new();
    for (logger_config, target) in file_config.loggers.iter().zip(targets) {
        registry.register(logger_config.name.clone(), target);
    }

    if file_config.freeze {
        config.freeze();
    }
    info!(
        loggers = registry.len(),
        frozen = config.is_frozen(),
        "Logger registry ready"
    );
    Ok(registry)
}

/// Build one logger with its sink, call defaults and decorator stack.
pub fn build_logger(
    logger_config: &LoggerConfig,
    config: Arc<ConfigRegistry>,
) -> Result<Arc<dyn LogTarget>, SetupError> {
    let name = logger_config.name.as_str();
    let sink: Arc<dyn Sink> = match (logger_config.sink, &logger_config.path) {
        (SinkKind::File, Some(path)) => Arc::new(FileSink::open(path)?),
        (SinkKind::File, None) => {
            return Err(ConfigValidationError::MissingFilePath(name.to_string()).into());
        }
        (SinkKind::Console, _) => Arc::new(ConsoleSink::new()),
    };

    let logger = Logger::shared(name, sink, config);
    logger.with_defaults(
        logger_config.default_topic.as_str(),
        logger_config.default_level,
    )?;

    let mut target: Arc<dyn LogTarget> = logger;
    for decorator in &logger_config.decorators {
        target = match decorator {
            DecoratorKind::Location => LocationDecorator::decorate(target),
            DecoratorKind::Level => LevelDecorator::decorate(target),
            DecoratorKind::Timestamp => match &logger_config.timestamp_format {
                Some(format) => TimestampDecorator::with_format(target, format).map_err(
                    |source| SetupError::Decorator {
                        logger: name.to_string(),
                        source,
                    },
                )?,
                None => TimestampDecorator::decorate(target),
            },
        };
    }
    debug!(logger = %name, target = %target.name(), "Built logger from configuration");
    Ok(target)
}
