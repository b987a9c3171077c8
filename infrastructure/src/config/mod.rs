//! Configuration file loading for chainlog
//!
//! This module handles file I/O and merging of configuration from multiple sources,
//! and wiring the merged configuration into live loggers.
//! The priority order (highest to lowest):
//!
//! 1. `CHAINLOG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./chainlog.toml` or `./.chainlog.toml`
//! 4. Global config: `<config dir>/chainlog/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod setup;

pub use file_config::{ConfigValidationError, DecoratorKind, FileConfig, LoggerConfig, SinkKind};
pub use loader::{ConfigLoader, ENV_PREFIX};
pub use setup::{SetupError, build_logger, build_registry};
