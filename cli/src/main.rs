//! CLI entrypoint for chainlog
//!
//! This is the main binary that wires together all layers: it loads the
//! configuration, builds the logger registry from it and writes one entry.

mod commands;

use anyhow::{Context, Result, bail};
use chainlog_application::{Emit, LogTarget, SinkError};
use chainlog_domain::{ConfigRegistry, LogLevel};
use chainlog_infrastructure::{
    ConfigLoader, DecoratorKind, FileConfig, LoggerConfig, build_registry,
};
use clap::Parser;
use commands::Cli;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logger created when the configuration defines none
const FALLBACK_LOGGER: &str = "console";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered diagnostics are flushed on exit
    let _guard = init_tracing(cli.verbose, cli.trace_file.as_deref())?;

    info!("Starting chainlog");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    with_fallback_logger(&mut file_config);

    // === Dependency Injection ===
    let config = Arc::new(ConfigRegistry::new());
    let registry = build_registry(&file_config, config)?;

    if cli.list {
        print!("{}", registry.list_names());
        return Ok(());
    }

    let name = match &cli.logger {
        Some(name) => name.as_str(),
        None => file_config
            .loggers
            .first()
            .map(|logger| logger.name.as_str())
            .unwrap_or(FALLBACK_LOGGER),
    };
    let target = registry.lookup(name)?;

    if cli.message.is_empty() {
        bail!("A message is required. Use --list to see the configured loggers.");
    }

    debug!(logger = %name, level = %cli.level, "Writing entry");
    write_entry(target.as_ref(), cli.level, cli.topic.as_deref(), &cli.message)
        .with_context(|| format!("Failed to write to logger '{name}'"))?;

    Ok(())
}

/// Install the diagnostics subscriber for chainlog itself.
///
/// Diagnostics go to stderr, or to `trace_file` through a non-blocking
/// writer, so they never mix with entries written to stdout.
fn init_tracing(verbose: u8, trace_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = trace_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let Some(file_name) = path.file_name() else {
        bail!("--trace-file must name a file: {}", path.display());
    };
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Ensure there is a logger to write to.
fn with_fallback_logger(file_config: &mut FileConfig) {
    if file_config.loggers.is_empty() {
        file_config
            .loggers
            .push(LoggerConfig::console(FALLBACK_LOGGER).with_decorators([DecoratorKind::Level]));
    }
}

/// Write `words` as one entry, separated by spaces.
fn write_entry(
    target: &dyn LogTarget,
    level: LogLevel,
    topic: Option<&str>,
    words: &[String],
) -> Result<(), SinkError> {
    let mut statement = target.level(level);
    if let Some(topic) = topic {
        statement = statement.topic(topic);
    }

    let Some((first, rest)) = words.split_first() else {
        return Ok(());
    };
    let mut entry = statement.push(first);
    for word in rest {
        entry = entry.push(' ').push(word);
    }
    entry.finish()
}
