//! CLI command definitions

use chainlog_domain::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chainlog
#[derive(Parser, Debug)]
#[command(name = "chainlog")]
#[command(author, version, about = "Write one log entry through a configured logger chain")]
#[command(long_about = r#"
chainlog builds the loggers described by its configuration and writes one
entry, made of the MESSAGE words, through the selected logger.

An entry is emitted only if its level reaches the logger's effective level
and its topic (if any) is in the topic allow-list.

Configuration files are loaded from (in priority order):
1. CHAINLOG_* environment variables, e.g. CHAINLOG_DEFAULT_LEVEL=warning
   or CHAINLOG_TOPICS=net,db (comma-separated)
2. --config <path>     Explicit config file
3. ./chainlog.toml     Project-level config
4. ~/.config/chainlog/config.toml   Global config

Example:
  chainlog "service started"
  chainlog --level warning --topic net "connection retry" 3
  chainlog -l audit --level error "disk full"
"#)]
pub struct Cli {
    /// Words of the message, written as space-separated fragments
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,

    /// Logger to write to (default: first configured logger)
    #[arg(short, long, value_name = "NAME")]
    pub logger: Option<String>,

    /// Level of the entry (none, debug, log, info, warning, error)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub level: LogLevel,

    /// Topic of the entry
    #[arg(long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// List the configured loggers and exit
    #[arg(long)]
    pub list: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write chainlog's own diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub trace_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
