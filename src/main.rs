// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod blueprint;
mod errors;
mod file_utils;
mod patch;
mod spt_line;
mod validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate all script files and write patch documents (default command)
    Check,

    /// Apply reviewed patch documents back onto the working files
    Apply,

    /// Restore interrupted writes from their `.bak` files
    Restore,

    /// Count duplicated original-text sentences across all script files
    Stats,

    /// Generate shell completions for sptcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sptcheck - bilingual script checker and patcher
///
/// Validates SPT script files against format and symbol rules, compares
/// the original column with its blueprint copy, and round-trips the
/// findings through reviewable patch files.
#[derive(Parser, Debug)]
#[command(name = "sptcheck")]
#[command(version = "1.0.0")]
#[command(about = "Bilingual script checker and patcher")]
#[command(long_about = "sptcheck validates bilingual SPT script files and round-trips the
findings through reviewable patch files.

EXAMPLES:
    sptcheck                            # Check everything under the script directory
    sptcheck check --spt-dir scripts    # Check a different script directory
    sptcheck apply                      # Apply reviewed patches back onto the scripts
    sptcheck restore                    # Recover from an interrupted apply
    sptcheck stats                      # Duplicate-sentence table for the original column
    sptcheck completions bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the working script files
    #[arg(long)]
    spt_dir: Option<String>,

    /// Directory holding the blueprint copies of the original column
    #[arg(long)]
    blueprint_dir: Option<String>,

    /// Directory receiving patch documents and the aggregate report
    #[arg(long)]
    result_dir: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sptcheck", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(spt_dir) = &cli.spt_dir {
        config.spt_dir = spt_dir.clone();
    }
    if let Some(blueprint_dir) = &cli.blueprint_dir {
        config.blueprint_dir = blueprint_dir.clone();
    }
    if let Some(result_dir) = &cli.result_dir {
        config.result_dir = result_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            let summary = controller.run_check()?;
            info!(
                "{} files checked, {} with violations",
                summary.files_checked, summary.files_with_violations
            );
        }
        Commands::Apply => {
            let summary = controller.run_apply()?;
            info!(
                "{} patch documents, {} lines updated",
                summary.documents, summary.updated
            );
        }
        Commands::Restore => {
            let restored = controller.run_restore()?;
            info!("{} files restored", restored);
        }
        Commands::Stats => {
            let out_path = controller.run_stats()?;
            info!("Statistics written to {:?}", out_path);
        }
        Commands::Completions { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}
