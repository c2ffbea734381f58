//! Logging System
//!
//! Structured logging using the `tracing` crate. Logging is off by default:
//! completion requests run once per keypress and their stdout is the protocol
//! channel, so diagnostics only appear when asked for and go to stderr or a
//! file unless stdout is chosen explicitly.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (when output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Coloured output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "off".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("shellcomp.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(
            self.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(format!("Invalid log level: {}", self.level));
        }
        if self.format != "json" && self.format != "text" {
            return Err(format!("Invalid log format: {}", self.format));
        }
        parse_output_destination(&self.output).map_err(|e| e.to_string())?;
        if self.output == "file" && self.file.as_os_str().is_empty() {
            return Err("Log file path cannot be empty when output is 'file'".to_string());
        }
        Ok(())
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (folded into `config` by the binary)
/// 2. Environment variables (SHELLCOMP_LOG, SHELLCOMP_LOG_FORMAT, ...)
/// 3. Configuration file
/// 4. Defaults
///
/// `protect_stdout` forces a stdout destination over to stderr; it is set
/// while answering a completion request.
pub fn init_logging(config: Option<&LoggingConfig>, protect_stdout: bool) -> Result<(), ApiError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let mut output = determine_output(config)?;
    if protect_stdout && output == Destination::Stdout {
        output = Destination::Stderr;
    }

    let use_color = config.map(|c| c.color).unwrap_or(true) && output != Destination::File;
    let json = format == "json";

    match output {
        Destination::File => {
            let writer = open_log_file(config)?;
            install(filter, json, false, std::sync::Mutex::new(writer))
        }
        Destination::Stderr => install(filter, json, use_color, std::io::stderr),
        Destination::Stdout => install(filter, json, use_color, std::io::stdout),
    }
    Ok(())
}

fn install<W>(filter: EnvFilter, json: bool, ansi: bool, writer: W)
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let base_subscriber = Registry::default().with(filter);
    if json {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .init();
    }
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ApiError> {
    let log_file = config
        .map(|c| c.file.clone())
        .unwrap_or_else(default_log_file);

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("SHELLCOMP_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("off");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    if let Ok(modules_str) = std::env::var("SHELLCOMP_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, module_level)) = module_spec.split_once('=') {
                let directive = format!("{}={}", module.trim(), module_level.trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    ApiError::ConfigError(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ApiError> {
    if let Ok(format) = std::env::var("SHELLCOMP_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Stdout,
    Stderr,
    File,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<Destination, ApiError> {
    if let Ok(output) = std::env::var("SHELLCOMP_LOG_OUTPUT") {
        return parse_output_destination(&output);
    }
    parse_output_destination(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
}

fn parse_output_destination(output: &str) -> Result<Destination, ApiError> {
    match output {
        "stdout" => Ok(Destination::Stdout),
        "stderr" => Ok(Destination::Stderr),
        "file" => Ok(Destination::File),
        _ => Err(ApiError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            output
        ))),
    }
}
