//! Shellcomp CLI Binary
//!
//! Command-line interface for the shellcomp completion engine.

use shellcomp::cli::{parse_args, Cli, RunContext};
use shellcomp::config::ConfigLoader;
use shellcomp::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = match parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let logging_config = build_logging_config(&cli);

    // Request answers own stdout, so logging never lands there.
    if let Err(e) = init_logging(Some(&logging_config), cli.command.is_request()) {
        eprintln!("Failed to initialize logging: {}", e);
        if cli.command.is_request() {
            println!(":1");
            return;
        }
        process::exit(1);
    }

    info!("Shellcomp CLI starting");

    let context = match RunContext::new(cli.dir.clone(), cli.config.clone(), cli.manifest.clone()) {
        Ok(ctx) => ctx,
        Err(e) if cli.command.is_request() => {
            // A broken config must not break the user's shell.
            error!("Error loading configuration: {}", e);
            eprintln!("{}", shellcomp::cli::map_error(&e));
            println!(":1");
            return;
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", shellcomp::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", shellcomp::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config files.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load_with(&cli.dir, cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
