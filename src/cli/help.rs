//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "completion", "request").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Completion { .. } => "completion",
        Commands::Preview { .. } => "preview",
        Commands::Validate => "validate",
        Commands::Complete { .. } => "request",
        Commands::CompleteNoDesc { .. } => "request.no_desc",
    }
}
