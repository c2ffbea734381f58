//! CLI parse: clap types for shellcomp. No behavior; definitions only.

use crate::protocol::{REQUEST_CMD, REQUEST_CMD_NO_DESC};
use crate::script::Shell;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shellcomp CLI - shell completion driven by a command manifest
///
/// Global options go before the sub-command: the hidden request commands take
/// every following token verbatim.
#[derive(Parser, Debug)]
#[command(name = "shellcomp")]
#[command(about = "Shell completion engine and script compiler for manifest-described CLIs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Command manifest (overrides completion.manifest from the config)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Configuration file path, layered above the project config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project directory holding .shellcomp.toml
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the completion script for a shell
    Completion {
        /// Target shell (default: completion.default_shell from the config)
        #[arg(value_enum)]
        shell: Option<Shell>,

        /// Ask for completions without descriptions
        #[arg(long)]
        no_descriptions: bool,

        /// Command the script runs to ask for completions
        #[arg(long)]
        invoker: Option<String>,
    },
    /// Show what the shell would offer for a command line
    Preview {
        /// Terminal width used for description layout
        #[arg(long, default_value_t = 80)]
        columns: usize,

        /// Resolve without descriptions
        #[arg(long)]
        no_descriptions: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Words after the program name; the last one is under the cursor
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Check the manifest and configuration
    Validate,
    /// Answer a completion request (used by the generated scripts)
    #[command(name = "__complete", hide = true, disable_help_flag = true)]
    Complete {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Answer a completion request without descriptions
    #[command(name = "__completeNoDesc", hide = true, disable_help_flag = true)]
    CompleteNoDesc {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Parse the command line, passing request-command tokens through verbatim.
///
/// clap would swallow a leading `--` after `__complete`, which the resolver
/// needs to see, so everything after the request command bypasses clap.
pub fn parse_args<I, S>(argv: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let request_at = argv
        .iter()
        .enumerate()
        .skip(1)
        .take_while(|(_, arg)| arg.as_str() != "--")
        .find(|(_, arg)| arg.as_str() == REQUEST_CMD || arg.as_str() == REQUEST_CMD_NO_DESC)
        .map(|(idx, _)| idx);

    let idx = match request_at {
        Some(idx) => idx,
        None => return Cli::try_parse_from(argv),
    };
    let mut cli = Cli::try_parse_from(&argv[..=idx])?;
    if let Commands::Complete { args } | Commands::CompleteNoDesc { args } = &mut cli.command {
        *args = argv[idx + 1..].to_vec();
    }
    Ok(cli)
}

impl Commands {
    /// True for the hidden request commands, whose stdout is the protocol.
    pub fn is_request(&self) -> bool {
        matches!(self, Commands::Complete { .. } | Commands::CompleteNoDesc { .. })
    }
}
