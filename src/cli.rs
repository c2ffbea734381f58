//! CLI domain: parse, route, help, output, and presentation only.
//! No engine logic here; a single route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{parse_args, Cli, Commands};
pub use presentation::{format_preview_json, format_preview_text, format_validate_result_text};
pub use route::RunContext;
