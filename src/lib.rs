//! Shellcomp: Shell Completion Engine
//!
//! Resolves completion candidates for a described command tree, answers the
//! hidden `__complete` request protocol, and compiles the client scripts that
//! bash, zsh, fish and PowerShell load to speak it.

pub mod candidate;
pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod render;
pub mod resolver;
pub mod script;
pub mod source;
pub mod tree;

pub use candidate::{Candidate, Completions};
pub use directive::Directive;
pub use error::{ApiError, CompletionError, ManifestError};
pub use resolver::{CompletionRequest, CompletionResolver};
pub use script::{ScriptCompiler, ScriptOptions, Shell};
pub use source::{Callback, CandidateSource, CompletionContext, CompletionFn};
pub use tree::{CommandSpec, CommandTree, FlagSpec};
