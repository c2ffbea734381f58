//! Candidate Sources
//!
//! Everything that can produce raw candidates for a request: user callbacks on
//! commands and flags, static vocabularies, and the two sources the resolver
//! synthesizes itself (flag names and sub-command names).

use crate::candidate::{Candidate, Completions};
use crate::directive::Directive;
use crate::error::CompletionError;
use crate::tree::{CommandSpec, FlagSpec, FlagState};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// What a callback can see about the request it is answering.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    /// The effective command
    pub command: &'a CommandSpec,
    /// Commands from the root down to `command`
    pub command_path: &'a [&'a CommandSpec],
    /// Flags already supplied on the command line
    pub flags: &'a FlagState,
}

impl<'a> CompletionContext<'a> {
    /// Value of a flag already typed on the line, if any.
    pub fn flag_value(&self, long: &str) -> Option<&'a str> {
        self.flags.value(long)
    }

    pub fn flag_changed(&self, long: &str) -> bool {
        self.flags.is_changed(long)
    }

    /// Space-separated names from the root to the effective command.
    pub fn command_path_string(&self) -> String {
        self.command_path
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Capability interface for dynamic completion.
///
/// Implemented for every matching closure, so most callers never name it.
pub trait CompletionFn: Send + Sync {
    fn complete(
        &self,
        ctx: &CompletionContext<'_>,
        args: &[String],
        to_complete: &str,
    ) -> anyhow::Result<Completions>;
}

impl<F> CompletionFn for F
where
    F: Fn(&CompletionContext<'_>, &[String], &str) -> anyhow::Result<Completions> + Send + Sync,
{
    fn complete(
        &self,
        ctx: &CompletionContext<'_>,
        args: &[String],
        to_complete: &str,
    ) -> anyhow::Result<Completions> {
        self(ctx, args, to_complete)
    }
}

/// Shared handle to a completion callback, stored on commands and flags.
#[derive(Clone)]
pub struct Callback(Arc<dyn CompletionFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&CompletionContext<'_>, &[String], &str) -> anyhow::Result<Completions>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap an existing [`CompletionFn`] implementation.
    pub fn from_impl(f: Arc<dyn CompletionFn>) -> Self {
        Self(f)
    }

    /// Run the callback, converting an error or a panic into a [`CompletionError`].
    pub fn invoke(
        &self,
        ctx: &CompletionContext<'_>,
        args: &[String],
        to_complete: &str,
    ) -> Result<Completions, CompletionError> {
        let command = ctx.command_path_string();
        match catch_unwind(AssertUnwindSafe(|| self.0.complete(ctx, args, to_complete))) {
            Ok(Ok(completions)) => Ok(completions),
            Ok(Err(e)) => Err(CompletionError::CallbackFailed {
                command,
                message: format!("{:#}", e),
            }),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(CompletionError::CallbackPanicked { command, message })
            }
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Where a batch of raw candidates comes from.
#[derive(Debug, Clone)]
pub enum CandidateSource<'a> {
    /// Declared fixed vocabulary
    StaticList(&'a [Candidate]),
    /// Positional-argument callback of a command
    CommandCallback(&'a Callback),
    /// Value callback of one flag
    FlagCallback(&'a FlagSpec, &'a Callback),
    /// Name forms of the given flags
    FlagNames(Vec<&'a FlagSpec>),
    /// Names of a command's visible sub-commands
    Subcommands(&'a CommandSpec),
}

impl CandidateSource<'_> {
    /// Produce raw candidates. Callback faults become [`Completions::error`].
    ///
    /// Prefix filtering is left to the resolver, except for aliases, which are
    /// only offered when the primary name does not already match.
    pub fn collect(
        &self,
        ctx: &CompletionContext<'_>,
        args: &[String],
        to_complete: &str,
        include_descriptions: bool,
    ) -> Completions {
        match self {
            CandidateSource::StaticList(values) => {
                Completions::new(values.iter().cloned(), Directive::NO_FILE_COMP)
            }
            CandidateSource::CommandCallback(callback) => {
                run_callback(callback, ctx, args, to_complete, None)
            }
            CandidateSource::FlagCallback(flag, callback) => {
                run_callback(callback, ctx, args, to_complete, Some(flag.long.as_str()))
            }
            CandidateSource::FlagNames(flags) => Completions::new(
                flags.iter().flat_map(|f| f.forms(include_descriptions)),
                Directive::DEFAULT,
            ),
            CandidateSource::Subcommands(command) => {
                let mut candidates = Vec::new();
                for sub in command.visible_subcommands() {
                    let describe = |value: &str| {
                        if include_descriptions {
                            Candidate::with_description(value, sub.short.clone())
                        } else {
                            Candidate::new(value)
                        }
                    };
                    candidates.push(describe(sub.name.as_str()));
                    if !to_complete.is_empty() && !sub.name.starts_with(to_complete) {
                        candidates.extend(sub.aliases.iter().map(|a| describe(a.as_str())));
                    }
                }
                Completions::new(candidates, Directive::DEFAULT)
            }
        }
    }
}

fn run_callback(
    callback: &Callback,
    ctx: &CompletionContext<'_>,
    args: &[String],
    to_complete: &str,
    flag: Option<&str>,
) -> Completions {
    match callback.invoke(ctx, args, to_complete) {
        Ok(completions) if completions.directive.is_error() => Completions::error(),
        Ok(completions) => completions,
        Err(e) => {
            warn!(flag = ?flag, error = %e, "Completion callback fault");
            Completions::error()
        }
    }
}

/// Callback offering a fixed list of values, with file completion disabled.
pub fn static_values<I, S>(values: I) -> Callback
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let values: Vec<Candidate> = values
        .into_iter()
        .map(|v| Candidate::parse(v.as_ref()))
        .collect();
    Callback::new(move |_ctx, _args, _to_complete| {
        Ok(Completions::new(values.clone(), Directive::NO_FILE_COMP))
    })
}

/// Callback restricting file completion to the given extensions.
pub fn file_extensions<I, S>(extensions: I) -> Callback
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extensions: Vec<Candidate> = extensions
        .into_iter()
        .map(|e| Candidate::new(e.as_ref().trim_start_matches('.')))
        .collect();
    Callback::new(move |_ctx, _args, _to_complete| {
        Ok(Completions::new(extensions.clone(), Directive::FILTER_FILE_EXT))
    })
}

/// Callback restricting completion to directories, inside `subdir` when given.
pub fn directories(subdir: Option<&str>) -> Callback {
    let candidates: Vec<Candidate> = subdir
        .filter(|s| !s.is_empty())
        .map(Candidate::new)
        .into_iter()
        .collect();
    Callback::new(move |_ctx, _args, _to_complete| {
        Ok(Completions::new(candidates.clone(), Directive::FILTER_DIRS))
    })
}
