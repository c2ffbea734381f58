//! Completion Resolver
//!
//! Given the command tree and the tokens typed so far, decides whether the
//! cursor is on a flag name, a flag value, or a positional argument /
//! sub-command, asks the matching [`CandidateSource`] for candidates, filters
//! them by the typed prefix, and settles the directive.
//!
//! Resolution is a pure function of the tree and the request: nothing is kept
//! between requests, so the same request always yields the same answer.

use crate::candidate::{Candidate, Completions};
use crate::directive::Directive;
use crate::source::{CandidateSource, CompletionContext};
use crate::tree::{CommandTree, FlagSpec, Lookup};
use tracing::debug;

/// Tokens before the cursor plus the (possibly empty) token under it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionRequest {
    pub args: Vec<String>,
    pub to_complete: String,
}

impl CompletionRequest {
    pub fn new<I, S>(args: I, to_complete: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            to_complete: to_complete.into(),
        }
    }

    /// Split raw request tokens: the last one is the token under the cursor.
    /// An empty token list completes the empty string.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        match tokens.split_last() {
            Some((last, rest)) => Self::new(rest.iter().map(|s| s.as_ref()), last.as_ref()),
            None => Self::default(),
        }
    }
}

/// What the cursor token turned out to be.
#[derive(Debug)]
enum Target<'t> {
    /// Value of `flag`; `prefix` is the `--flag=` part typed in the same token
    FlagValue {
        flag: &'t FlagSpec,
        prefix: String,
        value: String,
    },
    /// `-x=...` or `--name=...` naming a flag that does not exist or takes no value
    UnknownFlagValue(String),
    FlagName,
    Positional,
}

/// Resolves completion requests against one command tree.
pub struct CompletionResolver<'t> {
    tree: &'t CommandTree,
    include_descriptions: bool,
}

impl<'t> CompletionResolver<'t> {
    pub fn new(tree: &'t CommandTree) -> Self {
        Self {
            tree,
            include_descriptions: true,
        }
    }

    /// Whether candidates carry their `<TAB>description` suffix.
    pub fn include_descriptions(mut self, include: bool) -> Self {
        self.include_descriptions = include;
        self
    }

    /// Resolve one request into ordered candidates and a directive.
    pub fn resolve(&self, request: &CompletionRequest) -> Completions {
        let lookup = self.tree.lookup_path(&request.args);
        let target = classify(&lookup, &request.to_complete);
        debug!(
            command = %lookup.command_path(),
            args = ?lookup.args,
            to_complete = %request.to_complete,
            target = ?target,
            "Resolving completion"
        );

        let ctx = CompletionContext {
            command: lookup.command(),
            command_path: &lookup.path,
            flags: &lookup.flags,
        };

        let mut completions = match target {
            Target::FlagValue {
                flag,
                prefix,
                value,
            } => {
                debug!(flag = %flag.long, prefix = %prefix, "Completing flag value");
                self.complete_flag_value(&ctx, &lookup, flag, &value)
            }
            Target::UnknownFlagValue(token) => {
                debug!(token = %token, "No flag value to complete");
                Completions::directive_only(Directive::DEFAULT)
            }
            Target::FlagName => self.complete_flag_name(&ctx, &lookup, &request.to_complete),
            Target::Positional => self.complete_positional(&ctx, &lookup, &request.to_complete),
        };

        if completions.directive.is_error() {
            return Completions::error();
        }
        if !self.include_descriptions {
            completions.candidates = completions
                .candidates
                .into_iter()
                .map(Candidate::without_description)
                .collect();
        }
        debug!(
            candidates = completions.candidates.len(),
            directive = %completions.directive,
            "Completion resolved"
        );
        completions
    }

    fn complete_flag_value(
        &self,
        ctx: &CompletionContext<'_>,
        lookup: &Lookup<'t>,
        flag: &'t FlagSpec,
        value: &str,
    ) -> Completions {
        match &flag.value_fn {
            Some(callback) => {
                let raw = CandidateSource::FlagCallback(flag, callback).collect(
                    ctx,
                    &lookup.args,
                    value,
                    self.include_descriptions,
                );
                filter_unless_directive_filter(raw, value)
            }
            None => Completions::directive_only(Directive::DEFAULT),
        }
    }

    fn complete_flag_name(
        &self,
        ctx: &CompletionContext<'_>,
        lookup: &Lookup<'t>,
        to_complete: &str,
    ) -> Completions {
        let outstanding = lookup.outstanding_required();
        let required = filter_prefix(
            CandidateSource::FlagNames(outstanding).collect(
                ctx,
                &lookup.args,
                to_complete,
                self.include_descriptions,
            ),
            to_complete,
        );
        if !required.candidates.is_empty() {
            return required;
        }

        let unset: Vec<&FlagSpec> = lookup
            .available_flags()
            .into_iter()
            .filter(|f| !f.hidden && !lookup.flags.is_changed(&f.long))
            .collect();
        filter_prefix(
            CandidateSource::FlagNames(unset).collect(
                ctx,
                &lookup.args,
                to_complete,
                self.include_descriptions,
            ),
            to_complete,
        )
    }

    fn complete_positional(
        &self,
        ctx: &CompletionContext<'_>,
        lookup: &Lookup<'t>,
        to_complete: &str,
    ) -> Completions {
        let command = lookup.command();
        let at_capacity = command
            .max_args
            .map(|max| lookup.args.len() >= max)
            .unwrap_or(false);
        let outstanding = lookup.outstanding_required();
        let gated = !outstanding.is_empty();
        let required = filter_prefix(
            CandidateSource::FlagNames(outstanding).collect(
                ctx,
                &lookup.args,
                to_complete,
                self.include_descriptions,
            ),
            to_complete,
        );

        if at_capacity && !lookup.args.is_empty() {
            debug!(given = lookup.args.len(), "No further arguments accepted");
            return Completions {
                candidates: required.candidates,
                directive: Directive::NO_FILE_COMP,
            };
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut directive = if at_capacity {
            Directive::NO_FILE_COMP
        } else {
            Directive::DEFAULT
        };

        if lookup.args.is_empty() {
            let subs = CandidateSource::Subcommands(command).collect(
                ctx,
                &lookup.args,
                to_complete,
                self.include_descriptions,
            );
            candidates.extend(filter_prefix(subs, to_complete).candidates);
        }

        candidates.extend(required.candidates);

        let positional = if at_capacity {
            None
        } else if !command.valid_args.is_empty() {
            Some(CandidateSource::StaticList(command.valid_args.as_slice()))
        } else {
            command
                .valid_args_fn
                .as_ref()
                .map(CandidateSource::CommandCallback)
        };
        if let Some(source) = positional {
            let raw = source.collect(ctx, &lookup.args, to_complete, self.include_descriptions);
            if raw.directive.is_error() {
                return Completions::error();
            }
            let raw = filter_unless_directive_filter(raw, to_complete);
            directive = directive.merge(raw.directive);
            candidates.extend(raw.candidates);
        }

        if gated {
            directive = Directive::NO_FILE_COMP;
        }
        Completions {
            candidates,
            directive,
        }
    }
}

/// Decide what the cursor token is.
fn classify<'t>(lookup: &Lookup<'t>, to_complete: &str) -> Target<'t> {
    if lookup.after_terminator {
        return Target::Positional;
    }
    if to_complete.starts_with('-') {
        if let Some(eq) = to_complete.find('=') {
            let (prefix, value) = to_complete.split_at(eq + 1);
            let name = &prefix[..prefix.len() - 1];
            let flag = if let Some(long) = name.strip_prefix("--") {
                lookup.find_long(long)
            } else {
                let short = &name[1..];
                let mut chars = short.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => lookup.find_short(c),
                    _ => None,
                }
            };
            return match flag {
                Some(flag) if flag.takes_value => Target::FlagValue {
                    flag,
                    prefix: prefix.to_string(),
                    value: value.to_string(),
                },
                _ => Target::UnknownFlagValue(to_complete.to_string()),
            };
        }
        return Target::FlagName;
    }

    if let Some(flag) = lookup.pending {
        return Target::FlagValue {
            flag,
            prefix: String::new(),
            value: to_complete.to_string(),
        };
    }

    Target::Positional
}

/// Keep candidates whose value starts with `prefix`, preserving order.
pub fn filter_prefix(mut completions: Completions, prefix: &str) -> Completions {
    completions.candidates.retain(|c| c.matches(prefix));
    completions
}

/// Extension and directory filters carry filter arguments, not completions,
/// so they pass through unfiltered.
fn filter_unless_directive_filter(completions: Completions, prefix: &str) -> Completions {
    if completions.directive.is_filter() {
        completions
    } else {
        filter_prefix(completions, prefix)
    }
}
