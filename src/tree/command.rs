//! Command definitions and the tree that owns them.

use crate::candidate::{Candidate, Completions};
use crate::source::{Callback, CompletionContext};
use crate::tree::flag::FlagSpec;

/// One command in the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    /// Short description, offered next to the sub-command name
    pub short: String,
    /// Reachable by name but never offered as a completion
    pub hidden: bool,
    /// Flags available on this command only
    pub flags: Vec<FlagSpec>,
    /// Flags available on this command and every descendant
    pub persistent_flags: Vec<FlagSpec>,
    /// Fixed positional-argument vocabulary
    pub valid_args: Vec<Candidate>,
    /// Dynamic positional-argument completion
    pub valid_args_fn: Option<Callback>,
    /// Maximum number of positional arguments; `None` is unbounded
    pub max_args: Option<usize>,
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn persistent_flag(mut self, flag: FlagSpec) -> Self {
        self.persistent_flags.push(flag);
        self
    }

    /// Declare the fixed positional vocabulary. Entries may carry a
    /// `<TAB>description` suffix.
    pub fn valid_args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.valid_args = values
            .into_iter()
            .map(|v| Candidate::parse(v.as_ref()))
            .collect();
        self
    }

    /// Register a dynamic completion callback for positional arguments.
    pub fn valid_args_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&CompletionContext<'_>, &[String], &str) -> anyhow::Result<Completions>
            + Send
            + Sync
            + 'static,
    {
        self.valid_args_fn = Some(Callback::new(f));
        self
    }

    pub fn max_args(mut self, max: usize) -> Self {
        self.max_args = Some(max);
        self
    }

    /// Accept no positional arguments.
    pub fn no_args(self) -> Self {
        self.max_args(0)
    }

    pub fn subcommand(mut self, command: CommandSpec) -> Self {
        self.subcommands.push(command);
        self
    }

    /// True when `token` is this command's name or one of its aliases.
    pub fn is_called(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Direct sub-command reached by `token`, hidden ones included.
    pub fn find_subcommand(&self, token: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|c| c.is_called(token))
    }

    /// Sub-commands that may be offered as completions, in registration order.
    pub fn visible_subcommands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.subcommands.iter().filter(|c| !c.hidden)
    }

    /// Whether any positional completion source is declared.
    pub fn has_positional_source(&self) -> bool {
        !self.valid_args.is_empty() || self.valid_args_fn.is_some()
    }
}

/// Immutable snapshot of a program's commands.
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: CommandSpec,
}

impl CommandTree {
    pub fn new(root: CommandSpec) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CommandSpec {
        &self.root
    }

    /// Program name, i.e. the root command's name.
    pub fn program_name(&self) -> &str {
        &self.root.name
    }

    /// Number of commands in the tree, root included.
    pub fn command_count(&self) -> usize {
        fn count(command: &CommandSpec) -> usize {
            1 + command.subcommands.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}
