//! Flag definitions and per-request flag state.

use crate::candidate::{Candidate, Completions};
use crate::source::{Callback, CompletionContext};
use std::collections::BTreeMap;

/// A flag a command accepts.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    /// Long name without the leading `--`
    pub long: String,
    /// Single-character shorthand without the leading `-`
    pub short: Option<char>,
    /// Usage text, offered as the candidate description
    pub usage: String,
    /// Whether the flag consumes a value (`--name value` / `--name=value`)
    pub takes_value: bool,
    /// Must be supplied before ordinary completion is offered
    pub required: bool,
    /// Never offered as a completion
    pub hidden: bool,
    /// Completion source for the flag's value
    pub value_fn: Option<Callback>,
}

impl FlagSpec {
    fn with_kind(long: impl Into<String>, takes_value: bool) -> Self {
        Self {
            long: long.into(),
            short: None,
            usage: String::new(),
            takes_value,
            required: false,
            hidden: false,
            value_fn: None,
        }
    }

    /// A boolean switch that takes no value.
    pub fn bool_flag(long: impl Into<String>) -> Self {
        Self::with_kind(long, false)
    }

    /// A flag that consumes a value.
    pub fn value_flag(long: impl Into<String>) -> Self {
        Self::with_kind(long, true)
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Register a dynamic completion callback for this flag's value.
    pub fn value_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&CompletionContext<'_>, &[String], &str) -> anyhow::Result<Completions>
            + Send
            + Sync
            + 'static,
    {
        self.value_fn = Some(Callback::new(f));
        self
    }

    /// Register a prebuilt callback, e.g. one of the helpers in [`crate::source`].
    pub fn complete_with(mut self, callback: Callback) -> Self {
        self.value_fn = Some(callback);
        self
    }

    /// Candidate forms offered for this flag name: `--long`, `--long=` when the
    /// flag takes a value, and `-s` when a shorthand exists.
    pub fn forms(&self, include_descriptions: bool) -> Vec<Candidate> {
        let describe = |value: String| {
            if include_descriptions {
                Candidate::with_description(value, self.usage.clone())
            } else {
                Candidate::new(value)
            }
        };

        let mut forms = vec![describe(format!("--{}", self.long))];
        if self.takes_value {
            forms.push(describe(format!("--{}=", self.long)));
        }
        if let Some(short) = self.short {
            forms.push(describe(format!("-{}", short)));
        }
        forms
    }
}

/// Flags seen so far on the command line, keyed by long name.
///
/// Built fresh for every request; a flag present here is `changed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagState {
    values: BTreeMap<String, Vec<String>>,
}

impl FlagState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of a flag. Switches record `"true"`.
    pub fn mark(&mut self, long: &str, value: Option<String>) {
        self.values
            .entry(long.to_string())
            .or_default()
            .push(value.unwrap_or_else(|| "true".to_string()));
    }

    pub fn is_changed(&self, long: &str) -> bool {
        self.values.contains_key(long)
    }

    /// Last value supplied for the flag.
    pub fn value(&self, long: &str) -> Option<&str> {
        self.values
            .get(long)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Every value supplied for the flag, in command-line order.
    pub fn values(&self, long: &str) -> &[String] {
        self.values.get(long).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Long names of all changed flags, sorted.
    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
