//! What each directive bit asks the shell to do, independent of dialect.

use crate::directive::{Directive, NAMES};

/// Client-side behaviour selected by one directive bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Show nothing
    Abort,
    /// Do not append a space after the inserted value
    SuppressSpace,
    /// Do not fall back to file completion when nothing matched
    SuppressFileFallback,
    /// Complete files whose extension is one of the candidates
    FilterExtensions,
    /// Complete directories, inside the first candidate when there is one
    FilterDirectories,
}

/// One directive bit and the behaviour it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub directive: Directive,
    pub name: &'static str,
    pub behavior: Behavior,
}

impl PlanEntry {
    /// Script variable holding this bit's value.
    pub fn variable(&self) -> String {
        format!("shellCompDirective{}", self.name)
    }

    pub fn value(&self) -> u32 {
        self.directive.to_wire()
    }
}

/// Shared description of the directive protocol every dialect implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectivePlan {
    entries: Vec<PlanEntry>,
}

impl DirectivePlan {
    pub fn standard() -> Self {
        let entries = NAMES
            .iter()
            .map(|&(directive, name)| PlanEntry {
                directive,
                name,
                behavior: behavior_of(directive),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Declare every directive constant, one per line, via `declare`.
    pub fn declarations<F>(&self, indent: &str, declare: F) -> String
    where
        F: Fn(&str, u32) -> String,
    {
        self.entries
            .iter()
            .map(|entry| format!("{}{}", indent, declare(&entry.variable(), entry.value())))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Behaviours a received directive turns on, in bit order. An abort hides
    /// every other behaviour.
    pub fn behaviors_for(&self, directive: Directive) -> Vec<Behavior> {
        if directive.is_error() {
            return vec![Behavior::Abort];
        }
        self.entries
            .iter()
            .filter(|entry| directive.contains(entry.directive))
            .map(|entry| entry.behavior)
            .collect()
    }
}

fn behavior_of(directive: Directive) -> Behavior {
    if directive == Directive::ERROR {
        Behavior::Abort
    } else if directive == Directive::NO_SPACE {
        Behavior::SuppressSpace
    } else if directive == Directive::NO_FILE_COMP {
        Behavior::SuppressFileFallback
    } else if directive == Directive::FILTER_FILE_EXT {
        Behavior::FilterExtensions
    } else {
        Behavior::FilterDirectories
    }
}
