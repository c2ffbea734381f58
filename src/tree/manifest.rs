//! Declarative command trees.
//!
//! A manifest is a TOML document describing the root command; nested
//! `[[commands]]` tables describe sub-commands. Flag value hints (`values`,
//! `extensions`, `dirs`) become the matching helper sources.
//!
//! ```toml
//! name = "deploy"
//! valid_args = ["staging\tStaging cluster", "production"]
//!
//! [[flags]]
//! long = "config"
//! short = "c"
//! extensions = ["yaml", "yml"]
//!
//! [[commands]]
//! name = "rollback"
//! aliases = ["rb"]
//! max_args = 1
//! ```

use crate::error::ManifestError;
use crate::source;
use crate::tree::command::{CommandSpec, CommandTree};
use crate::tree::flag::FlagSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandManifest {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub hidden: bool,
    pub flags: Vec<FlagManifest>,
    pub valid_args: Vec<String>,
    pub max_args: Option<usize>,
    pub commands: Vec<CommandManifest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagManifest {
    pub long: String,
    pub short: Option<char>,
    pub usage: String,
    pub takes_value: bool,
    pub required: bool,
    /// Inherited by every sub-command
    pub persistent: bool,
    pub hidden: bool,
    /// Fixed value vocabulary
    pub values: Vec<String>,
    /// Restrict file completion to these extensions
    pub extensions: Vec<String>,
    /// Complete directories only; a non-empty value names the parent directory
    pub dirs: Option<String>,
}

impl FlagManifest {
    /// Any value hint makes the flag value-taking.
    fn takes_value(&self) -> bool {
        self.takes_value || !self.values.is_empty() || !self.extensions.is_empty() || self.dirs.is_some()
    }

    fn hint_count(&self) -> usize {
        [
            !self.values.is_empty(),
            !self.extensions.is_empty(),
            self.dirs.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    fn into_spec(self) -> FlagSpec {
        let mut spec = if self.takes_value() {
            FlagSpec::value_flag(self.long.as_str())
        } else {
            FlagSpec::bool_flag(self.long.as_str())
        };
        spec = spec.usage(self.usage);
        if let Some(short) = self.short {
            spec = spec.short(short);
        }
        if self.required {
            spec = spec.required();
        }
        if self.hidden {
            spec = spec.hidden();
        }
        if !self.values.is_empty() {
            spec = spec.complete_with(source::static_values(&self.values));
        } else if !self.extensions.is_empty() {
            spec = spec.complete_with(source::file_extensions(&self.extensions));
        } else if let Some(dir) = self.dirs.as_deref() {
            spec = spec.complete_with(source::directories(Some(dir)));
        }
        spec
    }
}

impl CommandManifest {
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(text)?)
    }

    /// Reject trees the resolver could not answer unambiguously.
    pub fn validate(&self) -> Result<(), ManifestError> {
        self.validate_at(&self.name, &[])
    }

    fn validate_at(&self, path: &str, inherited: &[&FlagManifest]) -> Result<(), ManifestError> {
        check_name("command", path, &self.name)?;

        let mut visible: Vec<&FlagManifest> = inherited.to_vec();
        let mut longs: HashSet<&str> = inherited.iter().map(|f| f.long.as_str()).collect();
        let mut shorts: HashSet<char> = inherited.iter().filter_map(|f| f.short).collect();
        for flag in &self.flags {
            check_name("flag", path, &flag.long)?;
            if !longs.insert(flag.long.as_str()) {
                return Err(ManifestError::Invalid(format!(
                    "duplicate flag --{} on '{}'",
                    flag.long, path
                )));
            }
            if let Some(short) = flag.short {
                if short == '-' || !shorts.insert(short) {
                    return Err(ManifestError::Invalid(format!(
                        "duplicate or invalid shorthand -{} on '{}'",
                        short, path
                    )));
                }
            }
            if flag.hint_count() > 1 {
                return Err(ManifestError::Invalid(format!(
                    "flag --{} on '{}' may declare only one of values, extensions or dirs",
                    flag.long, path
                )));
            }
            if flag.persistent {
                visible.push(flag);
            }
        }

        let mut names: HashSet<&str> = HashSet::new();
        for sub in &self.commands {
            for called in std::iter::once(&sub.name).chain(sub.aliases.iter()) {
                if !names.insert(called.as_str()) {
                    return Err(ManifestError::Invalid(format!(
                        "duplicate sub-command name or alias '{}' under '{}'",
                        called, path
                    )));
                }
            }
            sub.validate_at(&format!("{} {}", path, sub.name), &visible)?;
        }
        Ok(())
    }

    /// Convert into the runtime tree. Call [`validate`](Self::validate) first.
    pub fn into_tree(self) -> CommandTree {
        CommandTree::new(self.into_spec())
    }

    fn into_spec(self) -> CommandSpec {
        let mut spec = CommandSpec::new(self.name).short(self.description);
        spec.aliases = self.aliases;
        spec.hidden = self.hidden;
        spec.max_args = self.max_args;
        spec = spec.valid_args(&self.valid_args);
        for flag in self.flags {
            spec = if flag.persistent {
                spec.persistent_flag(flag.into_spec())
            } else {
                spec.flag(flag.into_spec())
            };
        }
        for sub in self.commands {
            spec = spec.subcommand(sub.into_spec());
        }
        spec
    }
}

fn check_name(kind: &str, path: &str, name: &str) -> Result<(), ManifestError> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(ManifestError::Invalid(format!(
            "invalid {} name '{}' under '{}'",
            kind, name, path
        )));
    }
    Ok(())
}

/// Read, validate and convert a manifest file.
pub fn load_manifest(path: &Path) -> Result<CommandTree, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = CommandManifest::from_toml_str(&text)?;
    manifest.validate()?;
    let tree = manifest.into_tree();
    debug!(
        path = %path.display(),
        program = %tree.program_name(),
        commands = tree.command_count(),
        "Loaded manifest"
    );
    Ok(tree)
}
