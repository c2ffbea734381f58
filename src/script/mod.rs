//! Script Compiler
//!
//! Emits, per shell dialect, the client half of the completion protocol: a
//! script that re-invokes the program with a hidden request command, parses
//! the answer, and applies the directive. Every dialect declares its directive
//! constants from the shared [`DirectivePlan`], so all scripts read the same
//! wire format.

pub mod bash;
pub mod fish;
pub mod plan;
pub mod powershell;
pub mod zsh;

pub use plan::{Behavior, DirectivePlan, PlanEntry};

use crate::config::LayoutConfig;
use crate::error::ApiError;
use crate::protocol::RequestMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Supported target shells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[serde(alias = "pwsh")]
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

impl Shell {
    pub const ALL: [Shell; 4] = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    pub fn name(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }

    /// Quote one word so the shell passes it through literally.
    pub fn quote(self, word: &str) -> String {
        match self {
            Shell::Bash | Shell::Zsh => format!("'{}'", word.replace('\'', r"'\''")),
            Shell::Fish => format!("'{}'", word.replace('\\', r"\\").replace('\'', r"\'")),
            Shell::PowerShell => format!("'{}'", word.replace('\'', "''")),
        }
    }

    /// A command line that runs `words` in this shell.
    pub fn command_line<S: AsRef<str>>(self, words: &[S]) -> String {
        let quoted: Vec<String> = words.iter().map(|w| self.quote(w.as_ref())).collect();
        match self {
            // A quoted first word is a string, not a command, without `&`.
            Shell::PowerShell => format!("& {}", quoted.join(" ")),
            _ => quoted.join(" "),
        }
    }

    fn dialect(self) -> &'static dyn Dialect {
        match self {
            Shell::Bash => &bash::Bash,
            Shell::Zsh => &zsh::Zsh,
            Shell::Fish => &fish::Fish,
            Shell::PowerShell => &powershell::PowerShell,
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shell {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "powershell" | "pwsh" => Ok(Shell::PowerShell),
            _ => Err(ApiError::UnsupportedShell(s.to_string())),
        }
    }
}

/// Inputs shared by every dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Name the completion is registered for
    pub program_name: String,
    /// Selects `__complete` over `__completeNoDesc`
    pub include_descriptions: bool,
    /// Shell text run to ask for completions; defaults to the first word of
    /// the command line so aliases and relative paths keep working
    pub invoker: Option<String>,
    pub layout: LayoutConfig,
}

impl ScriptOptions {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            include_descriptions: true,
            invoker: None,
            layout: LayoutConfig::default(),
        }
    }

    pub fn include_descriptions(mut self, include: bool) -> Self {
        self.include_descriptions = include;
        self
    }

    pub fn invoker(mut self, invoker: impl Into<String>) -> Self {
        self.invoker = Some(invoker.into());
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Dialect-specific half of script generation.
pub(crate) trait Dialect: Sync {
    /// Script text with `@@NAME@@` placeholders.
    fn template(&self) -> &'static str;

    /// One directive constant declaration.
    fn declare(&self, variable: &str, value: u32) -> String;

    /// Indentation of the declaration block inside the template.
    fn indent(&self) -> &'static str {
        "    "
    }

    /// Shell expression naming the program to re-invoke.
    fn default_invoker(&self) -> &'static str;
}

/// Compiles completion scripts for one program.
#[derive(Debug, Clone)]
pub struct ScriptCompiler {
    options: ScriptOptions,
    plan: DirectivePlan,
}

impl ScriptCompiler {
    pub fn new(options: ScriptOptions) -> Self {
        Self {
            options,
            plan: DirectivePlan::standard(),
        }
    }

    pub fn options(&self) -> &ScriptOptions {
        &self.options
    }

    /// Script text for `shell`.
    pub fn compile(&self, shell: Shell) -> String {
        let dialect = shell.dialect();
        let layout = &self.options.layout;
        let request = RequestMode::for_descriptions(self.options.include_descriptions);
        let invoker = self
            .options
            .invoker
            .as_deref()
            .unwrap_or_else(|| dialect.default_invoker());
        let directives = self
            .plan
            .declarations(dialect.indent(), |variable, value| dialect.declare(variable, value));

        debug!(
            shell = %shell,
            program = %self.options.program_name,
            request = request.command_name(),
            "Compiling completion script"
        );

        substitute(
            dialect.template(),
            &[
                ("PROGRAM", self.options.program_name.clone()),
                ("IDENT", identifier(&self.options.program_name)),
                ("REQUEST", request.command_name().to_string()),
                ("INVOKER", invoker.to_string()),
                ("DIRECTIVES", directives),
                ("RESERVED", layout.reserved_columns.to_string()),
                ("MINDESC", layout.min_description_width.to_string()),
                ("ELLIPSIS", layout.ellipsis.clone()),
            ],
        )
    }

    pub fn write_to<W: Write>(&self, shell: Shell, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.compile(shell).as_bytes())?;
        out.flush()
    }
}

/// Function-name-safe form of a program name: anything outside
/// `[A-Za-z0-9_]` (such as `-`, `:` or `.`) becomes `_`.
pub fn identifier(program_name: &str) -> String {
    program_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn substitute(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("@@{}@@", key), value)
    })
}
