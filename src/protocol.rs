//! Output Protocol
//!
//! Line-oriented answer format shared by the program and every generated
//! script: one candidate per line (`value` or `value<TAB>description`), then a
//! final `:<directive>` line. Diagnostics go to a separate stream that the
//! scripts discard.

use crate::candidate::{Candidate, Completions};
use crate::directive::Directive;
use crate::error::ApiError;
use crate::resolver::{CompletionRequest, CompletionResolver};
use crate::tree::CommandTree;
use std::io::Write;
use tracing::info;

/// Hidden request command that answers with descriptions.
pub const REQUEST_CMD: &str = "__complete";

/// Hidden request command that answers without descriptions.
pub const REQUEST_CMD_NO_DESC: &str = "__completeNoDesc";

/// Which hidden request command the script used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    WithDescriptions,
    NoDescriptions,
}

impl RequestMode {
    /// Recognise a request command token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            REQUEST_CMD => Some(RequestMode::WithDescriptions),
            REQUEST_CMD_NO_DESC => Some(RequestMode::NoDescriptions),
            _ => None,
        }
    }

    pub fn for_descriptions(include_descriptions: bool) -> Self {
        if include_descriptions {
            RequestMode::WithDescriptions
        } else {
            RequestMode::NoDescriptions
        }
    }

    pub fn command_name(self) -> &'static str {
        match self {
            RequestMode::WithDescriptions => REQUEST_CMD,
            RequestMode::NoDescriptions => REQUEST_CMD_NO_DESC,
        }
    }

    pub fn includes_descriptions(self) -> bool {
        self == RequestMode::WithDescriptions
    }
}

/// Write the answer: candidate lines, then the directive line.
pub fn write_response<W: Write>(out: &mut W, completions: &Completions) -> std::io::Result<()> {
    for candidate in &completions.candidates {
        writeln!(out, "{}", candidate.to_line())?;
    }
    writeln!(out, ":{}", completions.directive.to_wire())?;
    out.flush()
}

/// Write the human-readable summary to the diagnostic stream.
pub fn write_diagnostic<W: Write>(err: &mut W, directive: Directive) -> std::io::Result<()> {
    writeln!(err, "Completion ended with directive: {}", directive)
}

/// Parse an answer the way the generated scripts do.
///
/// Trailing blank lines are ignored. The last line is the directive when it is
/// a colon followed by an integer; otherwise the directive is `DEFAULT` and
/// every line is a candidate.
pub fn parse_response(text: &str) -> Completions {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        lines.pop();
    }

    let directive = match lines.last().and_then(|l| l.strip_prefix(':')) {
        Some(rest) if rest.trim().parse::<i64>().is_ok() => {
            lines.pop();
            Directive::from_wire(rest)
        }
        _ => Directive::DEFAULT,
    };

    Completions {
        candidates: lines
            .into_iter()
            .filter(|l| !l.is_empty())
            .map(Candidate::parse)
            .collect(),
        directive,
    }
}

/// Answer a completion request if `argv` is one.
///
/// `argv` excludes the program name. Returns `Ok(false)` when `argv[0]` is not
/// a request command, so the host program can carry on with normal execution.
pub fn serve<W, E>(tree: &CommandTree, argv: &[String], out: &mut W, err: &mut E) -> Result<bool, ApiError>
where
    W: Write,
    E: Write,
{
    let mode = match argv.first().and_then(|t| RequestMode::from_token(t)) {
        Some(mode) => mode,
        None => return Ok(false),
    };

    let request = CompletionRequest::from_tokens(&argv[1..]);
    let completions = CompletionResolver::new(tree)
        .include_descriptions(mode.includes_descriptions())
        .resolve(&request);
    info!(
        program = %tree.program_name(),
        candidates = completions.candidates.len(),
        directive = completions.directive.to_wire(),
        "Served completion request"
    );

    write_response(out, &completions)?;
    write_diagnostic(err, completions.directive)?;
    Ok(true)
}
