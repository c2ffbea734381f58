//! CLI presentation: text and json formatters.

use crate::candidate::Completions;
use crate::render::Rendered;
use crate::resolver::CompletionRequest;
use serde_json::json;

pub fn format_preview_text(completions: &Completions, rendered: &Rendered) -> String {
    let mut lines = vec![format!(
        "directive: {} ({})",
        completions.directive.to_wire(),
        completions.directive
    )];
    match rendered {
        Rendered::Nothing => lines.push("(no completions: error)".to_string()),
        Rendered::FileFilter(exts) => {
            let patterns: Vec<String> = exts.iter().map(|e| format!("*.{}", e)).collect();
            lines.push(format!("files matching: {}", patterns.join(", ")));
        }
        Rendered::DirFilter(dir) => {
            lines.push(format!("directories in: {}", dir.as_deref().unwrap_or(".")));
        }
        Rendered::Candidates {
            entries,
            no_space,
            file_fallback,
        } => {
            if entries.is_empty() {
                lines.push(if *file_fallback {
                    "(no candidates; shell completes file names)".to_string()
                } else {
                    "(no candidates)".to_string()
                });
            }
            lines.extend(entries.iter().cloned());
            if *no_space && !entries.is_empty() {
                lines.push("(no space after insertion)".to_string());
            }
        }
    }
    lines.join("\n")
}

pub fn format_preview_json(
    request: &CompletionRequest,
    completions: &Completions,
    rendered: &Rendered,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "args": request.args,
        "to_complete": request.to_complete,
        "directive_names": completions.directive.to_string(),
        "completions": completions,
        "rendered": rendered,
    }))
}

pub fn format_validate_result_text(program: &str, commands: usize, manifest: &str) -> String {
    format!(
        "Manifest OK: {}\n  program: {}\n  commands: {}",
        manifest, program, commands
    )
}
