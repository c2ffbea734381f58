//! Shell-side rendering of an answer, as the bash client performs it.
//!
//! Used by `shellcomp preview` to show what a user would see, and by tests to
//! pin down the column arithmetic the scripts implement.

use crate::candidate::Completions;
use crate::config::LayoutConfig;
use crate::script::{Behavior, DirectivePlan};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What the shell ends up doing with an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rendered {
    /// Error directive: nothing is offered
    Nothing,
    /// Native file completion restricted to these extensions
    FileFilter(Vec<String>),
    /// Native directory completion, inside the given directory when set
    DirFilter(Option<String>),
    /// Menu entries in answer order
    Candidates {
        entries: Vec<String>,
        no_space: bool,
        /// The shell's own file completion applies when `entries` is empty
        file_fallback: bool,
    },
}

/// Render `response` for the word under the cursor in a `columns`-wide terminal.
pub fn render(
    response: &Completions,
    current_word: &str,
    columns: usize,
    layout: &LayoutConfig,
) -> Rendered {
    let behaviors = DirectivePlan::standard().behaviors_for(response.directive);
    if behaviors.contains(&Behavior::Abort) {
        return Rendered::Nothing;
    }
    if behaviors.contains(&Behavior::FilterExtensions) {
        return Rendered::FileFilter(
            response.candidates.iter().map(|c| c.value.clone()).collect(),
        );
    }
    if behaviors.contains(&Behavior::FilterDirectories) {
        return Rendered::DirFilter(
            response
                .candidates
                .first()
                .map(|c| c.value.clone())
                .filter(|v| !v.is_empty()),
        );
    }

    // Bash completes only the part after '=' of "--flag=value".
    let cur = match current_word.split_once('=') {
        Some((_, value)) if current_word.starts_with('-') => value,
        _ => current_word,
    };

    let longest = response
        .candidates
        .iter()
        .map(|c| c.value.width())
        .max()
        .unwrap_or(0);

    let matching: Vec<_> = response
        .candidates
        .iter()
        .filter(|c| c.matches(cur))
        .collect();

    let mut entries: Vec<String> = if matching.len() == 1 {
        vec![matching[0].value.clone()]
    } else {
        matching
            .iter()
            .map(|c| match c.description.as_deref().and_then(|d| d.lines().next()) {
                Some(description) => {
                    format_description(&c.value, description, longest, columns, layout)
                }
                None => c.value.clone(),
            })
            .collect()
    };

    for boundary in [':', '='] {
        strip_word_boundary(&mut entries, cur, boundary);
    }

    Rendered::Candidates {
        entries,
        no_space: behaviors.contains(&Behavior::SuppressSpace),
        file_fallback: !behaviors.contains(&Behavior::SuppressFileFallback),
    }
}

/// Pad `value` to `longest` and append `  (description)`, truncating the
/// description with the ellipsis to fit `columns`.
pub fn format_description(
    value: &str,
    description: &str,
    longest: usize,
    columns: usize,
    layout: &LayoutConfig,
) -> String {
    let mut text = value.to_string();
    let aligned = columns as isize - longest as isize - layout.reserved_columns as isize;
    let max_width = if aligned > layout.min_description_width as isize {
        let pad = longest.saturating_sub(value.width());
        text.extend(std::iter::repeat(' ').take(pad));
        aligned
    } else {
        columns as isize - value.width() as isize - layout.reserved_columns as isize
    };

    if max_width > 0 {
        let max_width = max_width as usize;
        let description = if description.width() > max_width {
            let mut cut = truncate_to_width(description, max_width - 1);
            cut.push_str(&layout.ellipsis);
            cut
        } else {
            description.to_string()
        };
        text.push_str("  (");
        text.push_str(&description);
        text.push(')');
    }
    text
}

fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

/// When the typed word contains a shell word-break character, the shell has
/// already split there; strip everything up to its last occurrence.
fn strip_word_boundary(entries: &mut [String], cur: &str, boundary: char) {
    if let Some(idx) = cur.rfind(boundary) {
        let word = &cur[..idx + boundary.len_utf8()];
        for entry in entries.iter_mut() {
            if let Some(rest) = entry.strip_prefix(word) {
                *entry = rest.to_string();
            }
        }
    }
}
