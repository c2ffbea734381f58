//! Completion candidates and the per-request answer.

use crate::directive::Directive;
use serde::Serialize;

/// One completion suggestion, optionally paired with a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(value: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            value: value.into(),
            description: if description.is_empty() {
                None
            } else {
                Some(description)
            },
        }
    }

    /// Parse a `value` or `value<TAB>description` line.
    pub fn parse(line: &str) -> Self {
        match line.split_once('\t') {
            Some((value, description)) => Self::with_description(value, description),
            None => Self::new(line),
        }
    }

    /// Literal, case-sensitive prefix test on the visible value.
    pub fn matches(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    /// Wire line for this candidate. Multi-line descriptions keep their first
    /// line; line breaks and tabs inside the value become spaces so the value
    /// stays one field of one line.
    pub fn to_line(&self) -> String {
        let value = one_field(&self.value);
        match self.description.as_deref().and_then(|d| d.lines().next()) {
            Some(description) if !description.is_empty() => {
                format!("{}\t{}", value, description)
            }
            _ => value,
        }
    }

    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }
}

fn one_field(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

impl From<&str> for Candidate {
    fn from(line: &str) -> Self {
        Candidate::parse(line)
    }
}

impl From<String> for Candidate {
    fn from(line: String) -> Self {
        Candidate::parse(&line)
    }
}

/// Ordered candidates plus the directive telling the shell what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Completions {
    pub candidates: Vec<Candidate>,
    #[serde(serialize_with = "serialize_directive")]
    pub directive: Directive,
}

fn serialize_directive<S: serde::Serializer>(
    directive: &Directive,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(directive.to_wire())
}

impl Completions {
    pub fn new<I, C>(candidates: I, directive: Directive) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            directive,
        }
    }

    /// No candidates, just a directive.
    pub fn directive_only(directive: Directive) -> Self {
        Self {
            candidates: Vec::new(),
            directive,
        }
    }

    /// The terminal error answer: nothing to offer.
    pub fn error() -> Self {
        Self::directive_only(Directive::ERROR)
    }

    /// Candidate values in order, without descriptions.
    pub fn values(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.value.as_str()).collect()
    }
}
