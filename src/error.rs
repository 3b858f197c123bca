use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;

use thiserror::Error;

/// How many individual failures a LoadError message spells out before
/// collapsing the rest into a count.
const MAX_REPORTED_FAILURES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    EmptyField,
    FormatError(String),
    InvalidDate(String),
    PatternError(String),
    TypeError(&'static str),
}

impl Display for FieldErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::EmptyField => write!(f, "must not be empty"),
            FieldErrorKind::FormatError(value) => write!(f, "expected YYYY-MM-DD, got \"{}\"", value),
            FieldErrorKind::InvalidDate(value) => write!(f, "\"{}\" is not a valid calendar date", value),
            FieldErrorKind::PatternError(value) => write!(f, "\"{}\" may only contain lowercase letters, digits and hyphens", value),
            FieldErrorKind::TypeError(expected) => write!(f, "expected {}", expected),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Aggregate of every field violation found in one metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> ValidationError {
        ValidationError { fields }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    let parts: Vec<String> = fields.iter().map(|e| e.to_string()).collect();
    parts.join("; ")
}

/// A single document failed to parse. The message always names the document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{id}: {source}")]
    Validation { id: String, source: ValidationError },
    #[error("{id}: {reason}")]
    Document { id: String, reason: String },
}

impl ParseError {
    pub fn id(&self) -> &str {
        match self {
            ParseError::Validation { id, .. } => id,
            ParseError::Document { id, .. } => id,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not discover documents: {0}")]
    Discover(#[from] io::Error),
    #[error("no documents could be loaded: {}", summarize(.failures))]
    AllFailed { failures: Vec<ParseError> },
}

fn summarize(failures: &[ParseError]) -> String {
    let mut parts: Vec<String> = failures
        .iter()
        .take(MAX_REPORTED_FAILURES)
        .map(|e| e.to_string())
        .collect();

    let rest = failures.len().saturating_sub(MAX_REPORTED_FAILURES);
    if rest > 0 {
        parts.push(format!("... and {} more", rest));
    }
    parts.join("; ")
}
