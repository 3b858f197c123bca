use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use toml::Table;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("missing opening +++ fence")]
    MissingFence,
    #[error("unterminated +++ fence")]
    UnterminatedFence,
    #[error("invalid metadata block: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Splits a document into its fenced metadata block and the body.
///
/// Example of a document:
/// +++
/// title = "Why Rust"
/// date = "2024-03-01"
/// slug = "why-rust"
/// excerpt = "A short pitch."
/// +++
///
/// Body starts here.
pub fn split_document(raw: &str) -> Result<(Table, &str), FrontmatterError> {
    lazy_static! {
        static ref FENCE_REGEX: Regex = Regex::new(r"(?m)^\+\+\+[ \t\r]*$").unwrap();
    }

    let open = match FENCE_REGEX.find(raw) {
        Some(m) if m.start() == 0 => m,
        _ => return Err(FrontmatterError::MissingFence),
    };

    let close = match FENCE_REGEX.find_at(raw, open.end()) {
        Some(m) => m,
        None => return Err(FrontmatterError::UnterminatedFence),
    };

    let block = &raw[open.end()..close.start()];
    let table = block.parse::<Table>()?;

    // The body starts after the closing fence line
    let after = &raw[close.end()..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);

    Ok((table, body))
}
