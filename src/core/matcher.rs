//! Comma-separated barcode tokenizer and exact matcher

/// Trimmed tokens of a comma-separated barcode cell
pub fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

/// Number of tokens in `raw` equal to `target`.
///
/// Missing or empty cells never match and are not split.
pub fn count_matches(raw: Option<&str>, target: &str) -> usize {
    match raw {
        Some(text) if !text.is_empty() => tokens(text).filter(|t| *t == target).count(),
        _ => 0,
    }
}

/// Whether any token of `raw` equals `target`
pub fn matches(raw: Option<&str>, target: &str) -> bool {
    match raw {
        Some(text) if !text.is_empty() => tokens(text).any(|t| t == target),
        _ => false,
    }
}
