//! Plain-text scan report

use crate::config::ReportLimits;
use crate::types::ScanOutcome;
use std::io::{self, Write};

const NONE_MARKER: &str = "None";

/// Longest prefix of `text` holding at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Write the report for `outcome` to `out`
pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &ScanOutcome,
    limits: &ReportLimits,
) -> io::Result<()> {
    writeln!(out, "Searching for barcode: {}", outcome.target)?;

    writeln!(out)?;
    writeln!(out, "Found in column B (primary): {}", outcome.primary.len())?;
    for m in outcome.primary.iter().take(limits.preview) {
        writeln!(
            out,
            "  Row {}: ID={}, Barcodes={}",
            m.row,
            m.id.as_deref().unwrap_or(NONE_MARKER),
            truncate_chars(&m.barcodes, limits.barcode_width)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Found in column C (reference): {}", outcome.reference.len())?;
    for m in outcome.reference.iter().take(limits.preview) {
        let url = match m.url.as_deref() {
            Some(url) if !url.is_empty() => truncate_chars(url, limits.url_width),
            _ => NONE_MARKER,
        };
        writeln!(
            out,
            "  Row {}: ID={}, Barcodes={}, URL={}",
            m.row,
            m.id.as_deref().unwrap_or(NONE_MARKER),
            truncate_chars(&m.barcodes, limits.barcode_width),
            url
        )?;
    }

    Ok(())
}

/// Render the report into a string
pub fn render_report(outcome: &ScanOutcome, limits: &ReportLimits) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, outcome, limits).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
