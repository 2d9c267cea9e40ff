use crate::config::ScanConfig;
use crate::core::scan_workbook;
use crate::error::ScanResult;
use crate::excel::count_rows;
use crate::report::write_report;
use crate::types::{RowBound, RowCount};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Options of the `scan` command
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub file: PathBuf,
    pub sheet: Option<String>,
    pub last_row: Option<RowBound>,
    pub config: Option<PathBuf>,
}

/// Resolve the scan configuration: constants, then YAML file, then flags
pub fn resolve_config(options: &ScanOptions) -> ScanResult<ScanConfig> {
    let mut config = ScanConfig::default();
    if let Some(ref path) = options.config {
        config = config.merge_yaml_file(path)?;
    }
    if let Some(ref sheet) = options.sheet {
        config.sheet = Some(sheet.clone());
    }
    if let Some(bound) = options.last_row {
        config.last_row = bound;
    }
    config.validate()?;
    Ok(config)
}

/// Execute the scan command, writing the report to stdout
pub fn scan(options: ScanOptions) -> ScanResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    scan_to(&mut out, &options)
}

/// Execute the scan command against any writer
pub fn scan_to<W: Write>(out: &mut W, options: &ScanOptions) -> ScanResult<()> {
    let config = resolve_config(options)?;
    let outcome = scan_workbook(&options.file, &config)?;
    write_report(out, &outcome, &config.limits)?;
    out.flush()?;
    Ok(())
}

/// Execute the rows command, writing the count to stdout
pub fn rows(file: PathBuf, sheet: Option<String>) -> ScanResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    rows_to(&mut out, &file, sheet.as_deref())
}

/// Execute the rows command against any writer
pub fn rows_to<W: Write>(out: &mut W, file: &Path, sheet: Option<&str>) -> ScanResult<()> {
    let count = count_rows(file, sheet)?;
    write_row_count(out, file, count)?;
    out.flush()?;
    Ok(())
}

fn write_row_count<W: Write>(out: &mut W, file: &Path, count: RowCount) -> io::Result<()> {
    writeln!(out, "File: {}", file.display())?;
    writeln!(out, "Total rows (including header): {}", count.total)?;
    writeln!(out, "Data rows (excluding header): {}", count.data)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
