//! Single forward pass over sheet rows, collecting target hits per column

use super::matcher::count_matches;
use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::excel::SheetSource;
use crate::types::{PrimaryMatch, ReferenceMatch, ScanOutcome, SheetRow};
use std::path::Path;
use tracing::{debug, info};

/// Row scanner and result accumulator
pub struct Scanner<'c> {
    config: &'c ScanConfig,
    outcome: ScanOutcome,
}

impl<'c> Scanner<'c> {
    pub fn new(config: &'c ScanConfig) -> Self {
        Self {
            config,
            outcome: ScanOutcome::new(config.target.clone()),
        }
    }

    /// Whether a row number falls inside the configured window
    pub fn in_window(&self, number: u32) -> bool {
        number >= self.config.first_row && self.config.last_row.admits(number)
    }

    /// Test one row against the target; rows outside the window are ignored
    pub fn visit(&mut self, row: &SheetRow) {
        if !self.in_window(row.number) {
            return;
        }
        self.outcome.rows_scanned += 1;

        let layout = self.config.layout;
        let target = self.config.target.as_str();
        let id = row.cell(layout.id).map(str::to_string);

        if let Some(barcodes) = row.cell(layout.primary) {
            for _ in 0..count_matches(Some(barcodes), target) {
                debug!(row = row.number, column = "B", "target matched");
                self.outcome.primary.push(PrimaryMatch {
                    row: row.number,
                    id: id.clone(),
                    barcodes: barcodes.to_string(),
                });
            }
        }

        if let Some(barcodes) = row.cell(layout.reference) {
            for _ in 0..count_matches(Some(barcodes), target) {
                debug!(row = row.number, column = "C", "target matched");
                self.outcome.reference.push(ReferenceMatch {
                    row: row.number,
                    id: id.clone(),
                    barcodes: barcodes.to_string(),
                    url: row.cell(layout.url).map(str::to_string),
                });
            }
        }
    }

    pub fn finish(self) -> ScanOutcome {
        self.outcome
    }
}

/// Scan a sequence of rows, stopping at the first read error
pub fn scan<I>(rows: I, config: &ScanConfig) -> ScanResult<ScanOutcome>
where
    I: IntoIterator<Item = ScanResult<SheetRow>>,
{
    let mut scanner = Scanner::new(config);
    for row in rows {
        let row = row?;
        if config.last_row.limit().is_some_and(|last| row.number > last) {
            break;
        }
        scanner.visit(&row);
    }
    Ok(scanner.finish())
}

/// Scan an already opened worksheet
pub fn scan_source(source: &mut SheetSource, config: &ScanConfig) -> ScanResult<ScanOutcome> {
    let outcome = scan(source.rows(config.first_row, config.last_row)?, config)?;
    info!(
        sheet = source.sheet_name(),
        rows = outcome.rows_scanned,
        primary = outcome.primary.len(),
        reference = outcome.reference.len(),
        "scan complete"
    );
    Ok(outcome)
}

/// Open `path`, scan it and release the workbook
pub fn scan_workbook<P: AsRef<Path>>(path: P, config: &ScanConfig) -> ScanResult<ScanOutcome> {
    let mut source = SheetSource::open(path, config.sheet.as_deref())?;
    scan_source(&mut source, config)
}
