//! Scan constants and the optional YAML override file
//!
//! The target barcode and the column layout are fixed. Only the row window and
//! the sheet can be changed, either from a YAML file or from CLI flags.

use crate::error::{ScanError, ScanResult};
use crate::types::{ColumnLayout, RowBound, RowBoundSpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Workbook scanned when no path is given
pub const DEFAULT_SOURCE_PATH: &str = r"d:\Job\Книга11.xlsx";

/// Barcode searched for
pub const TARGET_BARCODE: &str = "4603347224946";

/// First data row (row 1 is the header)
pub const FIRST_DATA_ROW: u32 = 2;

/// Last row of the source workbook at the time the scan was written
pub const LAST_SCANNED_ROW: u32 = 110_437;

/// Records listed per report section
pub const PREVIEW_LIMIT: usize = 5;

/// Display width of barcode text, in characters
pub const BARCODE_DISPLAY_WIDTH: usize = 100;

/// Display width of URLs, in characters
pub const URL_DISPLAY_WIDTH: usize = 80;

/// Display limits applied by the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub preview: usize,
    pub barcode_width: usize,
    pub url_width: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            preview: PREVIEW_LIMIT,
            barcode_width: BARCODE_DISPLAY_WIDTH,
            url_width: URL_DISPLAY_WIDTH,
        }
    }
}

/// Full scan configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub target: String,
    pub layout: ColumnLayout,
    pub first_row: u32,
    pub last_row: RowBound,
    /// Worksheet name; the first sheet when unset
    pub sheet: Option<String>,
    pub limits: ReportLimits,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: TARGET_BARCODE.to_string(),
            layout: ColumnLayout::default(),
            first_row: FIRST_DATA_ROW,
            last_row: RowBound::Fixed(LAST_SCANNED_ROW),
            sheet: None,
            limits: ReportLimits::default(),
        }
    }
}

/// Keys accepted in a YAML override file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    first_row: Option<u32>,
    last_row: Option<RowBoundSpec>,
    sheet: Option<String>,
}

impl ScanConfig {
    /// Same as default, for a different target. Used by tests and library callers.
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Apply overrides from a YAML document on top of `self`
    pub fn merge_yaml_str(mut self, yaml: &str) -> ScanResult<Self> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        if let Some(first) = file.first_row {
            self.first_row = first;
        }
        if let Some(spec) = file.last_row {
            self.last_row = RowBound::try_from(spec).map_err(ScanError::Config)?;
        }
        if file.sheet.is_some() {
            self.sheet = file.sheet;
        }

        self.validate()?;
        Ok(self)
    }

    /// Apply overrides from a YAML file
    pub fn merge_yaml_file(self, path: &Path) -> ScanResult<Self> {
        let content = fs::read_to_string(path)?;
        self.merge_yaml_str(&content)
    }

    pub fn validate(&self) -> ScanResult<()> {
        if self.first_row == 0 {
            return Err(ScanError::Config(
                "first_row must be at least 1 (rows are 1-based)".to_string(),
            ));
        }
        Ok(())
    }
}
