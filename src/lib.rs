//! Barscan - single-pass barcode lookup in a spreadsheet
//!
//! This library scans one worksheet for a target barcode in two
//! comma-separated barcode columns and reports every hit with its row.
//!
//! # Features
//!
//! - Streaming `.xlsx` reads (the sheet is never fully loaded)
//! - Exact, trimmed, case-sensitive token matching
//! - Bounded row window with a fixed or sheet-derived upper row
//! - Plain-text report with capped previews
//!
//! # Example
//!
//! ```no_run
//! use barscan::config::ScanConfig;
//! use barscan::core::scan_workbook;
//! use barscan::report::render_report;
//!
//! let config = ScanConfig::default();
//! let outcome = scan_workbook("book.xlsx", &config)?;
//!
//! print!("{}", render_report(&outcome, &config.limits));
//! # Ok::<(), barscan::error::ScanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use types::{PrimaryMatch, ReferenceMatch, RowBound, ScanOutcome, SheetRow};
