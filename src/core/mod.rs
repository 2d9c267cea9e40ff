//! Barcode matching and the row scan that drives it

pub mod matcher;
pub mod scanner;

pub use scanner::{scan, scan_source, scan_workbook, Scanner};
