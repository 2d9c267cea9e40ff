//! Spreadsheet access module
//!
//! Opens a workbook read-only and exposes one worksheet as a forward-only
//! sequence of rows:
//! - `.xlsx` / `.xlsm`: streamed cell by cell, never fully loaded
//! - `.xls`, `.xlsb`, `.ods`: loaded as a single range

mod reader;

pub use reader::{cell_text, count_rows, RowIter, SheetSource};
