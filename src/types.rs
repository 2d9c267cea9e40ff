use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Number of leading columns read from every row (identifier, primary, reference, url)
pub const ROW_WIDTH: usize = 4;

//==============================================================================
// Column layout
//==============================================================================

/// 0-based column positions consumed by the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Row identifier (column A)
    pub id: usize,
    /// Primary barcodes, comma-separated (column B)
    pub primary: usize,
    /// Reference barcodes, comma-separated (column C)
    pub reference: usize,
    /// URL paired with the reference barcodes (column D)
    pub url: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: 0,
            primary: 1,
            reference: 2,
            url: 3,
        }
    }
}

//==============================================================================
// Row range
//==============================================================================

/// Upper end of the scanned row interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBound {
    /// Closed upper bound, 1-based
    Fixed(u32),
    /// Last physical row of the sheet
    SheetEnd,
}

impl RowBound {
    /// Upper limit as an option (`None` means unbounded)
    pub fn limit(self) -> Option<u32> {
        match self {
            RowBound::Fixed(last) => Some(last),
            RowBound::SheetEnd => None,
        }
    }

    /// Whether a 1-based row number lies at or below this bound
    pub fn admits(self, row: u32) -> bool {
        self.limit().map_or(true, |last| row <= last)
    }
}

impl FromStr for RowBound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("end") {
            return Ok(RowBound::SheetEnd);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("row numbers are 1-based; 0 is not a valid row".to_string()),
            Ok(n) => Ok(RowBound::Fixed(n)),
            Err(_) => Err(format!(
                "invalid row bound '{}': expected a row number or 'end'",
                s
            )),
        }
    }
}

impl fmt::Display for RowBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowBound::Fixed(n) => write!(f, "{}", n),
            RowBound::SheetEnd => write!(f, "end"),
        }
    }
}

/// YAML form of a row bound: either a number or the keyword `end`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowBoundSpec {
    Row(u32),
    Keyword(String),
}

impl TryFrom<RowBoundSpec> for RowBound {
    type Error = String;

    fn try_from(spec: RowBoundSpec) -> Result<Self, Self::Error> {
        match spec {
            RowBoundSpec::Row(n) => n.to_string().parse(),
            RowBoundSpec::Keyword(k) => k.parse(),
        }
    }
}

//==============================================================================
// Sheet rows
//==============================================================================

/// One physical row: its 1-based number and the text of its leading cells.
///
/// A cell that is empty or absent is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: u32,
    pub cells: [Option<String>; ROW_WIDTH],
}

impl SheetRow {
    pub fn empty(number: u32) -> Self {
        Self {
            number,
            cells: Default::default(),
        }
    }

    /// Build a row from string slices (`""` stands for an empty cell)
    pub fn from_texts(number: u32, texts: &[&str]) -> Self {
        let mut row = Self::empty(number);
        for (slot, text) in row.cells.iter_mut().zip(texts) {
            if !text.is_empty() {
                *slot = Some((*text).to_string());
            }
        }
        row
    }

    /// Text of the cell at a 0-based column, if present
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

//==============================================================================
// Match records
//==============================================================================

/// A target hit in the primary barcode column (B)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryMatch {
    pub row: u32,
    pub id: Option<String>,
    pub barcodes: String,
}

/// A target hit in the reference barcode column (C)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    pub row: u32,
    pub id: Option<String>,
    pub barcodes: String,
    pub url: Option<String>,
}

/// Everything collected by one scan, in row order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub target: String,
    pub primary: Vec<PrimaryMatch>,
    pub reference: Vec<ReferenceMatch>,
    /// Physical rows visited inside the scan window
    pub rows_scanned: u64,
}

impl ScanOutcome {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn total_matches(&self) -> usize {
        self.primary.len() + self.reference.len()
    }
}

/// Physical row count of a worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCount {
    /// Last physical row, header included
    pub total: u32,
    /// Rows below the header
    pub data: u32,
}

impl RowCount {
    pub fn from_last_row(last: u32) -> Self {
        Self {
            total: last,
            data: last.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_bound_parse() {
        assert_eq!("110437".parse::<RowBound>(), Ok(RowBound::Fixed(110437)));
        assert_eq!("end".parse::<RowBound>(), Ok(RowBound::SheetEnd));
        assert_eq!(" END ".parse::<RowBound>(), Ok(RowBound::SheetEnd));
        assert!("0".parse::<RowBound>().is_err());
        assert!("last".parse::<RowBound>().is_err());
        assert!("-5".parse::<RowBound>().is_err());
    }

    #[test]
    fn test_row_bound_admits() {
        assert!(RowBound::Fixed(10).admits(10));
        assert!(!RowBound::Fixed(10).admits(11));
        assert!(RowBound::SheetEnd.admits(u32::MAX));
    }

    #[test]
    fn test_row_bound_display_round_trip() {
        for bound in [RowBound::Fixed(42), RowBound::SheetEnd] {
            assert_eq!(bound.to_string().parse::<RowBound>(), Ok(bound));
        }
    }

    #[test]
    fn test_sheet_row_from_texts() {
        let row = SheetRow::from_texts(3, &["id-1", "", "123,456"]);
        assert_eq!(row.number, 3);
        assert_eq!(row.cell(0), Some("id-1"));
        assert_eq!(row.cell(1), None);
        assert_eq!(row.cell(2), Some("123,456"));
        assert_eq!(row.cell(3), None);
        assert_eq!(row.cell(9), None);
    }

    #[test]
    fn test_row_count_from_last_row() {
        assert_eq!(RowCount::from_last_row(4), RowCount { total: 4, data: 3 });
        assert_eq!(RowCount::from_last_row(0), RowCount { total: 0, data: 0 });
    }
}
