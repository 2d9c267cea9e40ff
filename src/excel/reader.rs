//! Read-only worksheet access - workbook → row cursor

use crate::error::{ScanError, ScanResult};
use crate::types::{RowBound, RowCount, SheetRow, ROW_WIDTH};
use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lazy, forward-only sequence of rows
pub type RowIter<'a> = Box<dyn Iterator<Item = ScanResult<SheetRow>> + 'a>;

enum Backend {
    /// Streaming cell reader; the sheet is never materialized
    Xlsx(Xlsx<BufReader<File>>),
    /// Formats without a streaming reader are loaded as one range
    Range(Range<Data>),
}

/// One worksheet of a workbook opened for reading.
///
/// The file handle lives as long as the source and is released on drop.
pub struct SheetSource {
    path: PathBuf,
    sheet: String,
    backend: Backend,
}

impl SheetSource {
    /// Open `path` read-only and select `sheet` (the first sheet when `None`)
    pub fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> ScanResult<Self> {
        let path = path.as_ref().to_path_buf();
        let access_error = |message: String| ScanError::FileAccess {
            path: path.clone(),
            message,
        };

        let source = if is_xlsx(&path) {
            let workbook = open_workbook::<Xlsx<_>, _>(&path)
                .map_err(|e| access_error(e.to_string()))?;
            let sheet = select_sheet(&path, workbook.sheet_names(), sheet)?;
            Self {
                path: path.clone(),
                sheet,
                backend: Backend::Xlsx(workbook),
            }
        } else {
            let mut workbook =
                open_workbook_auto(&path).map_err(|e| access_error(e.to_string()))?;
            let sheet = select_sheet(&path, workbook.sheet_names(), sheet)?;
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|e| ScanError::Read(e.to_string()))?;
            Self {
                path: path.clone(),
                sheet,
                backend: Backend::Range(range),
            }
        };

        info!(path = %source.path.display(), sheet = %source.sheet, "opened workbook");
        Ok(source)
    }

    /// Wrap an in-memory range as a source
    pub fn from_range(sheet: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            path: PathBuf::new(),
            sheet: sheet.into(),
            backend: Backend::Range(range),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    /// Rows numbered `first..=bound`, ascending.
    ///
    /// Rows with no cells at all are not yielded. Reading stops at the first
    /// cell past `bound`; a sheet shorter than `bound` simply ends early.
    pub fn rows(&mut self, first: u32, bound: RowBound) -> ScanResult<RowIter<'_>> {
        debug!(first, last = %bound, sheet = %self.sheet, "starting row cursor");
        match &mut self.backend {
            Backend::Xlsx(workbook) => {
                let mut reader = workbook
                    .worksheet_cells_reader(&self.sheet)
                    .map_err(|e| ScanError::Read(e.to_string()))?;
                let mut grouper = RowGrouper::new(first, bound);

                Ok(Box::new(std::iter::from_fn(move || {
                    if grouper.exhausted {
                        return None;
                    }
                    loop {
                        match reader.next_cell() {
                            Ok(Some(cell)) => {
                                let (row, col) = cell.get_position();
                                let value = cell.get_value();
                                let completed = grouper.push(row + 1, col, || {
                                    cell_text(&Data::from(value.clone()))
                                });
                                if completed.is_some() {
                                    return completed.map(Ok);
                                }
                                if grouper.exhausted {
                                    return None;
                                }
                            }
                            Ok(None) => return grouper.finish().map(Ok),
                            Err(e) => {
                                grouper.exhausted = true;
                                return Some(Err(ScanError::Read(e.to_string())));
                            }
                        }
                    }
                })))
            }
            Backend::Range(range) => {
                let Some((start_row, start_col)) = range.start() else {
                    return Ok(Box::new(std::iter::empty()));
                };
                let rows = range
                    .rows()
                    .enumerate()
                    .map(move |(offset, cells)| (start_row + offset as u32 + 1, cells))
                    .skip_while(move |(number, _)| *number < first)
                    .take_while(move |(number, _)| bound.admits(*number))
                    .map(move |(number, cells)| Ok(row_from_cells(number, start_col, cells)));
                Ok(Box::new(rows))
            }
        }
    }
}

/// Count physical rows of a worksheet (header included)
pub fn count_rows<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> ScanResult<RowCount> {
    let mut source = SheetSource::open(path, sheet)?;
    let mut last = 0;
    for row in source.rows(1, RowBound::SheetEnd)? {
        last = row?.number;
    }
    Ok(RowCount::from_last_row(last))
}

/// Text form of a cell, or `None` when it is empty.
///
/// Integral floats print without a fractional part, so a numeric barcode
/// stored as `4603347224946.0` reads back as `"4603347224946"`.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "xlsx" | "xlsm"))
        .unwrap_or(false)
}

fn select_sheet(path: &Path, names: Vec<String>, wanted: Option<&str>) -> ScanResult<String> {
    match wanted {
        Some(name) => names
            .into_iter()
            .find(|n| n == name)
            .ok_or_else(|| ScanError::SheetNotFound(name.to_string())),
        None => names
            .into_iter()
            .next()
            .ok_or_else(|| ScanError::EmptyWorkbook(path.to_path_buf())),
    }
}

/// Build a row from a range slice whose first element sits at `start_col`
fn row_from_cells(number: u32, start_col: u32, cells: &[Data]) -> SheetRow {
    let mut row = SheetRow::empty(number);
    let start_col = start_col as usize;
    for (column, slot) in row.cells.iter_mut().enumerate() {
        if column >= start_col {
            *slot = cells.get(column - start_col).and_then(cell_text);
        }
    }
    row
}

/// Folds a row-major stream of cells into rows inside `first..=bound`
struct RowGrouper {
    first: u32,
    bound: RowBound,
    current: Option<SheetRow>,
    exhausted: bool,
}

impl RowGrouper {
    fn new(first: u32, bound: RowBound) -> Self {
        Self {
            first,
            bound,
            current: None,
            exhausted: false,
        }
    }

    /// Feed one cell; returns the previous row once a new row starts
    fn push(
        &mut self,
        number: u32,
        column: u32,
        text: impl FnOnce() -> Option<String>,
    ) -> Option<SheetRow> {
        if self.exhausted || number < self.first {
            return None;
        }
        if !self.bound.admits(number) {
            self.exhausted = true;
            return self.current.take();
        }

        let completed = match &self.current {
            Some(row) if row.number != number => self.current.take(),
            _ => None,
        };
        let row = self
            .current
            .get_or_insert_with(|| SheetRow::empty(number));
        if (column as usize) < ROW_WIDTH {
            row.cells[column as usize] = text();
        }
        completed
    }

    fn finish(&mut self) -> Option<SheetRow> {
        self.exhausted = true;
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Cell;

    fn sparse(cells: Vec<((u32, u32), Data)>) -> Range<Data> {
        Range::from_sparse(
            cells
                .into_iter()
                .map(|(pos, data)| Cell::new(pos, data))
                .collect(),
        )
    }

    fn collect(source: &mut SheetSource, first: u32, bound: RowBound) -> Vec<SheetRow> {
        source
            .rows(first, bound)
            .unwrap()
            .collect::<ScanResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_cell_text_conversions() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(
            cell_text(&Data::String("a, b".to_string())),
            Some("a, b".to_string())
        );
        assert_eq!(
            cell_text(&Data::Float(4603347224946.0)),
            Some("4603347224946".to_string())
        );
        assert_eq!(cell_text(&Data::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(cell_text(&Data::Int(42)), Some("42".to_string()));
        assert_eq!(cell_text(&Data::Bool(true)), Some("true".to_string()));
    }

    #[test]
    fn test_range_rows_use_absolute_numbers() {
        let mut source = SheetSource::from_range(
            "Sheet1",
            sparse(vec![
                ((0, 0), Data::String("id".to_string())),
                ((1, 0), Data::String("A-1".to_string())),
                ((1, 1), Data::String("111".to_string())),
                ((2, 2), Data::Float(222.0)),
                ((2, 3), Data::String("http://x".to_string())),
            ]),
        );

        let rows = collect(&mut source, 2, RowBound::SheetEnd);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], SheetRow::from_texts(2, &["A-1", "111"]));
        assert_eq!(rows[1], SheetRow::from_texts(3, &["", "", "222", "http://x"]));
    }

    #[test]
    fn test_range_rows_respect_fixed_bound() {
        let cells = (0..10)
            .map(|r| ((r, 1), Data::String(format!("v{}", r))))
            .collect();
        let mut source = SheetSource::from_range("Sheet1", sparse(cells));

        let rows = collect(&mut source, 2, RowBound::Fixed(5));
        let numbers: Vec<u32> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_range_rows_offset_start_column() {
        // Range starting at column B: slice index 0 is column 1
        let mut source = SheetSource::from_range(
            "Sheet1",
            sparse(vec![
                ((1, 1), Data::String("b".to_string())),
                ((1, 2), Data::String("c".to_string())),
            ]),
        );
        let rows = collect(&mut source, 1, RowBound::SheetEnd);
        assert_eq!(rows, vec![SheetRow::from_texts(2, &["", "b", "c"])]);
    }

    #[test]
    fn test_empty_range_yields_nothing() {
        let mut source = SheetSource::from_range("Sheet1", Range::empty());
        assert!(collect(&mut source, 2, RowBound::SheetEnd).is_empty());
    }

    #[test]
    fn test_grouper_groups_and_stops_past_bound() {
        let mut grouper = RowGrouper::new(2, RowBound::Fixed(3));
        assert_eq!(grouper.push(1, 0, || Some("header".into())), None);
        assert_eq!(grouper.push(2, 0, || Some("a".into())), None);
        assert_eq!(grouper.push(2, 1, || Some("b".into())), None);
        assert_eq!(grouper.push(2, 7, || Some("ignored".into())), None);

        let row2 = grouper.push(3, 2, || Some("c".into())).unwrap();
        assert_eq!(row2, SheetRow::from_texts(2, &["a", "b"]));

        let row3 = grouper.push(4, 0, || Some("late".into())).unwrap();
        assert_eq!(row3, SheetRow::from_texts(3, &["", "", "c"]));
        assert!(grouper.exhausted);
        assert_eq!(grouper.push(5, 0, || Some("x".into())), None);
        assert_eq!(grouper.finish(), None);
    }

    #[test]
    fn test_grouper_does_not_convert_unread_columns() {
        let mut grouper = RowGrouper::new(1, RowBound::SheetEnd);
        grouper.push(1, 4, || panic!("column 4 must not be converted"));
        assert_eq!(grouper.finish(), Some(SheetRow::empty(1)));
    }

    #[test]
    fn test_select_sheet() {
        let names = vec!["One".to_string(), "Two".to_string()];
        let path = Path::new("book.xlsx");
        assert_eq!(select_sheet(path, names.clone(), None).unwrap(), "One");
        assert_eq!(select_sheet(path, names.clone(), Some("Two")).unwrap(), "Two");
        assert!(matches!(
            select_sheet(path, names, Some("Three")),
            Err(ScanError::SheetNotFound(_))
        ));
        assert!(matches!(
            select_sheet(path, Vec::new(), None),
            Err(ScanError::EmptyWorkbook(_))
        ));
    }

    #[test]
    fn test_open_xlsx_streams_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stream.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "ID").unwrap();
        sheet.write_string(1, 0, "A-2").unwrap();
        sheet.write_number(1, 1, 4603347224946.0).unwrap();
        sheet.write_string(3, 2, "x,y").unwrap();
        sheet.write_string(3, 6, "unread").unwrap();
        workbook.save(&path).unwrap();

        let mut source = SheetSource::open(&path, None).unwrap();
        assert_eq!(source.sheet_name(), "Sheet1");
        assert_eq!(source.path(), path.as_path());

        let rows = collect(&mut source, 2, RowBound::SheetEnd);
        assert_eq!(
            rows,
            vec![
                SheetRow::from_texts(2, &["A-2", "4603347224946"]),
                SheetRow::from_texts(4, &["", "", "x,y"]),
            ]
        );
    }

    #[test]
    fn test_is_xlsx() {
        assert!(is_xlsx(Path::new("a.xlsx")));
        assert!(is_xlsx(Path::new("a.XLSM")));
        assert!(!is_xlsx(Path::new("a.xls")));
        assert!(!is_xlsx(Path::new("a.ods")));
        assert!(!is_xlsx(Path::new("noext")));
    }
}
