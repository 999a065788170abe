//! Read-only tabular sources (workbooks and CSV) behind one row-oriented view.

mod delimited;
mod workbook;

use chrono::NaiveDate;
use std::path::Path;

use crate::error::SourceError;

pub use delimited::Table;
pub use workbook::WorkbookSheet;

/// A single spreadsheet value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Plain-text rendering, used for free-text columns.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

pub trait Sheet {
    /// Cell at a 1-based `(row, column)` address, `None` outside the sheet.
    fn cell(&self, row: usize, column: usize) -> Option<Cell>;

    /// Every row from row 1 onward, in sheet order.
    fn rows(&self) -> Box<dyn Iterator<Item = Vec<Cell>> + '_>;
}

/// Open a statement file, choosing the backend from its extension.
pub fn open_sheet(path: &Path) -> Result<Box<dyn Sheet>, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Box::new(Table::from_csv_path(path)?)),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(WorkbookSheet::open(path)?)),
        _ => Err(SourceError::UnsupportedFormat(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(Cell::Empty.to_text(), "");
        assert_eq!(Cell::from("Grocery").to_text(), "Grocery");
        assert_eq!(Cell::Number(42.0).to_text(), "42");
        assert_eq!(Cell::Number(-12.5).to_text(), "-12.5");
        let d = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(Cell::Date(d).to_text(), "2023-01-15");
    }

    #[test]
    fn test_scalar_conversions() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(Cell::from(-50.25), Cell::Number(-50.25));
        assert_eq!(Cell::from(d), Cell::Date(d));
    }

    #[test]
    fn test_empty_str_is_empty_cell() {
        assert!(Cell::from("").is_empty());
        assert!(!Cell::from(" ").is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        match open_sheet(Path::new("statement.pdf")) {
            Err(SourceError::UnsupportedFormat(ext)) => assert_eq!(ext, "pdf"),
            Err(other) => panic!("expected UnsupportedFormat, got {other:?}"),
            Ok(_) => panic!("expected UnsupportedFormat"),
        }
    }

    #[test]
    fn test_missing_csv_is_source_error() {
        assert!(matches!(
            open_sheet(Path::new("/nonexistent/statement.csv")),
            Err(SourceError::Csv(_))
        ));
    }
}
