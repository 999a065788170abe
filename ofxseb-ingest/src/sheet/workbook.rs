use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use super::{Cell, Sheet};
use crate::error::SourceError;

/// First worksheet of an Excel/ODS workbook.
///
/// Addressing is absolute: row 1 is the top of the sheet even when the
/// used range starts further down.
pub struct WorkbookSheet {
    range: Range<Data>,
}

impl WorkbookSheet {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SourceError::NoWorksheet)??;
        Ok(Self { range })
    }

    pub fn from_range(range: Range<Data>) -> Self {
        Self { range }
    }

    fn value(&self, row: u32, column: u32) -> Cell {
        self.range
            .get_value((row, column))
            .map(to_cell)
            .unwrap_or(Cell::Empty)
    }
}

impl Sheet for WorkbookSheet {
    fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        let row = u32::try_from(row.checked_sub(1)?).ok()?;
        let column = u32::try_from(column.checked_sub(1)?).ok()?;
        self.range.get_value((row, column)).map(to_cell)
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<Cell>> + '_> {
        let Some((last_row, last_column)) = self.range.end() else {
            return Box::new(std::iter::empty());
        };

        Box::new((0..=last_row).map(move |r| {
            (0..=last_column)
                .map(|c| self.value(r, c))
                .collect::<Vec<_>>()
        }))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => Cell::Date(d.date()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
