use std::io::Read;
use std::path::Path;

use super::{Cell, Sheet};

/// A fully materialized table. Backs CSV exports and in-memory fixtures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, csv::Error> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)?;
        Self::from_csv(rdr)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);
        Self::from_csv(rdr)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self, csv::Error> {
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(Cell::from).collect());
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Sheet for Table {
    fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.rows
            .get(row.checked_sub(1)?)?
            .get(column.checked_sub(1)?)
            .cloned()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<Cell>> + '_> {
        Box::new(self.rows.iter().cloned())
    }
}
