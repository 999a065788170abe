//! SEB (Sweden) spreadsheet export parser
//!
//! Layout of the export (1-based rows/columns):
//!   A5        free text with the account number, e.g. "Privatkonto (53571234567)"
//!   rows 1-8  header block, always skipped
//!   row 9..   Bokföringsdatum | Valutadatum | Verifikationsnummer | Text | Belopp | Saldo
//!
//! Data rows are listed most recent first, so the first data row anchors the
//! closing balance and end date and the last one anchors the opening balance
//! and start date.

use chrono::NaiveDate;
use ofxseb_core::{BankAccount, MONEY_SCALE, Statement, StatementLine, StatementParser, try_quantize};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::account_id::extract_account_id;
use crate::error::ParseError;
use crate::sheet::{Cell, Sheet, open_sheet};

pub const BANK_ID: &str = "SE31500000000";
pub const CURRENCY: &str = "SEK";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const ACCOUNT_CELL: (usize, usize) = (5, 1);
const HEADER_ROWS: usize = 8;
const REQUIRED_COLUMNS: usize = 6;

const COL_DATE: usize = 1;
const COL_DATE_USER: usize = 2;
const COL_REFNUM: usize = 3;
const COL_MEMO: usize = 4;
const COL_AMOUNT: usize = 5;
const COL_BALANCE: usize = 6;

/// Parser bound to one export file. The file is opened per `parse` call and
/// closed before it returns.
#[derive(Debug, Clone)]
pub struct SebParser {
    path: PathBuf,
}

impl SebParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(&self) -> Result<Statement, ParseError> {
        let sheet = open_sheet(&self.path).map_err(|source| ParseError::Source {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "opened SEB export");
        parse_sheet(sheet.as_ref())
    }
}

impl StatementParser for SebParser {
    type Error = ParseError;

    fn parse(&self) -> Result<Statement, ParseError> {
        SebParser::parse(self)
    }
}

/// Summary inputs kept for the first and last data rows
#[derive(Debug, Clone, Copy)]
struct Anchor {
    row: usize,
    date: NaiveDate,
    amount: Decimal,
    balance: Decimal,
}

/// Parse an SEB export from any tabular source in a single pass over its rows.
pub fn parse_sheet(sheet: &dyn Sheet) -> Result<Statement, ParseError> {
    let account_text = sheet.cell(ACCOUNT_CELL.0, ACCOUNT_CELL.1).map(|c| c.to_text());
    let account_id = account_text
        .as_deref()
        .and_then(extract_account_id)
        .ok_or_else(|| ParseError::IdentifierNotFound {
            found: account_text.clone(),
        })?;
    let account = BankAccount::new(BANK_ID, account_id);

    let mut lines = Vec::new();
    let mut first: Option<Anchor> = None;
    let mut last: Option<Anchor> = None;
    let mut row_count = 0;

    for (idx, cells) in sheet.rows().enumerate() {
        let row = idx + 1;
        row_count = row;
        if row <= HEADER_ROWS {
            continue;
        }

        let (line, anchor) = parse_row(row, &cells, &account)?;
        lines.push(line);
        if first.is_none() {
            first = Some(anchor);
        }
        last = Some(anchor);
    }

    let (Some(first), Some(last)) = (first, last) else {
        return Err(ParseError::InsufficientRows {
            found: row_count,
            required: HEADER_ROWS + 1,
        });
    };
    debug!(
        first_row = first.row,
        last_row = last.row,
        "deriving statement summary"
    );

    let start_balance = last
        .balance
        .checked_sub(last.amount)
        .and_then(try_quantize)
        .ok_or_else(|| malformed(last.row, COL_BALANCE, "opening balance out of range"))?;
    let end_balance = try_quantize(first.balance)
        .ok_or_else(|| malformed(first.row, COL_BALANCE, "closing balance out of range"))?;

    let statement = Statement {
        bank_id: BANK_ID.to_string(),
        currency: CURRENCY.to_string(),
        account_id,
        start_date: last.date,
        end_date: first.date,
        start_balance,
        end_balance,
        lines,
    };

    info!(
        account_id,
        lines = statement.lines.len(),
        start = %statement.start_date,
        end = %statement.end_date,
        "parsed SEB statement"
    );
    Ok(statement)
}

fn parse_row(
    row: usize,
    cells: &[Cell],
    account: &BankAccount,
) -> Result<(StatementLine, Anchor), ParseError> {
    if cells.len() < REQUIRED_COLUMNS {
        return Err(malformed(
            row,
            cells.len() + 1,
            format!("expected {REQUIRED_COLUMNS} columns, found {}", cells.len()),
        ));
    }

    let date = parse_date(row, cells, COL_DATE)?;
    let date_user = parse_date(row, cells, COL_DATE_USER)?;
    let amount = parse_decimal(row, cells, COL_AMOUNT)?;
    let balance = parse_decimal(row, cells, COL_BALANCE)?;
    for (column, value) in [(COL_AMOUNT, amount), (COL_BALANCE, balance)] {
        if try_quantize(value).is_none() {
            return Err(malformed(
                row,
                column,
                format!("{value} cannot carry {MONEY_SCALE} fraction digits"),
            ));
        }
    }

    let line = StatementLine::new(
        date,
        date_user,
        cells[COL_REFNUM - 1].to_text(),
        cells[COL_MEMO - 1].to_text(),
        amount,
        account.clone(),
    );

    Ok((
        line,
        Anchor {
            row,
            date,
            amount,
            balance,
        },
    ))
}

fn parse_date(row: usize, cells: &[Cell], column: usize) -> Result<NaiveDate, ParseError> {
    match &cells[column - 1] {
        Cell::Date(d) => Ok(*d),
        Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
            malformed(row, column, format!("{s:?} is not a {DATE_FORMAT} date: {e}"))
        }),
        other => Err(malformed(row, column, format!("expected a date, found {other:?}"))),
    }
}

fn parse_decimal(row: usize, cells: &[Cell], column: usize) -> Result<Decimal, ParseError> {
    match &cells[column - 1] {
        Cell::Number(n) => Decimal::try_from(*n)
            .map_err(|e| malformed(row, column, format!("{n} is not a decimal amount: {e}"))),
        Cell::Text(s) => Decimal::from_str(s.trim())
            .map_err(|e| malformed(row, column, format!("{s:?} is not a decimal amount: {e}"))),
        other => Err(malformed(
            row,
            column,
            format!("expected an amount, found {other:?}"),
        )),
    }
}

fn malformed(row: usize, column: usize, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedRow {
        row,
        column,
        reason: reason.into(),
    }
}
