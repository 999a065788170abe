use std::path::PathBuf;
use thiserror::Error;

/// Failure to open or read the underlying file
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported statement file extension {0:?}")]
    UnsupportedFormat(String),
    #[error("workbook has no worksheets")]
    NoWorksheet,
    #[error("could not read workbook")]
    Workbook(#[from] calamine::Error),
    #[error("could not read CSV rows")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not open statement {}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    /// Cell A5 is missing or holds no `(<digits>)` group.
    #[error("no parenthesized account number in cell A5 (found {found:?})")]
    IdentifierNotFound { found: Option<String> },

    #[error("statement has {found} rows, at least {required} are needed")]
    InsufficientRows { found: usize, required: usize },

    /// `row` and `column` are 1-based sheet coordinates.
    #[error("row {row}, column {column}: {reason}")]
    MalformedRow {
        row: usize,
        column: usize,
        reason: String,
    },
}
