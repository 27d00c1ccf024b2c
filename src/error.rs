use std::path::PathBuf;
use thiserror::Error;

/// Failure to translate a phrase.
///
/// Never reaches callers of the printer: the translator turns every variant
/// into "print the original text".
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("no translation found")]
    NotFound,

    #[error("failed to read dictionary {}: {source}", path.display())]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to update dictionary {}: {source}", path.display())]
    DictionaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Error rendering a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} has {cells} cells but the table has {columns} columns")]
    RowTooLong {
        row: usize,
        cells: usize,
        columns: usize,
    },

    #[error("table has no columns")]
    NoColumns,
}

/// Error plotting on the world map.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("coordinate ({latitude}, {longitude}) is outside the map")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Error splitting a command line into arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unclosed {0} quote")]
    UnclosedQuote(char),

    #[error("line ends with an escape character")]
    TrailingEscape,
}
