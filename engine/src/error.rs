use thiserror::Error;

/// Errors raised by the scoring engine and the universe loader.
#[derive(Debug, Error)]
pub enum FscoreError {
    /// Fewer than two indicator records were returned for a ticker.
    #[error("indicator history has {records} record(s), at least 2 are required")]
    InsufficientHistory { records: usize },

    /// One of the two evaluated records lacks a field or holds a non-numeric value.
    #[error("indicator record {index} is malformed: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("no tickers left in the universe after filtering")]
    UniverseEmpty,

    #[error("ticker {0} appears more than once in the universe")]
    DuplicateTicker(String),

    #[error("universe has no `{0}` column")]
    MissingColumn(String),

    #[error("invalid value `{value}` in column `{column}` for ticker {ticker}")]
    InvalidNumber {
        ticker: String,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FscoreError>;
