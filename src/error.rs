// File: src/error.rs
use thiserror::Error;

/// Every failure the predictor can surface. None of these are recovered
/// internally; the caller decides what to show.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("failed to read counts: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    MissingData(#[from] MissingDataError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// A counts line the parser could not make sense of.
#[derive(Debug, Error, PartialEq)]
#[error("malformed counts line {line}: {reason}")]
pub struct FormatError {
    /// 1-based line number in the counts source.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum MissingDataError {
    #[error("counts source has no \"all\" totals line")]
    NoTotals,

    #[error("no category has both a total and word counts")]
    NoCategories,
}

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("cannot normalize \"{table}\": counts sum to zero")]
    ZeroTotal { table: String },

    #[error("cannot normalize \"{table}\": \"{key}\" has a zero count")]
    ZeroCount { table: String, key: String },

    #[error("category \"{category}\" has no UNK entry for unseen words")]
    MissingUnknown { category: String },

    #[error("category \"{category}\" has word counts but no total in the \"all\" line")]
    MissingTotal { category: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum NumericError {
    /// Usually every score underflowed to zero on a very long input.
    #[error("category scores sum to {sum}; cannot renormalize")]
    DegenerateScores { sum: f64 },
}

pub type Result<T> = std::result::Result<T, PredictorError>;
