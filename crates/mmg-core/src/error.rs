//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

/// The error type for `mmg-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("coordinate for node {0} not found")]
    MissingCoordinate(i64),

    #[error("identifier {prefix} ++ {suffix} is out of range")]
    IdOutOfRange { prefix: i64, suffix: i64 },

    #[error("unknown mode id {0}")]
    UnknownMode(i64),

    #[error("unknown switch type id {0}")]
    UnknownSwitchType(i64),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `mmg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
