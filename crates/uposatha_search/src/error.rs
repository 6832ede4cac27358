//! Error types for observance classification and search.

use uposatha_vedic::OracleError;

/// Errors from observance classification and search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Tithi oracle failure, propagated without retry.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
    /// Invalid input range or calendar parameter.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),
}
