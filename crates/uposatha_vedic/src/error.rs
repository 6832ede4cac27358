//! Error types for tithi oracle queries.

/// Errors reported by a [`TithiOracle`](crate::TithiOracle).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum OracleError {
    /// The oracle could not be reached or failed internally.
    /// Callers decide whether to retry.
    #[error("tithi oracle unavailable: {0}")]
    Unavailable(String),
    /// No sunrise or sunset can be resolved for the day (polar night,
    /// midnight sun). There is no sunrise-anchored tithi to report.
    #[error("astronomically indeterminate: {0}")]
    AstronomicalIndeterminate(&'static str),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}

impl OracleError {
    /// Whether this error reflects a genuine astronomical ambiguity rather
    /// than a failure of the oracle itself.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::AstronomicalIndeterminate(_))
    }
}
