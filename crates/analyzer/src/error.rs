use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("Unknown sort field '{0}' (expected one of: {1})")]
    UnknownSortField(String, String),

    #[error("ABC thresholds must satisfy 0 < A ({0}) < B ({1}) <= 100")]
    InvalidThresholds(String, String),
}
