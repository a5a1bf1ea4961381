use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectorError {
    #[error("Economics model parameters are invalid: {0}")]
    InvalidParameters(String),

    #[error("Percentage '{0}' must lie within 0..=100, got {1}")]
    PercentOutOfRange(&'static str, Decimal),

    #[error("'{0}' must not be negative, got {1}")]
    Negative(&'static str, Decimal),
}
