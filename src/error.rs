use thiserror::Error;

/// Reasons a session action was declined. The session is left untouched
/// whenever one of these is returned, so callers may ignore it and stay silent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("validation failed: {0}")]
    Blank(&'static str),
    #[error("validation failed: duration must be a positive number of days, got {0:?}")]
    InvalidDuration(String),
    #[error("validation failed: age")]
    MissingAge,
    #[error("validation failed: unknown {field} {value:?}")]
    InvalidEnum { field: &'static str, value: String },
    #[error("an assistant reply is still pending")]
    ExchangePending,
}
