use thiserror::Error;

/// Errors raised while constructing clocks and their collaborators
///
/// Only construction fails hard. Time-of-day conversions report failure
/// through `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Required argument missing: {0}")]
    NullArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
