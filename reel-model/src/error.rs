use std::fmt::{self, Display};

/// Errors produced by model parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownDuration(String),
    UnknownDeceleration(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownDuration(raw) => write!(
                f,
                "unknown spin duration '{raw}' (expected short, medium or long)"
            ),
            ModelError::UnknownDeceleration(raw) => write!(
                f,
                "unknown deceleration '{raw}' (expected slow, medium or fast)"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
