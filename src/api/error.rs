use thiserror::Error;

/// A field value rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be > -100")]
    RateTooLow { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::NotFinite { field }
            | InputError::Negative { field }
            | InputError::RateTooLow { field }
            | InputError::OutOfRange { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
