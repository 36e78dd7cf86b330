use hifz_srs::SrsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Scheduling error: {0}")]
    Srs(SrsError),
    #[error("Revision store error: {0}")]
    Store(String),
    #[error("Failed to read revision history: {0}")]
    History(#[from] serde_json::Error),
    #[error("Revision history I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SrsError> for ReviewError {
    fn from(err: SrsError) -> Self {
        match err {
            SrsError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::Srs(other),
        }
    }
}

impl From<validator::ValidationErrors> for ReviewError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidInput(errors.to_string())
    }
}
