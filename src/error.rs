use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub const NO_FILE_MESSAGE: &str = "Please upload an image first.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Wrong file type or oversized file, raised before any network traffic.
    #[error("{0}")]
    Validation(String),

    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,

    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The backend answered with a success status but the body was not a classification.
    #[error("{0}")]
    InvalidResponse(String),

    #[error("A classification is already in progress.")]
    Busy,

    #[error("{0}")]
    Io(String),

    /// Encoding the command's own output failed.
    #[error("{0}")]
    Output(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NoFileSelected => "precondition",
            AppError::Timeout => "timeout",
            AppError::Transport(_) => "transport",
            AppError::Backend { .. } => "backend",
            AppError::InvalidResponse(_) => "invalid_response",
            AppError::Busy => "busy",
            AppError::Io(_) => "io",
            AppError::Output(_) => "output",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Serialize for AppError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidResponse(err.to_string())
    }
}
