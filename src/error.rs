use thiserror::Error as ThisError;

use crate::constants;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid address: {0}")]
    Validation(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    /// Message shown to the requesting user. Input and validation errors
    /// carry their specific reason; everything upstream-shaped collapses to
    /// one generic line so raw statuses and payloads never reach the chat.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Validation(msg) => format!("\u{274c} {}", msg),
            AppError::RateLimit => constants::MSG_RATE_LIMITED.to_string(),
            AppError::NotFound(_) => constants::MSG_NOT_FOUND.to_string(),
            AppError::Config(_) | AppError::Io(_) | AppError::Upstream(_) => {
                constants::MSG_UPSTREAM_ERROR.to_string()
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
