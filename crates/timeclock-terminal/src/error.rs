//! Terminal error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TerminalError>;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key error: {0}")]
    Key(String),

    #[error(transparent)]
    Core(#[from] timeclock_core::Error),
}
