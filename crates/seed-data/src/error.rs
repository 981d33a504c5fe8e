//! Error type shared by the generators, the SQL writer, and the scenario builder.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Date arithmetic overflowed: {0}")]
    DateOverflow(String),

    #[error("Date component out of range: {0}")]
    DateComponent(#[from] time::error::ComponentRange),

    #[error("Timestamp formatting error: {0}")]
    Format(#[from] time::error::Format),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
