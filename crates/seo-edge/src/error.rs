use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Origin fetch failed: {0}")]
    Origin(String),

    #[error("Unreadable request: {0}")]
    Request(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}
