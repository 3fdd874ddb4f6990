use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read stock data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid stock data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
