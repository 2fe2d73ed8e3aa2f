use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynapseError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Email Pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Delivery Error: {0}")]
    Delivery(String),
}

pub type SynResult<T> = Result<T, SynapseError>;
