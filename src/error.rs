use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Construction Error: {0}")]
    Construction(String),

    #[error("Input Validation Error: {0}")]
    Validation(String),
}

pub type SwResult<T> = Result<T, SweepError>;
