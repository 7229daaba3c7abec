use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object for the document")]
    ExpectedObject,
}

pub type Result<T> = std::result::Result<T, Error>;
