use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot canonicalize parameter '{parameter}': {reason}")]
    Canonicalization { parameter: String, reason: String },

    #[error("shared parameter '{name}' already exists with a different definition")]
    ConflictingSharedParameter { name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
