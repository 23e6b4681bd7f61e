use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("SCHEMA_INVALID: {0}")]
    Schema(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ContentError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(value: serde_json::Error) -> Self {
        Self::Schema(value.to_string())
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
