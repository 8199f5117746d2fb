use crate::engine::EngineError;
use notation::ParseError;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by session operations.
///
/// `NotFound` and `InvalidArgument` are the two conditions callers are
/// expected to tell apart; everything else is a failure of the operation.
#[derive(Debug, Error)]
pub enum DeduceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Server error: {0}")]
    Server(String),
}

impl DeduceError {
    pub fn not_found(id: &Uuid) -> Self {
        DeduceError::NotFound(id.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeduceError::NotFound(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DeduceError::InvalidArgument(_))
    }
}

impl From<std::io::Error> for DeduceError {
    fn from(e: std::io::Error) -> Self {
        DeduceError::Snapshot(e.to_string())
    }
}

impl From<serde_json::Error> for DeduceError {
    fn from(e: serde_json::Error) -> Self {
        DeduceError::Snapshot(e.to_string())
    }
}

pub type DeduceResult<T> = Result<T, DeduceError>;
