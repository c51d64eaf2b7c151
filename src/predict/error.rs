use chrono::{DateTime, Local};
use thiserror::Error;

/// Failure reported by the propagation collaborator for a single instant.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PropagationError(pub String);

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid TLE format")]
    InvalidTleFormat,
    #[error("invalid TLE: {0}")]
    InvalidTle(String),
    #[error("propagation failed at {instant}: {source}")]
    Propagation {
        instant: DateTime<Local>,
        source: PropagationError,
    },
}
