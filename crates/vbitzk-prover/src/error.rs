//! Prover error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error(transparent)]
    RuntimeError(#[from] vbitzk_runtime::VbitzkError),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProverError {
    /// The underlying runtime error, if this wraps one
    pub fn as_runtime(&self) -> Option<&vbitzk_runtime::VbitzkError> {
        match self {
            ProverError::RuntimeError(err) => Some(err),
            ProverError::Json(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProverError>;
