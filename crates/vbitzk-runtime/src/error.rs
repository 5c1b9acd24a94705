//! Error types for the vBitZK demo

use thiserror::Error;

/// Result type alias for vBitZK operations
pub type Result<T> = std::result::Result<T, VbitzkError>;

/// Main error type for vBitZK operations
#[derive(Debug, Error)]
pub enum VbitzkError {
    /// Identifier rejected before a run could start (only emptiness is checked)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A submit arrived while a simulation was still in flight
    #[error("Submit rejected: a proof simulation is already running")]
    ConcurrentSubmitRejected,

    /// A run ticket from an abandoned run was used after a newer run began
    #[error("Run {ticket} was superseded by run {current}")]
    SupersededRun { ticket: u64, current: u64 },

    /// Network name outside the supported set
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other errors not covered by specific variants
    #[error("{0}")]
    Other(String),
}

impl VbitzkError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
