//! Error types for the hs-app service layer.

use std::path::PathBuf;

/// Shown when the solver answers with a non-2xx status and an empty body.
pub const REJECTED_FALLBACK: &str = "The solver rejected the simulation request";

/// Shown for network, timeout and decoding failures.
pub const GENERIC_FAILURE: &str =
    "Could not complete the simulation. Check that the solver service is reachable and try again.";

/// Failure of a single solver call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("Solver returned HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Could not decode solver response: {0}")]
    Decode(String),
}

impl SubmitError {
    /// Message surfaced to the operator.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Rejected { body, .. } if !body.trim().is_empty() => body.clone(),
            SubmitError::Rejected { .. } => REJECTED_FALLBACK.to_string(),
            SubmitError::Transport(_) | SubmitError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Application error type shared by both frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid scenario: {}", .0.join("; "))]
    InvalidScenario(Vec<String>),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read payload file: {path}")]
    PayloadRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid solver payload: {0}")]
    Payload(String),

    #[error("{0}")]
    Simulation(String),

    #[error("Submission was abandoned before it settled")]
    Abandoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hs-app operations.
pub type AppResult<T> = Result<T, AppError>;
