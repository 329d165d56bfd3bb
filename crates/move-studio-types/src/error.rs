//! Error types shared across Move Studio crates.

use thiserror::Error;

/// A specialized Result type for Move Studio operations.
pub type StudioResult<T> = Result<T, StudioError>;

/// The unified error type for the simulation core.
///
/// Builder validation failures, network/API failures, and decode failures
/// all flow through this enum. The decoder converts any of these into a
/// `status = error` outcome at its boundary rather than propagating them
/// to the UI caller.
#[derive(Error, Debug)]
pub enum StudioError {
    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error occurred during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Error occurred during hex encoding/decoding
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Invalid account address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed module/function identifier from user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fullnode returned an error response
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the node
        message: String,
        /// Optional error code from the node (e.g. `module_not_found`)
        error_code: Option<String>,
        /// Optional VM error code
        vm_error_code: Option<u64>,
    },

    /// The dry-run request itself could not be executed
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudioError {
    /// Creates a new API error from response details.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
            error_code: None,
            vm_error_code: None,
        }
    }

    /// Creates a new API error with the node's structured error fields.
    pub fn api_with_details(
        status_code: u16,
        message: impl Into<String>,
        error_code: Option<String>,
        vm_error_code: Option<u64>,
    ) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
            error_code,
            vm_error_code,
        }
    }

    /// Creates a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns true if this is a "not found" error.
    ///
    /// The decoder treats a not-found before-state lookup as evidence that
    /// a change creates the resource, never as a fatal failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status_code: 404,
                ..
            }
        )
    }

    /// Returns the node's structured error code, if any.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}
