//! Error types for FLOWGUARD.
//!
//! Every error that reaches a caller of the authorizer carries an implicit
//! denial: there is no error path that resolves to "allowed".

use thiserror::Error;

/// Result type alias using `FlowguardError`.
pub type Result<T> = std::result::Result<T, FlowguardError>;

/// Main error type for all FLOWGUARD operations.
#[derive(Debug, Error)]
pub enum FlowguardError {
    // ═══════════════════════════════════════════════════════════════════════════
    // POLICY SERVICE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The validation request could not be sent or no response was received.
    #[error("Policy request failed: {0}")]
    Transport(String),

    /// The policy service answered with a status other than 200.
    #[error("Policy service returned unexpected status code: {status}")]
    UnexpectedStatus { status: u16 },

    /// The caller-supplied deadline elapsed before the policy service answered.
    #[error("Policy validation timed out after {millis}ms")]
    Timeout { millis: u64 },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The configured address space is not a valid CIDR range.
    #[error("Invalid address space '{0}'")]
    InvalidAddressSpace(String),

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FlowguardError {
    /// Returns true if the error came from talking to the policy service.
    ///
    /// These are the errors the authorizer surfaces without caching, so the
    /// next check for the same flow asks the service again.
    pub fn is_remote_error(&self) -> bool {
        matches!(
            self,
            FlowguardError::Transport(_)
                | FlowguardError::UnexpectedStatus { .. }
                | FlowguardError::Timeout { .. }
        )
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FlowguardError::ConfigError(_) | FlowguardError::InvalidAddressSpace(_)
        )
    }
}

/// Collapses an authorization outcome into a fail-closed verdict.
///
/// `Ok(true)` is the only outcome that allows a flow.
pub fn is_allowed(outcome: &Result<bool>) -> bool {
    matches!(outcome, Ok(true))
}
