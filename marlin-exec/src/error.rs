//! Execution layer error taxonomy and classifier.
//!
//! Every failure that can escape the gateway is one of the kinds below.
//! Transport adapters report raw sub-causes as [`TransportError`]
//! (see `ports`); `ExecError::classify` folds those into the closed
//! taxonomy so no opaque error ever reaches a caller.

use thiserror::Error;

use crate::ports::TransportError;

/// Venue error codes that indicate rejected credentials rather than a
/// rejected order: invalid API key, key without permission, bad signature.
const AUTH_ERROR_CODES: &[i64] = &[-1022, -2014, -2015];

/// Errors surfaced by the execution gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecError {
    /// Transport unreachable, timed out, or credentials rejected
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Well-formed order rejected by the venue at submission time
    #[error("Order rejected by venue: {code} - {reason}")]
    ExchangeRejection {
        /// Venue error code
        code: i64,
        /// Venue error message
        reason: String,
    },

    /// Requested order type is outside the supported set
    #[error("Unsupported order type: {0}")]
    UnsupportedOrderType(String),

    /// Malformed request (missing or invalid fields), a caller error
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Anything unclassified, surfaced verbatim for diagnosis
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ExecError {
    /// Classify a transport failure into the taxonomy.
    ///
    /// Unreachable/timeout/auth sub-causes become `Connectivity`; venue
    /// error bodies become `ExchangeRejection`, except the credential
    /// rejection codes, which are connectivity problems from the gateway's
    /// point of view. Malformed venue responses are `Unexpected`.
    pub fn classify(failure: TransportError) -> Self {
        match failure {
            TransportError::Unreachable(msg) => ExecError::Connectivity(msg),
            TransportError::Timeout => {
                ExecError::Connectivity("request timed out".to_string())
            },
            TransportError::Auth(msg) => ExecError::Connectivity(msg),
            TransportError::Api { code, msg } if AUTH_ERROR_CODES.contains(&code) => {
                ExecError::Connectivity(format!("credentials rejected: {} - {}", code, msg))
            },
            TransportError::Api { code, msg } => {
                ExecError::ExchangeRejection { code, reason: msg }
            },
            TransportError::Malformed(msg) => ExecError::Unexpected(msg),
        }
    }

    /// Build the `InvalidRequest` kind for a missing per-type field.
    pub fn missing_field(order_type: &str, field: &str) -> Self {
        ExecError::InvalidRequest(format!("missing {} for {} order", field, order_type))
    }
}

impl From<TransportError> for ExecError {
    fn from(failure: TransportError) -> Self {
        ExecError::classify(failure)
    }
}

/// Result type for execution operations.
pub type ExecResult<T> = Result<T, ExecError>;

// =============================================================================
// Tests
// =============================================================================
