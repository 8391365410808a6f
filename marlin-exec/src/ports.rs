//! Execution layer port definitions.
//!
//! Ports define the interfaces for external services. Adapters implement
//! these ports for specific venues (Binance futures, stub, etc.). The
//! transport is consumed as an opaque capability exposing exactly two
//! operations: an account-status query and order creation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::translate::VenueOrderSpec;

// =============================================================================
// Transport Failures
// =============================================================================

/// Raw failure sub-causes reported by transport adapters.
///
/// These are deliberately NOT the caller-facing taxonomy: the error
/// classifier (`ExecError::classify`) folds them into the closed set of
/// kinds the gateway surfaces.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Could not reach the venue (connection refused, DNS, TLS)
    #[error("Transport unreachable: {0}")]
    Unreachable(String),

    /// Request exceeded the configured deadline
    #[error("Request timed out")]
    Timeout,

    /// Request was refused before reaching the venue API (401 without body)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Venue returned a structured error body
    #[error("Venue API error: {code} - {msg}")]
    Api {
        /// Venue error code
        code: i64,
        /// Venue error message
        msg: String,
    },

    /// Venue response could not be parsed
    #[error("Malformed venue response: {0}")]
    Malformed(String),
}

// =============================================================================
// Exchange Port
// =============================================================================

/// Port for venue operations used by the gateway.
///
/// Implementations:
/// - `StubExchange` - for testing (configured acks and failure injection)
/// - `BinanceFuturesClient` - real Binance USDⓈ-M futures (marlin-connectors)
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Query account status.
    ///
    /// Used exactly once, by the connectivity probe at gateway construction,
    /// to confirm the configured credentials are usable.
    async fn account_status(&self) -> Result<AccountStatus, TransportError>;

    /// Submit a translated order to the venue.
    ///
    /// Returns the venue-assigned order identifier and fill status, or a
    /// transport failure for the classifier.
    async fn submit_order(&self, spec: &VenueOrderSpec) -> Result<VenueAck, TransportError>;
}

/// Account status returned by the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatus {
    /// Whether the account is currently allowed to trade
    pub can_trade: bool,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueAck {
    /// Venue-assigned order identifier
    pub order_id: String,
    /// Venue fill status (e.g. "FILLED", "NEW")
    pub status: String,
    /// Quantity executed so far, when the venue reports one
    pub executed_qty: Option<Decimal>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_ack_serialization() {
        let ack = VenueAck {
            order_id: "4021".to_string(),
            status: "FILLED".to_string(),
            executed_qty: None,
        };

        let json = serde_json::to_string(&ack).unwrap();
        let parsed: VenueAck = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.order_id, "4021");
        assert_eq!(parsed.status, "FILLED");
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Api {
            code: -2019,
            msg: "Margin is insufficient".to_string(),
        };
        assert_eq!(err.to_string(), "Venue API error: -2019 - Margin is insufficient");
    }
}
