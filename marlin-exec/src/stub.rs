//! Stub transport for testing.
//!
//! Simulates the venue without making real API calls: immediate acks with
//! counter-based order IDs, plus failure injection for probe and
//! submission paths.

use async_trait::async_trait;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::{AccountStatus, ExchangePort, TransportError, VenueAck};
use crate::translate::VenueOrderSpec;

/// Stub exchange transport for tests.
pub struct StubExchange {
    /// Order counter for generating ack IDs
    order_counter: AtomicU64,
    /// Persistent failure returned by account_status (probe failures)
    account_failure: RwLock<Option<TransportError>>,
    /// One-shot failure for the next submit_order call
    fail_next_submit: RwLock<Option<TransportError>>,
    /// Every spec that reached submit_order
    submissions: RwLock<Vec<VenueOrderSpec>>,
    /// Number of account_status calls observed
    account_status_calls: AtomicU64,
}

impl StubExchange {
    /// Create a stub that accepts everything.
    pub fn new() -> Self {
        Self {
            order_counter: AtomicU64::new(0),
            account_failure: RwLock::new(None),
            fail_next_submit: RwLock::new(None),
            submissions: RwLock::new(Vec::new()),
            account_status_calls: AtomicU64::new(0),
        }
    }

    /// Make every account_status call fail with the given sub-cause.
    pub fn set_account_failure(&self, failure: TransportError) {
        *self.account_failure.write().unwrap() = Some(failure);
    }

    /// Make the next submit_order call fail with the given sub-cause.
    pub fn set_fail_next_submit(&self, failure: TransportError) {
        *self.fail_next_submit.write().unwrap() = Some(failure);
    }

    /// Specs that actually reached the transport, in call order.
    pub fn submissions(&self) -> Vec<VenueOrderSpec> {
        self.submissions.read().unwrap().clone()
    }

    /// Number of submit_order calls observed.
    pub fn submission_count(&self) -> usize {
        self.submissions.read().unwrap().len()
    }

    /// Number of account_status calls observed.
    pub fn account_status_calls(&self) -> u64 {
        self.account_status_calls.load(Ordering::SeqCst)
    }

    fn next_order_id(&self) -> String {
        let n = self.order_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("EX-{}", n)
    }

    fn take_submit_failure(&self) -> Option<TransportError> {
        self.fail_next_submit.write().unwrap().take()
    }
}

impl Default for StubExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangePort for StubExchange {
    async fn account_status(&self) -> Result<AccountStatus, TransportError> {
        self.account_status_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = self.account_failure.read().unwrap().clone() {
            return Err(failure);
        }

        Ok(AccountStatus { can_trade: true })
    }

    async fn submit_order(&self, spec: &VenueOrderSpec) -> Result<VenueAck, TransportError> {
        if let Some(failure) = self.take_submit_failure() {
            return Err(failure);
        }

        self.submissions.write().unwrap().push(spec.clone());

        Ok(VenueAck {
            order_id: self.next_order_id(),
            status: "FILLED".to_string(),
            executed_qty: Some(spec.quantity.as_decimal()),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{TimeInForce, VenueOrderKind};
    use marlin_domain::{OrderSide, Quantity, Symbol};
    use rust_decimal_macros::dec;

    fn market_spec() -> VenueOrderSpec {
        VenueOrderSpec {
            symbol: Symbol::from_pair("BTCUSDT").unwrap(),
            side: OrderSide::Buy,
            kind: VenueOrderKind::Market,
            quantity: Quantity::new(dec!(0.01)).unwrap(),
            time_in_force: None,
        }
    }

    #[tokio::test]
    async fn test_stub_acks_with_unique_ids() {
        let exchange = StubExchange::new();

        let first = exchange.submit_order(&market_spec()).await.unwrap();
        let second = exchange.submit_order(&market_spec()).await.unwrap();

        assert_ne!(first.order_id, second.order_id);
        assert_eq!(exchange.submission_count(), 2);
    }

    #[tokio::test]
    async fn test_fail_next_submit_is_one_shot() {
        let exchange = StubExchange::new();
        exchange.set_fail_next_submit(TransportError::Timeout);

        let failed = exchange.submit_order(&market_spec()).await;
        assert!(matches!(failed, Err(TransportError::Timeout)));

        let ok = exchange.submit_order(&market_spec()).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_account_failure_is_persistent() {
        let exchange = StubExchange::new();
        exchange.set_account_failure(TransportError::Unreachable("refused".to_string()));

        assert!(exchange.account_status().await.is_err());
        assert!(exchange.account_status().await.is_err());
        assert_eq!(exchange.account_status_calls(), 2);
    }

    #[tokio::test]
    async fn test_gtc_spec_round_trips_through_stub() {
        let exchange = StubExchange::new();
        let spec = VenueOrderSpec {
            time_in_force: Some(TimeInForce::GoodTillCancelled),
            ..market_spec()
        };

        exchange.submit_order(&spec).await.unwrap();

        assert_eq!(exchange.submissions()[0].time_in_force, Some(TimeInForce::GoodTillCancelled));
    }
}
