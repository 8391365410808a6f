//! Execution gateway: committed-mode order routing.
//!
//! The gateway owns the committed execution mode and the order ledger.
//! Each submission is translated, dispatched to the live transport or the
//! mock engine, and recorded. Mode is decided exactly once, at
//! construction, by the connectivity probe; a live failure on an
//! individual order never demotes the session to simulation.
//!
//! # Flow
//!
//! ```text
//! OrderRequest → translate → [transport | mock engine] → classify → ledger → caller
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use marlin_domain::{OrderRecord, OrderRequest, OrderStatus};

use crate::error::{ExecError, ExecResult};
use crate::ledger::OrderLedger;
use crate::mock::MockEngine;
use crate::ports::ExchangePort;
use crate::probe::{probe, ProbeResult};
use crate::translate::{translate, Translation, VenueOrderSpec};

// =============================================================================
// Execution Mode
// =============================================================================

/// The committed execution mode, fixed for the gateway lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Orders are submitted to the venue
    Live,
    /// Orders are simulated locally
    Mock,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Live => write!(f, "LIVE"),
            ExecutionMode::Mock => write!(f, "MOCK"),
        }
    }
}

/// Backend committed at construction.
///
/// The transport is only reachable through the `Live` arm, so mock-mode
/// code cannot accidentally hit the network.
enum Backend<T> {
    Live(Arc<T>),
    Mock,
}

// =============================================================================
// Gateway
// =============================================================================

/// Order-execution gateway over one venue transport.
///
/// Exclusively owns the committed mode and the ledger; nothing else
/// mutates either.
pub struct Gateway<T> {
    backend: Backend<T>,
    mock: MockEngine,
    ledger: OrderLedger,
    probe_result: ProbeResult,
}

impl<T: ExchangePort> Gateway<T> {
    /// Construct a gateway, committing the execution mode.
    ///
    /// `None` transport (no credentials configured) commits to simulation
    /// without any network call. `Some` runs the connectivity probe once;
    /// a probe failure also commits to simulation and is never fatal.
    pub async fn connect(transport: Option<T>) -> Self {
        let probe_result = probe(transport.as_ref()).await;

        let backend = match transport {
            Some(t) if probe_result.ok => Backend::Live(Arc::new(t)),
            _ => Backend::Mock,
        };

        let gateway = Self {
            backend,
            mock: MockEngine::new(),
            ledger: OrderLedger::new(),
            probe_result,
        };

        info!(mode = %gateway.mode(), "Execution mode committed");
        gateway
    }

    /// The committed execution mode.
    pub fn mode(&self) -> ExecutionMode {
        match self.backend {
            Backend::Live(_) => ExecutionMode::Live,
            Backend::Mock => ExecutionMode::Mock,
        }
    }

    /// Outcome of the construction-time connectivity probe.
    pub fn probe_result(&self) -> &ProbeResult {
        &self.probe_result
    }

    /// Submit one order.
    ///
    /// Every call that reaches an execution surface terminates in a ledger
    /// record: venue fills and simulated fills as the returned record,
    /// classified venue failures as a `Rejected` record alongside the
    /// returned error. Requests that fail translation are returned
    /// immediately without a ledger entry, since nothing was attempted.
    pub async fn submit(&self, request: &OrderRequest) -> ExecResult<OrderRecord> {
        let translation = translate(request)?;

        let record = match &self.backend {
            Backend::Mock => self.mock.simulate(request, &translation),

            Backend::Live(transport) => match &translation {
                // The venue has no native OCO for this instrument class;
                // legs are synthesized locally in both modes.
                Translation::OcoPair { .. } => self.mock.simulate(request, &translation),

                Translation::Single(spec) => {
                    match self.submit_live(transport, request, spec).await {
                        Ok(record) => record,
                        Err(kind) => {
                            self.ledger.append(rejected_record(request));
                            return Err(kind);
                        },
                    }
                },
            },
        };

        info!(
            order_id = %record.order_id,
            symbol = %record.symbol,
            side = %record.side,
            order_type = record.order_type.as_str(),
            status = ?record.status,
            "Order recorded"
        );

        self.ledger.append(record.clone());
        Ok(record)
    }

    /// Everything attempted this session, in call order.
    pub fn history(&self) -> Vec<OrderRecord> {
        self.ledger.all()
    }

    async fn submit_live(
        &self,
        transport: &Arc<T>,
        request: &OrderRequest,
        spec: &VenueOrderSpec,
    ) -> ExecResult<OrderRecord> {
        match transport.submit_order(spec).await {
            Ok(ack) => Ok(OrderRecord {
                order_id: ack.order_id,
                symbol: request.symbol.clone(),
                side: request.side,
                order_type: request.order_type,
                quantity: request.quantity,
                price: request.price,
                stop_price: request.stop_price,
                status: OrderStatus::Filled,
                legs: None,
                placed_at: Utc::now(),
            }),
            Err(failure) => {
                let kind = ExecError::classify(failure);
                error!(
                    symbol = %request.symbol,
                    side = %request.side,
                    error = %kind,
                    "Live order failed"
                );
                Err(kind)
            },
        }
    }
}

/// Record for a live order the venue rejected.
///
/// The venue assigns no identifier to a rejected order, so the gateway
/// mints a local one to keep records unique.
fn rejected_record(request: &OrderRequest) -> OrderRecord {
    OrderRecord {
        order_id: Uuid::now_v7().to_string(),
        symbol: request.symbol.clone(),
        side: request.side,
        order_type: request.order_type,
        quantity: request.quantity,
        price: request.price,
        stop_price: request.stop_price,
        status: OrderStatus::Rejected,
        legs: None,
        placed_at: Utc::now(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use crate::stub::StubExchange;
    use marlin_domain::{OrderSide, Price, Quantity, Symbol};
    use rust_decimal_macros::dec;

    fn btcusdt() -> Symbol {
        Symbol::from_pair("BTCUSDT").unwrap()
    }

    fn market_request() -> OrderRequest {
        OrderRequest::market(btcusdt(), OrderSide::Buy, Quantity::new(dec!(0.01)).unwrap())
    }

    #[tokio::test]
    async fn test_no_transport_commits_to_mock() {
        let gateway = Gateway::<StubExchange>::connect(None).await;

        assert_eq!(gateway.mode(), ExecutionMode::Mock);
        assert!(gateway.probe_result().detail.is_none());
    }

    #[tokio::test]
    async fn test_working_transport_commits_to_live() {
        let gateway = Gateway::connect(Some(StubExchange::new())).await;

        assert_eq!(gateway.mode(), ExecutionMode::Live);
    }

    #[tokio::test]
    async fn test_failing_probe_commits_to_mock() {
        let exchange = StubExchange::new();
        exchange.set_account_failure(TransportError::Unreachable("refused".to_string()));

        let gateway = Gateway::connect(Some(exchange)).await;

        assert_eq!(gateway.mode(), ExecutionMode::Mock);
        assert!(matches!(
            gateway.probe_result().detail,
            Some(ExecError::Connectivity(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_submit_simulates_and_ledgers() {
        let gateway = Gateway::<StubExchange>::connect(None).await;

        let record = gateway.submit(&market_request()).await.unwrap();

        assert_eq!(record.status, OrderStatus::Simulated);
        assert_eq!(record.symbol.as_pair(), "BTCUSDT");
        assert_eq!(gateway.history().len(), 1);
    }

    #[tokio::test]
    async fn test_live_submit_fills_via_transport() {
        let gateway = Gateway::connect(Some(StubExchange::new())).await;

        let record = gateway.submit(&market_request()).await.unwrap();

        assert_eq!(record.status, OrderStatus::Filled);
        assert_eq!(record.order_id, "EX-1");
        assert_eq!(gateway.history().len(), 1);
    }

    #[tokio::test]
    async fn test_translation_failure_leaves_ledger_unchanged() {
        let gateway = Gateway::<StubExchange>::connect(None).await;
        let mut request = OrderRequest::limit(
            btcusdt(),
            OrderSide::Sell,
            Quantity::new(dec!(1.0)).unwrap(),
            Price::new(dec!(30000)).unwrap(),
        );
        request.price = None;

        let err = gateway.submit(&request).await.unwrap_err();

        assert!(matches!(err, ExecError::InvalidRequest(_)));
        assert!(gateway.history().is_empty());
    }

    #[tokio::test]
    async fn test_live_rejection_ledgers_and_surfaces_error() {
        let exchange = StubExchange::new();
        exchange.set_fail_next_submit(TransportError::Api {
            code: -2019,
            msg: "Margin is insufficient".to_string(),
        });
        let gateway = Gateway::connect(Some(exchange)).await;

        let err = gateway.submit(&market_request()).await.unwrap_err();

        assert!(matches!(err, ExecError::ExchangeRejection { .. }));
        let history = gateway.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, OrderStatus::Rejected);
    }

    #[tokio::test]
    async fn test_live_failure_does_not_demote_mode() {
        let exchange = StubExchange::new();
        exchange.set_fail_next_submit(TransportError::Timeout);
        let gateway = Gateway::connect(Some(exchange)).await;

        let err = gateway.submit(&market_request()).await.unwrap_err();
        assert!(matches!(err, ExecError::Connectivity(_)));
        assert_eq!(gateway.mode(), ExecutionMode::Live);

        // The next order still reaches the transport
        let record = gateway.submit(&market_request()).await.unwrap();
        assert_eq!(record.status, OrderStatus::Filled);
    }

    #[tokio::test]
    async fn test_oco_is_simulated_even_in_live_mode() {
        let exchange = StubExchange::new();
        let gateway = Gateway::connect(Some(exchange)).await;
        let request = OrderRequest::oco(
            btcusdt(),
            OrderSide::Buy,
            Quantity::new(dec!(0.5)).unwrap(),
            Price::new(dec!(30000)).unwrap(),
            Price::new(dec!(29000)).unwrap(),
        );

        let record = gateway.submit(&request).await.unwrap();

        assert_eq!(record.status, OrderStatus::Simulated);
        assert!(record.legs.is_some());
        // Nothing reached the venue
        if let Backend::Live(transport) = &gateway.backend {
            assert_eq!(transport.submission_count(), 0);
        } else {
            panic!("Expected live backend");
        }
    }
}
