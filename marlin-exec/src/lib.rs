//! Marlin Execution Layer
//!
//! The execution abstraction core: committed-mode routing between a live
//! venue transport and a local simulation engine, with a closed error
//! taxonomy and an append-only order ledger.
//!
//! # Architecture
//!
//! ```text
//! OrderRequest → Gateway.submit → translate → [transport | MockEngine]
//!                                                  ↓ (on failure)
//!                                             ExecError::classify
//!                                                  ↓
//!                                             OrderLedger.append → caller
//! ```
//!
//! # Components
//!
//! - **Ports**: traits defining the venue transport capability
//! - **Translate**: pure per-type mapping to venue order specifications
//! - **MockEngine**: deterministic-shaped simulated fills, no network
//! - **Probe**: one-shot startup connectivity check
//! - **Gateway**: committed-mode router owning the ledger
//! - **Stub**: test transport with failure injection
//!
//! # Example
//!
//! ```rust,ignore
//! use marlin_exec::{Gateway, StubExchange};
//! use marlin_domain::{OrderRequest, OrderSide, Quantity, Symbol};
//!
//! // No credentials: the gateway commits to simulation
//! let gateway = Gateway::<StubExchange>::connect(None).await;
//!
//! let request = OrderRequest::market(
//!     Symbol::from_pair("BTCUSDT")?,
//!     OrderSide::Buy,
//!     Quantity::new(dec!(0.01))?,
//! );
//! let record = gateway.submit(&request).await?;
//! assert!(record.is_simulated());
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod gateway;
pub mod ledger;
pub mod mock;
pub mod ports;
pub mod probe;
pub mod stub;
pub mod translate;

// Re-exports for convenience
pub use error::{ExecError, ExecResult};
pub use gateway::{ExecutionMode, Gateway};
pub use ledger::OrderLedger;
pub use mock::MockEngine;
pub use ports::{AccountStatus, ExchangePort, TransportError, VenueAck};
pub use probe::{probe, ProbeResult};
pub use stub::StubExchange;
pub use translate::{translate, TimeInForce, Translation, VenueOrderKind, VenueOrderSpec};
