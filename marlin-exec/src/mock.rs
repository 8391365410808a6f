//! Mock execution engine.
//!
//! Produces deterministic-shaped simulated order records without any
//! network access. Always succeeds, so it can be used unconditionally as
//! the no-network fallback.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

use marlin_domain::{OcoLegKind, OcoLegs, OrderLeg, OrderRecord, OrderRequest, OrderStatus};

use crate::translate::{Translation, VenueOrderKind, VenueOrderSpec};

/// Simulates order execution locally.
///
/// Order IDs come from a monotonic counter, so they are unique within the
/// process lifetime and cannot collide across rapid successive calls.
pub struct MockEngine {
    order_counter: AtomicU64,
}

impl MockEngine {
    /// Create a new mock engine.
    pub fn new() -> Self {
        Self { order_counter: AtomicU64::new(0) }
    }

    /// Generate a unique simulated order ID.
    fn next_order_id(&self) -> String {
        let n = self.order_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("MOCK-{}", n)
    }

    /// Simulate execution of a translated order.
    ///
    /// Single specs produce one `Simulated` record. OCO pairs produce one
    /// record carrying both legs, each individually marked `Simulated`.
    pub fn simulate(&self, request: &OrderRequest, translation: &Translation) -> OrderRecord {
        let legs = match translation {
            Translation::Single(_) => None,
            Translation::OcoPair { limit_leg, stop_leg } => Some(OcoLegs {
                limit_leg: self.simulate_leg(limit_leg, OcoLegKind::Limit),
                stop_leg: self.simulate_leg(stop_leg, OcoLegKind::StopMarket),
            }),
        };

        OrderRecord {
            order_id: self.next_order_id(),
            symbol: request.symbol.clone(),
            side: request.side,
            order_type: request.order_type,
            quantity: request.quantity,
            price: request.price,
            stop_price: request.stop_price,
            status: OrderStatus::Simulated,
            legs,
            placed_at: Utc::now(),
        }
    }

    fn simulate_leg(&self, spec: &VenueOrderSpec, kind: OcoLegKind) -> OrderLeg {
        let price = match spec.kind {
            VenueOrderKind::Limit { price } => price,
            VenueOrderKind::StopMarket { stop_price } => stop_price,
            // OCO legs are always limit or stop-market
            VenueOrderKind::Market => unreachable!("OCO legs carry a defining price"),
        };

        OrderLeg {
            order_id: self.next_order_id(),
            kind,
            price,
            quantity: spec.quantity,
            status: OrderStatus::Simulated,
        }
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
