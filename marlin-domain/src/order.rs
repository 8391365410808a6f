//! Order model for the execution gateway.
//!
//! A generic `OrderRequest` describes what the operator wants; an
//! `OrderRecord` is the terminal outcome of one submission attempt.
//! Every code path produces a record of the same shape, with an optional
//! OCO leg pair for synthesized one-cancels-other orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{OrderSide, Price, Quantity, Symbol};

// =============================================================================
// Order Type
// =============================================================================

/// Order types accepted by the gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderType {
    /// Market order (immediate execution)
    Market,
    /// Limit order (price guaranteed, good-till-cancelled)
    Limit,
    /// Stop-limit order (maps to a stop-triggered market order on the venue)
    StopLimit,
    /// One-cancels-other, synthesized as two independent legs
    Oco,
}

impl OrderType {
    /// Parse from operator input (case-insensitive).
    ///
    /// Returns `None` for anything outside the supported set; the caller
    /// decides how to surface that (the gateway taxonomy has a dedicated
    /// unsupported-order-type kind).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "market" => Some(OrderType::Market),
            "limit" => Some(OrderType::Limit),
            "stop_limit" => Some(OrderType::StopLimit),
            "oco" => Some(OrderType::Oco),
            _ => None,
        }
    }

    /// Human-readable name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopLimit => "stop_limit",
            OrderType::Oco => "oco",
        }
    }
}

/// Terminal status of an order record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    /// Accepted and filled by the venue
    Filled,
    /// Rejected by the venue at submission time
    Rejected,
    /// Produced by the local simulation engine
    Simulated,
}

// =============================================================================
// Order Request
// =============================================================================

/// A generic order description, before translation to venue parameters.
///
/// Price and stop price are optional at this level; the translator enforces
/// per-type presence rules before anything is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    /// Limit price (required for limit and the limit leg of OCO)
    pub price: Option<Price>,
    /// Stop trigger price (required for stop-limit and the stop leg of OCO)
    pub stop_price: Option<Price>,
}

impl OrderRequest {
    /// Create a market order request
    pub fn market(symbol: Symbol, side: OrderSide, quantity: Quantity) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
        }
    }

    /// Create a limit order request
    pub fn limit(symbol: Symbol, side: OrderSide, quantity: Quantity, price: Price) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            stop_price: None,
        }
    }

    /// Create a stop-limit order request
    pub fn stop_limit(
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        stop_price: Price,
    ) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::StopLimit,
            quantity,
            price: None,
            stop_price: Some(stop_price),
        }
    }

    /// Create a one-cancels-other order request
    pub fn oco(
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
        stop_price: Price,
    ) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Oco,
            quantity,
            price: Some(price),
            stop_price: Some(stop_price),
        }
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// Kind of an OCO child leg
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OcoLegKind {
    /// Limit leg (take-profit side)
    Limit,
    /// Stop-market leg (stop-loss side)
    StopMarket,
}

/// One child leg of a synthesized OCO order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLeg {
    pub order_id: String,
    pub kind: OcoLegKind,
    /// Limit price for the limit leg, stop trigger price for the stop leg
    pub price: Price,
    pub quantity: Quantity,
    pub status: OrderStatus,
}

/// The two legs of a synthesized OCO order.
///
/// The legs are logically linked but submitted as two unrelated orders;
/// filling one does NOT cancel the other. The venue has no native OCO
/// primitive for this instrument class and the gateway does not enforce
/// the linkage either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcoLegs {
    pub limit_leg: OrderLeg,
    pub stop_leg: OrderLeg,
}

/// Terminal record of one submission attempt.
///
/// `order_id` is venue-assigned for live fills and locally generated
/// otherwise; unique per record within the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: String,
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Option<Price>,
    pub stop_price: Option<Price>,
    pub status: OrderStatus,
    /// Present only for OCO orders
    pub legs: Option<OcoLegs>,
    pub placed_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Check if this record came from the simulation engine
    pub fn is_simulated(&self) -> bool {
        matches!(self.status, OrderStatus::Simulated)
    }

    /// Check if this record is a venue fill
    pub fn is_filled(&self) -> bool {
        matches!(self.status, OrderStatus::Filled)
    }
}

// =============================================================================
// Tests
// =============================================================================
