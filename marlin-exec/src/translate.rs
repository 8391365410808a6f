//! Order translation: generic requests to venue order specifications.
//!
//! Pure function of its input; nothing here touches the network. The
//! per-type field rules are enforced HERE, before dispatch, so the gateway
//! never sends a half-formed order to any execution surface.
//!
//! # Venue mapping
//!
//! - Market → MARKET
//! - Limit → LIMIT, time-in-force GTC
//! - StopLimit → STOP_MARKET (the venue has no native stop-limit primitive
//!   for this instrument class; the stop triggers a market execution), GTC
//! - Oco → two independent leg specs (LIMIT + STOP_MARKET). The venue has
//!   no native one-cancels-other either; the legs are logically linked but
//!   submitted as unrelated orders, and filling one does NOT cancel the
//!   other.

use serde::{Deserialize, Serialize};

use marlin_domain::{OrderRequest, OrderSide, OrderType, Price, Quantity, Symbol};

use crate::error::ExecError;

// =============================================================================
// Venue Order Specification
// =============================================================================

/// Time-in-force accepted by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Active until explicitly filled or cancelled
    GoodTillCancelled,
}

impl TimeInForce {
    /// Venue wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GoodTillCancelled => "GTC",
        }
    }
}

/// The venue-specific shape of a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueOrderKind {
    /// Immediate execution at market price
    Market,
    /// Execution at the given price or better
    Limit {
        /// Limit price
        price: Price,
    },
    /// Market execution once the stop price is touched
    StopMarket {
        /// Stop trigger price
        stop_price: Price,
    },
}

/// One fully-specified venue order, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueOrderSpec {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub kind: VenueOrderKind,
    pub quantity: Quantity,
    pub time_in_force: Option<TimeInForce>,
}

/// Result of translating one request: a single spec, or the two
/// synthesized legs of an OCO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// One venue order
    Single(VenueOrderSpec),
    /// Two logically linked legs, submitted independently
    OcoPair {
        /// Limit leg (take-profit side)
        limit_leg: VenueOrderSpec,
        /// Stop-market leg (stop-loss side)
        stop_leg: VenueOrderSpec,
    },
}

// =============================================================================
// Translation
// =============================================================================

/// Translate a generic order request into venue order specification(s).
///
/// # Errors
///
/// Returns `ExecError::InvalidRequest` naming the missing field when the
/// request lacks a price/stop price its order type requires. Quantity and
/// price positivity are already guaranteed by the domain newtypes.
pub fn translate(request: &OrderRequest) -> Result<Translation, ExecError> {
    match request.order_type {
        OrderType::Market => Ok(Translation::Single(VenueOrderSpec {
            symbol: request.symbol.clone(),
            side: request.side,
            kind: VenueOrderKind::Market,
            quantity: request.quantity,
            // Prices are ignored for market orders even if present
            time_in_force: None,
        })),

        OrderType::Limit => {
            let price = require(request, "price", request.price)?;
            Ok(Translation::Single(VenueOrderSpec {
                symbol: request.symbol.clone(),
                side: request.side,
                kind: VenueOrderKind::Limit { price },
                quantity: request.quantity,
                time_in_force: Some(TimeInForce::GoodTillCancelled),
            }))
        },

        OrderType::StopLimit => {
            let stop_price = require(request, "stop_price", request.stop_price)?;
            Ok(Translation::Single(VenueOrderSpec {
                symbol: request.symbol.clone(),
                side: request.side,
                kind: VenueOrderKind::StopMarket { stop_price },
                quantity: request.quantity,
                time_in_force: Some(TimeInForce::GoodTillCancelled),
            }))
        },

        OrderType::Oco => {
            let price = require(request, "price", request.price)?;
            let stop_price = require(request, "stop_price", request.stop_price)?;

            let limit_leg = VenueOrderSpec {
                symbol: request.symbol.clone(),
                side: request.side,
                kind: VenueOrderKind::Limit { price },
                quantity: request.quantity,
                time_in_force: Some(TimeInForce::GoodTillCancelled),
            };
            let stop_leg = VenueOrderSpec {
                symbol: request.symbol.clone(),
                side: request.side,
                kind: VenueOrderKind::StopMarket { stop_price },
                quantity: request.quantity,
                time_in_force: Some(TimeInForce::GoodTillCancelled),
            };

            Ok(Translation::OcoPair { limit_leg, stop_leg })
        },
    }
}

fn require(
    request: &OrderRequest,
    field: &str,
    value: Option<Price>,
) -> Result<Price, ExecError> {
    value.ok_or_else(|| ExecError::missing_field(request.order_type.as_str(), field))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btcusdt() -> Symbol {
        Symbol::from_pair("BTCUSDT").unwrap()
    }

    fn qty(value: rust_decimal::Decimal) -> Quantity {
        Quantity::new(value).unwrap()
    }

    fn price(value: rust_decimal::Decimal) -> Price {
        Price::new(value).unwrap()
    }

    #[test]
    fn test_market_translation_carries_no_prices() {
        let request = OrderRequest::market(btcusdt(), OrderSide::Buy, qty(dec!(0.01)));

        let translation = translate(&request).unwrap();

        match translation {
            Translation::Single(spec) => {
                assert_eq!(spec.kind, VenueOrderKind::Market);
                assert_eq!(spec.quantity, qty(dec!(0.01)));
                assert!(spec.time_in_force.is_none());
            },
            _ => panic!("Expected single spec"),
        }
    }

    #[test]
    fn test_market_translation_ignores_stray_prices() {
        // Prices on a market request are ignored, not rejected
        let mut request = OrderRequest::market(btcusdt(), OrderSide::Sell, qty(dec!(0.5)));
        request.price = Some(price(dec!(30000)));
        request.stop_price = Some(price(dec!(29000)));

        let translation = translate(&request).unwrap();

        match translation {
            Translation::Single(spec) => assert_eq!(spec.kind, VenueOrderKind::Market),
            _ => panic!("Expected single spec"),
        }
    }

    #[test]
    fn test_limit_translation_is_gtc() {
        let request =
            OrderRequest::limit(btcusdt(), OrderSide::Buy, qty(dec!(1.0)), price(dec!(30000)));

        let translation = translate(&request).unwrap();

        match translation {
            Translation::Single(spec) => {
                assert_eq!(spec.kind, VenueOrderKind::Limit { price: price(dec!(30000)) });
                assert_eq!(spec.time_in_force, Some(TimeInForce::GoodTillCancelled));
            },
            _ => panic!("Expected single spec"),
        }
    }

    #[test]
    fn test_limit_without_price_fails_naming_field() {
        let mut request =
            OrderRequest::limit(btcusdt(), OrderSide::Sell, qty(dec!(1.0)), price(dec!(30000)));
        request.price = None;

        let err = translate(&request).unwrap_err();

        assert!(matches!(err, ExecError::InvalidRequest(_)));
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_stop_limit_maps_to_stop_market() {
        let request = OrderRequest::stop_limit(
            btcusdt(),
            OrderSide::Sell,
            qty(dec!(0.2)),
            price(dec!(29000)),
        );

        let translation = translate(&request).unwrap();

        match translation {
            Translation::Single(spec) => {
                assert_eq!(
                    spec.kind,
                    VenueOrderKind::StopMarket { stop_price: price(dec!(29000)) }
                );
                assert_eq!(spec.time_in_force, Some(TimeInForce::GoodTillCancelled));
            },
            _ => panic!("Expected single spec"),
        }
    }

    #[test]
    fn test_stop_limit_without_stop_price_fails() {
        let mut request = OrderRequest::stop_limit(
            btcusdt(),
            OrderSide::Sell,
            qty(dec!(0.2)),
            price(dec!(29000)),
        );
        request.stop_price = None;

        let err = translate(&request).unwrap_err();

        assert!(matches!(err, ExecError::InvalidRequest(_)));
        assert!(err.to_string().contains("stop_price"));
    }

    #[test]
    fn test_oco_translates_to_two_legs() {
        let request = OrderRequest::oco(
            btcusdt(),
            OrderSide::Buy,
            qty(dec!(0.5)),
            price(dec!(30000)),
            price(dec!(29000)),
        );

        let translation = translate(&request).unwrap();

        match translation {
            Translation::OcoPair { limit_leg, stop_leg } => {
                assert_eq!(limit_leg.kind, VenueOrderKind::Limit { price: price(dec!(30000)) });
                assert_eq!(
                    stop_leg.kind,
                    VenueOrderKind::StopMarket { stop_price: price(dec!(29000)) }
                );
                // Both legs carry the full request quantity
                assert_eq!(limit_leg.quantity, qty(dec!(0.5)));
                assert_eq!(stop_leg.quantity, qty(dec!(0.5)));
            },
            _ => panic!("Expected OCO pair"),
        }
    }

    #[test]
    fn test_oco_missing_either_price_fails() {
        let mut no_limit = OrderRequest::oco(
            btcusdt(),
            OrderSide::Buy,
            qty(dec!(0.5)),
            price(dec!(30000)),
            price(dec!(29000)),
        );
        no_limit.price = None;
        assert!(matches!(translate(&no_limit), Err(ExecError::InvalidRequest(_))));

        let mut no_stop = OrderRequest::oco(
            btcusdt(),
            OrderSide::Buy,
            qty(dec!(0.5)),
            price(dec!(30000)),
            price(dec!(29000)),
        );
        no_stop.stop_price = None;
        assert!(matches!(translate(&no_stop), Err(ExecError::InvalidRequest(_))));
    }
}
