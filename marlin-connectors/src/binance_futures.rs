//! Binance USDⓈ-M Futures REST client.
//!
//! Implements the gateway's transport port:
//! - Account status query (used only by the connectivity probe)
//! - Order creation
//! - Authentication via HMAC SHA256 signatures
//!
//! # Authentication
//!
//! Binance uses API key + secret with HMAC SHA256 signatures.
//! All signed requests require:
//! - `X-MBX-APIKEY` header
//! - `signature` query parameter (HMAC SHA256 of query string)
//! - `timestamp` query parameter

use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use marlin_domain::ApiCredentials;
use marlin_exec::ports::{AccountStatus, ExchangePort, TransportError, VenueAck};
use marlin_exec::translate::{VenueOrderKind, VenueOrderSpec};

use async_trait::async_trait;

// =============================================================================
// Constants
// =============================================================================

/// Binance USDⓈ-M futures REST base URL
const BINANCE_FUTURES_URL: &str = "https://fapi.binance.com";

/// Binance futures testnet base URL
const BINANCE_FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Binance Futures Client
// =============================================================================

/// Binance futures REST client implementing the transport port.
pub struct BinanceFuturesClient {
    /// HTTP client
    client: Client,
    /// API key + signing secret
    credentials: ApiCredentials,
    /// Use testnet base URL
    testnet: bool,
}

impl BinanceFuturesClient {
    /// Create a client against production.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            testnet: false,
        }
    }

    /// Create a client against the futures testnet.
    pub fn testnet(credentials: ApiCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            testnet: true,
        }
    }

    /// Get the base URL for API requests.
    fn base_url(&self) -> &'static str {
        if self.testnet {
            BINANCE_FUTURES_TESTNET_URL
        } else {
            BINANCE_FUTURES_URL
        }
    }

    /// Build query string with signature for signed requests.
    ///
    /// Binance requires:
    /// 1. All parameters in query string
    /// 2. HMAC SHA256 signature of query string
    /// 3. signature and timestamp as query parameters
    fn build_signed_query(
        &self,
        mut params: Vec<(&str, String)>,
    ) -> Result<String, TransportError> {
        // Add timestamp
        let timestamp = Utc::now().timestamp_millis().to_string();
        params.push(("timestamp", timestamp));

        // Sort parameters (required by Binance)
        params.sort_by(|a, b| a.0.cmp(b.0));

        // Build query string
        let query_string: String = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        // Create signature
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .map_err(|e| TransportError::Auth(format!("HMAC error: {}", e)))?;

        mac.update(query_string.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        // Add signature to query string
        Ok(format!("{}&signature={}", query_string, signature))
    }

    /// Send a GET request to a signed endpoint.
    async fn get_signed(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<String, TransportError> {
        let query = self.build_signed_query(params)?;
        let url = format!("{}{}?{}", self.base_url(), endpoint, query);

        let response = timeout(
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
            self.client
                .get(&url)
                .header("X-MBX-APIKEY", &self.credentials.api_key)
                .send(),
        )
        .await
        .map_err(|_| TransportError::Timeout)?
        .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        Self::read_body(response).await
    }

    /// Send a POST request to a signed endpoint.
    async fn post_signed(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<String, TransportError> {
        let query = self.build_signed_query(params)?;
        let url = format!("{}{}?{}", self.base_url(), endpoint, query);

        let response = timeout(
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
            self.client
                .post(&url)
                .header("X-MBX-APIKEY", &self.credentials.api_key)
                .send(),
        )
        .await
        .map_err(|_| TransportError::Timeout)?
        .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        Self::read_body(response).await
    }

    /// Turn an HTTP response into a body or a transport sub-cause.
    async fn read_body(response: reqwest::Response) -> Result<String, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        if !status.is_success() {
            // Binance error bodies carry {code, msg}
            if let Ok(err) = serde_json::from_str::<BinanceErrorResponse>(&body) {
                return Err(TransportError::Api { code: err.code, msg: err.msg });
            }
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(TransportError::Auth(format!("HTTP {}: {}", status, body)));
            }
            return Err(TransportError::Unreachable(format!("HTTP {}: {}", status, body)));
        }

        Ok(body)
    }
}

// =============================================================================
// Order parameter mapping
// =============================================================================

/// Map a venue order spec to Binance futures order parameters.
///
/// `timeInForce` is sent whenever the translator fixed one; the venue
/// ignores it for trigger orders that execute at market.
fn order_params(spec: &VenueOrderSpec) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", spec.symbol.as_pair()),
        ("side", spec.side.as_str().to_string()),
        ("quantity", spec.quantity.as_decimal().to_string()),
    ];

    match &spec.kind {
        VenueOrderKind::Market => {
            params.push(("type", "MARKET".to_string()));
        },
        VenueOrderKind::Limit { price } => {
            params.push(("type", "LIMIT".to_string()));
            params.push(("price", price.as_decimal().to_string()));
        },
        VenueOrderKind::StopMarket { stop_price } => {
            params.push(("type", "STOP_MARKET".to_string()));
            params.push(("stopPrice", stop_price.as_decimal().to_string()));
        },
    }

    if let Some(tif) = spec.time_in_force {
        params.push(("timeInForce", tif.as_str().to_string()));
    }

    params
}

// =============================================================================
// Transport Port
// =============================================================================

#[async_trait]
impl ExchangePort for BinanceFuturesClient {
    /// Query futures account status.
    ///
    /// # Endpoint
    ///
    /// `GET /fapi/v2/account`
    async fn account_status(&self) -> Result<AccountStatus, TransportError> {
        let body = self.get_signed("/fapi/v2/account", vec![]).await?;

        let account: FuturesAccount = serde_json::from_str(&body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        Ok(AccountStatus { can_trade: account.can_trade })
    }

    /// Create a futures order.
    ///
    /// # Endpoint
    ///
    /// `POST /fapi/v1/order`
    async fn submit_order(&self, spec: &VenueOrderSpec) -> Result<VenueAck, TransportError> {
        let body = self.post_signed("/fapi/v1/order", order_params(spec)).await?;

        let response: FuturesOrderResponse = serde_json::from_str(&body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        debug!(
            order_id = response.order_id,
            status = %response.status,
            executed_qty = %response.executed_qty,
            "Venue acknowledged order"
        );

        Ok(VenueAck {
            order_id: response.order_id.to_string(),
            status: response.status,
            executed_qty: Some(response.executed_qty),
        })
    }
}

// =============================================================================
// Binance Types (from API responses)
// =============================================================================

/// Binance error response.
#[derive(Debug, Deserialize)]
struct BinanceErrorResponse {
    code: i64,
    msg: String,
}

/// Futures account information (only the fields the probe needs).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuturesAccount {
    /// Whether the account may currently trade
    can_trade: bool,
}

/// Futures order creation response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuturesOrderResponse {
    /// Venue-assigned order ID
    order_id: u64,
    /// Order status (e.g. "NEW", "FILLED")
    status: String,
    /// Executed quantity so far
    executed_qty: Decimal,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use marlin_domain::{OrderSide, Price, Quantity, Symbol};
    use marlin_exec::translate::TimeInForce;
    use rust_decimal_macros::dec;

    fn client() -> BinanceFuturesClient {
        BinanceFuturesClient::new(ApiCredentials::from_parts("test_key", "test_secret").unwrap())
    }

    fn spec(kind: VenueOrderKind, tif: Option<TimeInForce>) -> VenueOrderSpec {
        VenueOrderSpec {
            symbol: Symbol::from_pair("BTCUSDT").unwrap(),
            side: OrderSide::Buy,
            kind,
            quantity: Quantity::new(dec!(0.01)).unwrap(),
            time_in_force: tif,
        }
    }

    #[test]
    fn test_build_signed_query() {
        let query = client()
            .build_signed_query(vec![("symbol", "BTCUSDT".to_string())])
            .unwrap();

        // Query should contain timestamp and signature
        assert!(query.contains("timestamp="));
        assert!(query.contains("signature="));
        assert!(query.contains("symbol=BTCUSDT"));
    }

    #[test]
    fn test_build_signed_query_sorts_params() {
        // Add params in reverse alphabetical order
        let query = client()
            .build_signed_query(vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "SELL".to_string()),
            ])
            .unwrap();

        let side_idx = query.find("side=").unwrap();
        let symbol_idx = query.find("symbol=").unwrap();
        assert!(side_idx < symbol_idx);
    }

    #[test]
    fn test_market_order_params() {
        let params = order_params(&spec(VenueOrderKind::Market, None));

        assert!(params.contains(&("type", "MARKET".to_string())));
        assert!(params.contains(&("symbol", "BTCUSDT".to_string())));
        assert!(params.contains(&("side", "BUY".to_string())));
        assert!(params.contains(&("quantity", "0.01".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "price" || *k == "stopPrice"));
        assert!(!params.iter().any(|(k, _)| *k == "timeInForce"));
    }

    #[test]
    fn test_limit_order_params_carry_price_and_gtc() {
        let params = order_params(&spec(
            VenueOrderKind::Limit { price: Price::new(dec!(30000)).unwrap() },
            Some(TimeInForce::GoodTillCancelled),
        ));

        assert!(params.contains(&("type", "LIMIT".to_string())));
        assert!(params.contains(&("price", "30000".to_string())));
        assert!(params.contains(&("timeInForce", "GTC".to_string())));
    }

    #[test]
    fn test_stop_market_order_params_carry_stop_price() {
        let params = order_params(&spec(
            VenueOrderKind::StopMarket { stop_price: Price::new(dec!(29000)).unwrap() },
            Some(TimeInForce::GoodTillCancelled),
        ));

        assert!(params.contains(&("type", "STOP_MARKET".to_string())));
        assert!(params.contains(&("stopPrice", "29000".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "price"));
    }

    #[test]
    fn test_testnet_base_url() {
        assert_eq!(
            BinanceFuturesClient::testnet(ApiCredentials::new("k", "s")).base_url(),
            "https://testnet.binancefuture.com"
        );
        assert_eq!(
            BinanceFuturesClient::new(ApiCredentials::new("k", "s")).base_url(),
            "https://fapi.binance.com"
        );
    }

    #[test]
    fn test_error_body_parses() {
        let err: BinanceErrorResponse =
            serde_json::from_str(r#"{"code":-2019,"msg":"Margin is insufficient."}"#).unwrap();
        assert_eq!(err.code, -2019);
        assert_eq!(err.msg, "Margin is insufficient.");
    }

    #[test]
    fn test_order_response_parses() {
        let body = r#"{
            "orderId": 4021,
            "symbol": "BTCUSDT",
            "status": "FILLED",
            "executedQty": "0.010",
            "side": "BUY",
            "type": "MARKET"
        }"#;
        let response: FuturesOrderResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.order_id, 4021);
        assert_eq!(response.status, "FILLED");
        assert_eq!(response.executed_qty, dec!(0.010));
    }
}
