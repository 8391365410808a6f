//! Marlin Connectors
//!
//! Venue adapters implementing the execution layer's transport port.
//! Currently one venue: Binance USDⓈ-M futures (production and testnet).

#![warn(clippy::all)]

pub mod binance_futures;

pub use binance_futures::BinanceFuturesClient;

use marlin_domain::ApiCredentials;
use marlin_exec::Gateway;

/// Construct a gateway over Binance futures, committing the execution mode.
///
/// `None` credentials commit to simulation without any network call.
/// Otherwise the gateway probes the account endpoint once; a probe failure
/// also commits to simulation for the session.
pub async fn connect(
    credentials: Option<ApiCredentials>,
    testnet: bool,
) -> Gateway<BinanceFuturesClient> {
    let transport = credentials.map(|creds| {
        if testnet {
            BinanceFuturesClient::testnet(creds)
        } else {
            BinanceFuturesClient::new(creds)
        }
    });

    Gateway::connect(transport).await
}
