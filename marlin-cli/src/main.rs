//! Marlin operator CLI
//!
//! One-shot order placement against the execution gateway. The gateway
//! commits its execution mode at startup: with usable credentials it
//! submits to Binance futures, otherwise it simulates locally.
//!
//! # Usage
//!
//! ```bash
//! # Simulated market order (no credentials configured)
//! cargo run -p marlin-cli -- --symbol BTCUSDT --side buy --type market --quantity 0.01
//!
//! # Limit order against the futures testnet
//! BINANCE_API_KEY=... BINANCE_API_SECRET=... \
//!     cargo run -p marlin-cli -- --symbol BTCUSDT --side sell --type limit \
//!     --quantity 0.01 --price 70000
//! ```
//!
//! # Environment Variables
//!
//! - `BINANCE_API_KEY` / `BINANCE_API_SECRET`: venue credentials (optional;
//!   leave unset to simulate)
//! - `MARLIN_TESTNET`: use the futures testnet (default: true)
//! - `RUST_LOG`: tracing filter (e.g. `marlin=debug`)

mod config;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use marlin_domain::{OrderRequest, OrderSide, OrderType, Price, Quantity, Symbol};
use marlin_exec::ExecError;

/// Order-execution gateway for Binance futures with local simulation fallback.
#[derive(Debug, Parser)]
#[command(name = "marlin", version)]
struct Args {
    /// Trading symbol (e.g. BTCUSDT)
    #[arg(long)]
    symbol: String,

    /// Order side: buy or sell
    #[arg(long)]
    side: String,

    /// Order type: market, limit, stop_limit, or oco
    #[arg(long = "type")]
    order_type: String,

    /// Order quantity (e.g. 0.01)
    #[arg(long)]
    quantity: Decimal,

    /// Limit price (required for limit and oco)
    #[arg(long)]
    price: Option<Decimal>,

    /// Stop trigger price (required for stop_limit and oco)
    #[arg(long)]
    stop_price: Option<Decimal>,
}

/// Build a typed order request from operator input.
///
/// This is where the unsupported-order-type kind is produced: the domain
/// order type enum is closed, so out-of-range types can only arrive as
/// text at this boundary.
fn build_request(args: &Args) -> Result<OrderRequest, ExecError> {
    let order_type = OrderType::parse(&args.order_type)
        .ok_or_else(|| ExecError::UnsupportedOrderType(args.order_type.clone()))?;

    let symbol = Symbol::from_pair(&args.symbol)
        .map_err(|e| ExecError::InvalidRequest(e.to_string()))?;
    let side =
        OrderSide::parse(&args.side).map_err(|e| ExecError::InvalidRequest(e.to_string()))?;
    let quantity =
        Quantity::new(args.quantity).map_err(|e| ExecError::InvalidRequest(e.to_string()))?;

    let price = args
        .price
        .map(Price::new)
        .transpose()
        .map_err(|e| ExecError::InvalidRequest(e.to_string()))?;
    let stop_price = args
        .stop_price
        .map(Price::new)
        .transpose()
        .map_err(|e| ExecError::InvalidRequest(e.to_string()))?;

    Ok(OrderRequest { symbol, side, order_type, quantity, price, stop_price })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("marlin=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        testnet = config.testnet,
        credentials = config.credentials.is_some(),
        "Marlin gateway"
    );

    let gateway = marlin_connectors::connect(config.credentials, config.testnet).await;
    info!(mode = %gateway.mode(), "Gateway ready");

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("Order rejected: {}", err);
            std::process::exit(2);
        },
    };

    match gateway.submit(&request).await {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        },
        Err(err) => {
            eprintln!("Order failed: {}", err);
        },
    }

    let history = gateway.history();
    info!(orders = history.len(), "Session order history");

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
