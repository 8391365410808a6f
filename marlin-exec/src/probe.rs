//! Startup connectivity probe.
//!
//! Runs exactly once, during gateway construction, to decide the committed
//! execution mode. Performs at most one call against the transport's
//! account-status operation; the outcome is never fatal to the process.

use tracing::{info, warn};

use crate::error::ExecError;
use crate::ports::ExchangePort;

/// Outcome of the one-shot connectivity probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Whether the transport is usable for live execution
    pub ok: bool,
    /// Classified failure, when one occurred.
    ///
    /// `None` with `ok == false` means no credentials were configured:
    /// the expected simulation path, not a failure.
    pub detail: Option<ExecError>,
}

impl ProbeResult {
    /// No credentials configured; simulation is the expected path.
    pub fn no_credentials() -> Self {
        Self { ok: false, detail: None }
    }

    /// Credentials confirmed usable.
    pub fn connected() -> Self {
        Self { ok: true, detail: None }
    }

    /// Probe call failed with a classified kind.
    pub fn failed(detail: ExecError) -> Self {
        Self { ok: false, detail: Some(detail) }
    }
}

/// Probe the transport once to confirm the configured credentials work.
///
/// `None` means no credentials were configured, which short-circuits to
/// the simulation path without any network call.
pub async fn probe<T: ExchangePort>(transport: Option<&T>) -> ProbeResult {
    let Some(transport) = transport else {
        info!("No credentials configured, gateway will simulate orders locally");
        return ProbeResult::no_credentials();
    };

    match transport.account_status().await {
        Ok(status) => {
            if !status.can_trade {
                warn!("Account is not currently permitted to trade");
            }
            info!("Connected to venue, credentials confirmed");
            ProbeResult::connected()
        },
        Err(failure) => {
            let kind = ExecError::classify(failure);
            warn!(error = %kind, "Connectivity probe failed, falling back to simulation");
            ProbeResult::failed(kind)
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
