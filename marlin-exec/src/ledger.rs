//! Append-only order ledger.
//!
//! In-memory record of every order attempted during the session, in call
//! order. No deletion or mutation operation exists; reads are snapshots
//! and never consume or reorder anything.

use std::sync::RwLock;

use marlin_domain::OrderRecord;

/// Append-only, insertion-ordered sequence of order records.
pub struct OrderLedger {
    records: RwLock<Vec<OrderRecord>>,
}

impl OrderLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }

    /// Append a terminal record.
    pub fn append(&self, record: OrderRecord) {
        self.records.write().unwrap().push(record);
    }

    /// Snapshot of everything recorded so far, in insertion order.
    ///
    /// Re-reading returns an equal sequence as long as nothing was
    /// appended in between.
    pub fn all(&self) -> Vec<OrderRecord> {
        self.records.read().unwrap().clone()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
