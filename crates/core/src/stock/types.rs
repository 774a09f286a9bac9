//! Stock domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of a production batch's stock position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStock {
    /// Batch ID.
    pub id: Uuid,
    /// Original quantity, immutable after batch creation.
    pub quantity: i64,
    /// Remaining quantity available for sale.
    pub remaining_quantity: i64,
}

impl BatchStock {
    /// Creates a new snapshot.
    #[must_use]
    pub const fn new(id: Uuid, quantity: i64, remaining_quantity: i64) -> Self {
        Self {
            id,
            quantity,
            remaining_quantity,
        }
    }
}

/// A signed adjustment to a batch's remaining quantity.
///
/// Negative deltas consume stock (sale), positive deltas restore it
/// (return, edit, delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDelta {
    /// Batch to adjust.
    pub batch_id: Uuid,
    /// Signed quantity change applied to `remaining_quantity`.
    pub delta: i64,
}
