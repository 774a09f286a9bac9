//! Stock error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by stock arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// Requested more than the batch has left.
    ///
    /// Always names the offending batch and the quantity actually
    /// available so callers can surface an actionable message.
    #[error("insufficient stock in batch {batch_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Offending batch.
        batch_id: Uuid,
        /// Quantity still available.
        available: i64,
        /// Quantity that was requested.
        requested: i64,
    },

    /// A delta would push remaining quantity below zero or above the
    /// batch's original quantity.
    ///
    /// This indicates a caller bug (a double-applied adjustment), never a
    /// user mistake, so it must fail loudly rather than silently clamp.
    #[error(
        "stock invariant violated for batch {batch_id}: remaining {remaining} + delta {delta} \
         outside [0, {quantity}]"
    )]
    InvariantViolation {
        /// Affected batch.
        batch_id: Uuid,
        /// Remaining quantity before the delta.
        remaining: i64,
        /// The offending delta.
        delta: i64,
        /// Original batch quantity (upper bound).
        quantity: i64,
    },
}
