//! Allocation error types.

use thiserror::Error;
use uuid::Uuid;

use crate::stock::StockError;

/// Errors raised while planning a sale line allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Referenced product type does not exist.
    #[error("product type not found: {0}")]
    ProductNotFound(Uuid),

    /// Referenced production batch does not exist.
    #[error("production batch not found: {0}")]
    BatchNotFound(Uuid),

    /// A batch cannot cover its requested share (wraps the stock check).
    #[error(transparent)]
    Stock(#[from] StockError),
}
