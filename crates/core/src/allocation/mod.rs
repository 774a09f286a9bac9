//! Sale line allocation across production batches.
//!
//! Turns one line request into the concrete sale rows it implies plus the
//! stock decrements they require. Allocation is explicit: the caller
//! supplies the batch split, there is no automatic picking policy.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::AllocationError;
pub use service::SaleLineAllocator;
pub use types::{BatchSelection, LineItem, LineRequest, PlannedSale, ProductInfo};
