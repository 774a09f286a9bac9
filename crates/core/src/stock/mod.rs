//! Production batch stock arithmetic.
//!
//! A production batch carries an immutable original quantity and a
//! depleting `remaining_quantity`. This module owns the pure arithmetic:
//! availability checks, bounded delta application, and the marginal delta
//! plan used when an existing sale is edited. The database layer executes
//! the resulting deltas inside the same transaction as the sale rows they
//! accompany.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::StockError;
pub use service::StockLedger;
pub use types::{BatchStock, StockDelta};
