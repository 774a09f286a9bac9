//! Invoice financial math.
//!
//! Totals are always recomputed from the current sale rows, never
//! incremented, so repeated partial updates cannot double-count.

pub mod service;
pub mod types;

pub use service::InvoiceMath;
pub use types::InvoiceTotals;
