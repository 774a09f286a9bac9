//! GST tax calculation.
//!
//! Computes CGST/SGST/IGST amounts from a taxable base and consolidated
//! invoice totals from a set of line amounts. All arithmetic uses
//! `rust_decimal::Decimal`; no floating point is involved anywhere.

pub mod service;
pub mod types;

pub use service::TaxCalculator;
pub use types::{GstRates, TaxBreakdown};
