//! Invoice financial types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The full financial position of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all sale line amounts.
    pub subtotal: Decimal,
    /// CGST component on the subtotal.
    pub cgst_amount: Decimal,
    /// SGST component on the subtotal.
    pub sgst_amount: Decimal,
    /// IGST component on the subtotal.
    pub igst_amount: Decimal,
    /// Subtotal plus all tax components.
    pub total_amount: Decimal,
    /// Amount received so far.
    pub paid_amount: Decimal,
    /// Always `total_amount - paid_amount`.
    pub pending_amount: Decimal,
}

impl InvoiceTotals {
    /// An invoice with every financial field at zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
        }
    }
}
