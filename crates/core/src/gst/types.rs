//! GST rate and tax amount types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GST rate triple, in percent.
///
/// CGST and SGST apply to intra-state sales, IGST to inter-state sales.
/// The default of 9/9/0 matches the standard brick HSN rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstRates {
    /// Central GST rate (percent).
    pub cgst: Decimal,
    /// State GST rate (percent).
    pub sgst: Decimal,
    /// Integrated GST rate (percent).
    pub igst: Decimal,
}

impl GstRates {
    /// Creates a new rate triple.
    #[must_use]
    pub const fn new(cgst: Decimal, sgst: Decimal, igst: Decimal) -> Self {
        Self { cgst, sgst, igst }
    }

    /// Rate triple with every component zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: Decimal::ZERO,
        }
    }
}

impl Default for GstRates {
    fn default() -> Self {
        Self {
            cgst: Decimal::from_i128_with_scale(9, 0),
            sgst: Decimal::from_i128_with_scale(9, 0),
            igst: Decimal::ZERO,
        }
    }
}

/// Computed tax amounts for a taxable base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Central GST amount.
    pub cgst_amount: Decimal,
    /// State GST amount.
    pub sgst_amount: Decimal,
    /// Integrated GST amount.
    pub igst_amount: Decimal,
}

impl TaxBreakdown {
    /// Breakdown with every component zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
        }
    }

    /// Sum of all tax components.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cgst_amount + self.sgst_amount + self.igst_amount
    }
}
