//! Invoice totals recomputation.

use rust_decimal::Decimal;

use super::types::InvoiceTotals;
use crate::gst::{GstRates, TaxCalculator};

/// Recomputes invoice financials from sale line amounts.
pub struct InvoiceMath;

impl InvoiceMath {
    /// Recomputes the full financial position from the current sale
    /// amounts. The subtotal is the sum over all rows, taxes are split
    /// on that subtotal, and `pending = total - paid`.
    #[must_use]
    pub fn recompute(
        sale_amounts: &[Decimal],
        rates: GstRates,
        is_gst: bool,
        paid_amount: Decimal,
    ) -> InvoiceTotals {
        let subtotal: Decimal = sale_amounts.iter().copied().sum();
        let tax = TaxCalculator::split_tax(subtotal, rates, is_gst);
        let total_amount = TaxCalculator::invoice_total(subtotal, &tax);

        InvoiceTotals {
            subtotal,
            cgst_amount: tax.cgst_amount,
            sgst_amount: tax.sgst_amount,
            igst_amount: tax.igst_amount,
            total_amount,
            paid_amount,
            pending_amount: total_amount - paid_amount,
        }
    }

    /// The position after all sales are removed but the invoice is kept:
    /// every financial field resets to zero, including paid.
    #[must_use]
    pub const fn cleared() -> InvoiceTotals {
        InvoiceTotals::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_sale_without_gst() {
        // 300 units at rate 10, GST off, nothing paid
        let totals = InvoiceMath::recompute(
            &[dec!(3000)],
            GstRates::default(),
            false,
            Decimal::ZERO,
        );

        assert_eq!(totals.subtotal, dec!(3000));
        assert_eq!(totals.cgst_amount, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec!(3000));
        assert_eq!(totals.pending_amount, dec!(3000));
    }

    #[test]
    fn test_requantified_sale_recomputes_total() {
        // Quantity edited from 300 to 500 at rate 10
        let totals = InvoiceMath::recompute(
            &[dec!(5000)],
            GstRates::default(),
            false,
            Decimal::ZERO,
        );

        assert_eq!(totals.total_amount, dec!(5000));
        assert_eq!(totals.pending_amount, dec!(5000));
    }

    #[test]
    fn test_mixed_lines_with_gst() {
        // Service 2x100 plus physical 50x5 at 9/9 GST
        let totals = InvoiceMath::recompute(
            &[dec!(200), dec!(250)],
            GstRates::default(),
            true,
            Decimal::ZERO,
        );

        assert_eq!(totals.subtotal, dec!(450));
        assert_eq!(totals.cgst_amount, dec!(40.5));
        assert_eq!(totals.sgst_amount, dec!(40.5));
        assert_eq!(totals.igst_amount, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec!(531));
    }

    #[test]
    fn test_pending_reflects_paid_amount() {
        let totals = InvoiceMath::recompute(
            &[dec!(1000)],
            GstRates::default(),
            true,
            dec!(500),
        );

        assert_eq!(totals.total_amount, dec!(1180));
        assert_eq!(totals.pending_amount, dec!(680));
    }

    #[test]
    fn test_no_sales_yields_zero_totals() {
        let totals =
            InvoiceMath::recompute(&[], GstRates::default(), true, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.pending_amount, Decimal::ZERO);
    }

    #[test]
    fn test_cleared_is_all_zero() {
        assert_eq!(InvoiceMath::cleared(), InvoiceTotals::zero());
    }

    #[test]
    fn test_total_consistency_invariant() {
        let totals = InvoiceMath::recompute(
            &[dec!(123.45), dec!(678.90), dec!(0.65)],
            GstRates::default(),
            true,
            dec!(100),
        );

        assert_eq!(
            totals.total_amount,
            totals.subtotal + totals.cgst_amount + totals.sgst_amount + totals.igst_amount
        );
        assert_eq!(totals.pending_amount, totals.total_amount - totals.paid_amount);
    }
}
