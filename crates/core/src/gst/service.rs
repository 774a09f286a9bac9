//! Tax calculation service.
//!
//! Pure functions with no side effects. Rates are percentages; amounts
//! are computed as `base × rate / 100` with `Decimal` precision.

use rust_decimal::Decimal;

use super::types::{GstRates, TaxBreakdown};

/// Tax calculator for GST amounts and invoice totals.
pub struct TaxCalculator;

impl TaxCalculator {
    /// Splits a taxable base into CGST/SGST/IGST amounts.
    ///
    /// When `is_gst` is false all components are zero regardless of the
    /// supplied rates.
    #[must_use]
    pub fn split_tax(base: Decimal, rates: GstRates, is_gst: bool) -> TaxBreakdown {
        if !is_gst {
            return TaxBreakdown::zero();
        }

        let hundred = Decimal::ONE_HUNDRED;
        TaxBreakdown {
            cgst_amount: base * rates.cgst / hundred,
            sgst_amount: base * rates.sgst / hundred,
            igst_amount: base * rates.igst / hundred,
        }
    }

    /// Consolidated invoice total: subtotal plus all tax components.
    #[must_use]
    pub fn invoice_total(subtotal: Decimal, tax: &TaxBreakdown) -> Decimal {
        subtotal + tax.total()
    }

    /// Resolves the effective rates for an invoice line.
    ///
    /// An invoice-level rate, when present, overrides the product's own
    /// default rates. Per-line GST itemization is intentionally not
    /// supported: one effective rate triple applies to the whole invoice.
    #[must_use]
    pub fn effective_rates(invoice_rates: Option<GstRates>, product_rates: GstRates) -> GstRates {
        invoice_rates.unwrap_or(product_rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_tax_gst_off() {
        let tax = TaxCalculator::split_tax(dec!(1000), GstRates::default(), false);
        assert_eq!(tax, TaxBreakdown::zero());
    }

    #[test]
    fn test_split_tax_default_rates() {
        let tax = TaxCalculator::split_tax(dec!(1000), GstRates::default(), true);
        assert_eq!(tax.cgst_amount, dec!(90));
        assert_eq!(tax.sgst_amount, dec!(90));
        assert_eq!(tax.igst_amount, dec!(0));
    }

    #[test]
    fn test_split_tax_exact_to_the_cent() {
        // 450 at 9/9: each component is 40.5, total 531
        let tax = TaxCalculator::split_tax(dec!(450), GstRates::default(), true);
        assert_eq!(tax.cgst_amount, dec!(40.5));
        assert_eq!(tax.sgst_amount, dec!(40.5));
        assert_eq!(TaxCalculator::invoice_total(dec!(450), &tax), dec!(531));
    }

    #[rstest]
    #[case(dec!(0), dec!(0))]
    #[case(dec!(3000), dec!(3000))]
    #[case(dec!(99.99), dec!(99.99))]
    fn test_invoice_total_without_tax(#[case] subtotal: Decimal, #[case] expected: Decimal) {
        let total = TaxCalculator::invoice_total(subtotal, &TaxBreakdown::zero());
        assert_eq!(total, expected);
    }

    #[test]
    fn test_invoice_total_sums_components() {
        let tax = TaxBreakdown {
            cgst_amount: dec!(90),
            sgst_amount: dec!(90),
            igst_amount: dec!(18),
        };
        assert_eq!(TaxCalculator::invoice_total(dec!(1000), &tax), dec!(1198));
    }

    #[test]
    fn test_effective_rates_invoice_override() {
        let invoice_rates = GstRates::new(dec!(6), dec!(6), dec!(0));
        let product_rates = GstRates::default();

        let effective = TaxCalculator::effective_rates(Some(invoice_rates), product_rates);
        assert_eq!(effective, invoice_rates);
    }

    #[test]
    fn test_effective_rates_product_default() {
        let product_rates = GstRates::new(dec!(14), dec!(14), dec!(0));
        let effective = TaxCalculator::effective_rates(None, product_rates);
        assert_eq!(effective, product_rates);
    }
}
