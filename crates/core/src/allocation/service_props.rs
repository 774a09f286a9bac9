//! Property-based tests for sale line allocation.
//!
//! - Amounts: every planned sale carries `quantity × rate` exactly
//! - No oversell: planned quantities per batch never exceed remaining stock
//! - Skips: zero-quantity selections never produce a sale row

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::SaleLineAllocator;
use super::types::{BatchSelection, LineRequest, ProductInfo};
use crate::gst::GstRates;
use crate::stock::BatchStock;

/// Strategy for a batch split over one shared batch pool.
fn selections_strategy() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..4, 0i64..500), 1..8)
}

fn pool() -> Vec<BatchStock> {
    (0..4)
        .map(|_| BatchStock::new(Uuid::new_v4(), 1_000, 1_000))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every planned sale's amount is exactly quantity times rate.
    #[test]
    fn prop_amount_is_quantity_times_rate(
        selections in selections_strategy(),
        rate_units in 1i64..10_000,
    ) {
        let batches = pool();
        let rate = Decimal::from(rate_units) / Decimal::ONE_HUNDRED;
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate,
            batch_selections: selections
                .iter()
                .map(|&(i, quantity)| BatchSelection {
                    batch_id: batches[i].id,
                    quantity,
                })
                .collect(),
        };

        if let Ok(plan) = SaleLineAllocator::plan(
            &request,
            |id| Ok(ProductInfo { id, is_service: false, rates: GstRates::default() }),
            |id| Ok(*batches.iter().find(|b| b.id == id).unwrap()),
        ) {
            for sale in &plan {
                prop_assert_eq!(sale.amount, rate * Decimal::from(sale.quantity));
                prop_assert!(sale.quantity > 0);
            }
        }
    }

    /// A successful plan never claims more from a batch than it holds,
    /// even when one batch appears in several selections.
    #[test]
    fn prop_plan_never_oversells_a_batch(
        selections in selections_strategy(),
    ) {
        let batches = pool();
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate: Decimal::ONE,
            batch_selections: selections
                .iter()
                .map(|&(i, quantity)| BatchSelection {
                    batch_id: batches[i].id,
                    quantity,
                })
                .collect(),
        };

        if let Ok(plan) = SaleLineAllocator::plan(
            &request,
            |id| Ok(ProductInfo { id, is_service: false, rates: GstRates::default() }),
            |id| Ok(*batches.iter().find(|b| b.id == id).unwrap()),
        ) {
            let mut totals: HashMap<Uuid, i64> = HashMap::new();
            for sale in &plan {
                *totals.entry(sale.production_batch_id.unwrap()).or_insert(0) +=
                    sale.quantity;
            }
            for batch in &batches {
                let claimed = totals.get(&batch.id).copied().unwrap_or(0);
                prop_assert!(claimed <= batch.remaining_quantity);
            }
        }
    }

    /// The plan contains exactly one sale per positive selection.
    #[test]
    fn prop_zero_selections_never_plan(
        selections in selections_strategy(),
    ) {
        let batches = pool();
        let positive = selections.iter().filter(|&&(_, q)| q > 0).count();
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate: Decimal::ONE,
            batch_selections: selections
                .iter()
                .map(|&(i, quantity)| BatchSelection {
                    batch_id: batches[i].id,
                    quantity,
                })
                .collect(),
        };

        if let Ok(plan) = SaleLineAllocator::plan(
            &request,
            |id| Ok(ProductInfo { id, is_service: false, rates: GstRates::default() }),
            |id| Ok(*batches.iter().find(|b| b.id == id).unwrap()),
        ) {
            prop_assert_eq!(plan.len(), positive);
        }
    }
}
