//! Property-based tests for stock arithmetic.
//!
//! - Stock conservation: a delta and its opposite cancel exactly
//! - No oversell: a request above remaining is always rejected unchanged
//! - Bounded remaining: applied deltas keep remaining within [0, quantity]

use proptest::prelude::*;
use uuid::Uuid;

use super::error::StockError;
use super::service::StockLedger;
use super::types::BatchStock;

/// Strategy for a batch with a valid stock position.
fn batch_strategy() -> impl Strategy<Value = BatchStock> {
    (1i64..1_000_000).prop_flat_map(|quantity| {
        (0..=quantity).prop_map(move |remaining| {
            BatchStock::new(Uuid::new_v4(), quantity, remaining)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful delta followed by its opposite restores the original
    /// remaining quantity exactly (deletion symmetry).
    #[test]
    fn prop_delta_roundtrip_conserves_stock(
        batch in batch_strategy(),
    ) {
        let sold = batch.remaining_quantity;
        prop_assume!(sold > 0);

        let after_sale = StockLedger::apply_delta(&batch, -sold).unwrap();
        let depleted = BatchStock::new(batch.id, batch.quantity, after_sale);
        let restored = StockLedger::apply_delta(&depleted, sold).unwrap();

        prop_assert_eq!(restored, batch.remaining_quantity);
    }

    /// Requests above remaining quantity are rejected and the error names
    /// the batch and the quantity actually available.
    #[test]
    fn prop_no_oversell(
        batch in batch_strategy(),
        excess in 1i64..10_000,
    ) {
        let requested = batch.remaining_quantity + excess;
        let err = StockLedger::check_available(&batch, requested).unwrap_err();

        prop_assert_eq!(err, StockError::InsufficientStock {
            batch_id: batch.id,
            available: batch.remaining_quantity,
            requested,
        });
    }

    /// Any accepted delta leaves remaining within [0, quantity].
    #[test]
    fn prop_applied_delta_stays_in_bounds(
        batch in batch_strategy(),
        delta in -1_000_000i64..1_000_000,
    ) {
        if let Ok(remaining) = StockLedger::apply_delta(&batch, delta) {
            prop_assert!(remaining >= 0);
            prop_assert!(remaining <= batch.quantity);
        }
    }

    /// A requantify plan against the same batch nets out to exactly the
    /// quantity difference; a batch change conserves total stock across
    /// the two batches.
    #[test]
    fn prop_requantify_plan_conserves_quantity(
        old_qty in 1i64..10_000,
        new_qty in 1i64..10_000,
        same_batch in any::<bool>(),
    ) {
        let old_id = Uuid::new_v4();
        let new_id = if same_batch { old_id } else { Uuid::new_v4() };

        let plan = StockLedger::plan_requantify(Some(old_id), old_qty, Some(new_id), new_qty);
        let net: i64 = plan.iter().map(|d| d.delta).sum();

        // Net effect across all batches is always restore-old minus consume-new.
        prop_assert_eq!(net, old_qty - new_qty);
    }
}
