//! Stock ledger arithmetic.

use uuid::Uuid;

use super::error::StockError;
use super::types::{BatchStock, StockDelta};

/// Pure stock arithmetic over production batches.
///
/// The database layer is responsible for executing these decisions
/// atomically; everything here is side-effect free and fully testable.
pub struct StockLedger;

impl StockLedger {
    /// Checks that a batch can cover the requested quantity.
    ///
    /// # Errors
    ///
    /// Returns `StockError::InsufficientStock` naming the batch and the
    /// quantity actually available.
    pub fn check_available(batch: &BatchStock, requested: i64) -> Result<(), StockError> {
        if requested > batch.remaining_quantity {
            return Err(StockError::InsufficientStock {
                batch_id: batch.id,
                available: batch.remaining_quantity,
                requested,
            });
        }
        Ok(())
    }

    /// Applies a signed delta to a batch's remaining quantity and returns
    /// the new remaining quantity.
    ///
    /// # Errors
    ///
    /// Returns `StockError::InsufficientStock` when a negative delta
    /// exceeds the remaining quantity, and `StockError::InvariantViolation`
    /// when a positive delta would push remaining above the original
    /// quantity. Neither case is ever clamped.
    pub fn apply_delta(batch: &BatchStock, delta: i64) -> Result<i64, StockError> {
        let new_remaining = batch.remaining_quantity + delta;

        if new_remaining < 0 {
            return Err(StockError::InsufficientStock {
                batch_id: batch.id,
                available: batch.remaining_quantity,
                requested: -delta,
            });
        }
        if new_remaining > batch.quantity {
            return Err(StockError::InvariantViolation {
                batch_id: batch.id,
                remaining: batch.remaining_quantity,
                delta,
                quantity: batch.quantity,
            });
        }

        Ok(new_remaining)
    }

    /// Plans the marginal stock deltas for re-quantifying an existing sale.
    ///
    /// Only the difference against the current sale row is applied:
    /// - same batch, quantity change: one delta of `old_qty - new_qty`
    ///   (positive deltas return stock);
    /// - batch change: restore the full old quantity to the old batch and
    ///   consume the full new quantity from the new batch;
    /// - service lines (`None` batch on both sides): no deltas.
    ///
    /// Zero deltas are omitted from the plan.
    #[must_use]
    pub fn plan_requantify(
        old_batch: Option<Uuid>,
        old_qty: i64,
        new_batch: Option<Uuid>,
        new_qty: i64,
    ) -> Vec<StockDelta> {
        let mut deltas = Vec::with_capacity(2);

        match (old_batch, new_batch) {
            (Some(old_id), Some(new_id)) if old_id == new_id => {
                let delta = old_qty - new_qty;
                if delta != 0 {
                    deltas.push(StockDelta {
                        batch_id: old_id,
                        delta,
                    });
                }
            }
            (old, new) => {
                if let Some(old_id) = old {
                    if old_qty != 0 {
                        deltas.push(StockDelta {
                            batch_id: old_id,
                            delta: old_qty,
                        });
                    }
                }
                if let Some(new_id) = new {
                    if new_qty != 0 {
                        deltas.push(StockDelta {
                            batch_id: new_id,
                            delta: -new_qty,
                        });
                    }
                }
            }
        }

        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(quantity: i64, remaining: i64) -> BatchStock {
        BatchStock::new(Uuid::new_v4(), quantity, remaining)
    }

    #[test]
    fn test_check_available_ok() {
        let b = batch(1000, 700);
        assert!(StockLedger::check_available(&b, 700).is_ok());
        assert!(StockLedger::check_available(&b, 1).is_ok());
        assert!(StockLedger::check_available(&b, 0).is_ok());
    }

    #[test]
    fn test_check_available_insufficient_names_batch() {
        let b = batch(1000, 500);
        let err = StockLedger::check_available(&b, 600).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                batch_id: b.id,
                available: 500,
                requested: 600,
            }
        );
    }

    #[test]
    fn test_apply_delta_sale_and_return() {
        let b = batch(1000, 1000);
        assert_eq!(StockLedger::apply_delta(&b, -300).unwrap(), 700);

        let b = batch(1000, 700);
        assert_eq!(StockLedger::apply_delta(&b, 300).unwrap(), 1000);
    }

    #[test]
    fn test_apply_delta_never_below_zero() {
        let b = batch(1000, 500);
        let err = StockLedger::apply_delta(&b, -600).unwrap_err();
        assert!(matches!(err, StockError::InsufficientStock { .. }));
    }

    #[test]
    fn test_apply_delta_never_above_original() {
        let b = batch(1000, 900);
        let err = StockLedger::apply_delta(&b, 200).unwrap_err();
        assert!(matches!(err, StockError::InvariantViolation { .. }));
    }

    #[test]
    fn test_plan_requantify_same_batch() {
        let id = Uuid::new_v4();
        // 300 -> 500 on the same batch: single delta of -200
        let plan = StockLedger::plan_requantify(Some(id), 300, Some(id), 500);
        assert_eq!(
            plan,
            vec![StockDelta {
                batch_id: id,
                delta: -200
            }]
        );
    }

    #[test]
    fn test_plan_requantify_same_batch_shrink_returns_stock() {
        let id = Uuid::new_v4();
        let plan = StockLedger::plan_requantify(Some(id), 500, Some(id), 200);
        assert_eq!(
            plan,
            vec![StockDelta {
                batch_id: id,
                delta: 300
            }]
        );
    }

    #[test]
    fn test_plan_requantify_same_batch_no_change() {
        let id = Uuid::new_v4();
        assert!(StockLedger::plan_requantify(Some(id), 300, Some(id), 300).is_empty());
    }

    #[test]
    fn test_plan_requantify_batch_change() {
        let old = Uuid::new_v4();
        let new = Uuid::new_v4();
        let plan = StockLedger::plan_requantify(Some(old), 300, Some(new), 450);
        assert_eq!(
            plan,
            vec![
                StockDelta {
                    batch_id: old,
                    delta: 300
                },
                StockDelta {
                    batch_id: new,
                    delta: -450
                },
            ]
        );
    }

    #[test]
    fn test_plan_requantify_service_line() {
        assert!(StockLedger::plan_requantify(None, 2, None, 5).is_empty());
    }

    #[test]
    fn test_plan_requantify_physical_to_service() {
        let old = Uuid::new_v4();
        let plan = StockLedger::plan_requantify(Some(old), 300, None, 1);
        assert_eq!(
            plan,
            vec![StockDelta {
                batch_id: old,
                delta: 300
            }]
        );
    }
}
