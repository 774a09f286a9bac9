//! Sale line allocator.
//!
//! Pure planning logic: product and batch information is injected through
//! lookup functions, so the allocator itself has no database dependency.
//! The database layer executes the returned plan inside one transaction
//! and re-guards every decrement at commit time.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::AllocationError;
use super::types::{BatchSelection, LineRequest, PlannedSale, ProductInfo};
use crate::stock::{BatchStock, StockLedger};

/// Allocates sale line requests across production batches.
pub struct SaleLineAllocator;

impl SaleLineAllocator {
    /// Plans the sale rows for one line request.
    ///
    /// Rules:
    /// - service products yield exactly one sale with no batch; a missing
    ///   or non-positive quantity defaults to 1;
    /// - physical products yield one sale per `{batch, quantity > 0}`
    ///   selection, with availability checked cumulatively per batch
    ///   across the whole request;
    /// - zero-quantity selections are skipped silently;
    /// - any failed check aborts the entire plan, so a partial allocation
    ///   is never handed to the caller.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError` when a product or batch is unknown or a
    /// batch cannot cover its requested share.
    pub fn plan<P, B>(
        request: &LineRequest,
        product_lookup: P,
        batch_lookup: B,
    ) -> Result<Vec<PlannedSale>, AllocationError>
    where
        P: Fn(Uuid) -> Result<ProductInfo, AllocationError>,
        B: Fn(Uuid) -> Result<BatchStock, AllocationError>,
    {
        // Quantities already claimed per batch within this plan, so two
        // selections of one batch cannot both pass the same check.
        let mut claimed: HashMap<Uuid, i64> = HashMap::new();
        let mut planned = Vec::new();

        match request {
            LineRequest::Single {
                product_type_id,
                production_batch_id,
                quantity,
                rate,
            } => {
                let product = product_lookup(*product_type_id)?;
                let selections = [BatchSelection {
                    batch_id: *production_batch_id,
                    quantity: *quantity,
                }];
                Self::plan_line(
                    &product,
                    *rate,
                    &selections,
                    Some(*quantity),
                    &batch_lookup,
                    &mut claimed,
                    &mut planned,
                )?;
            }
            LineRequest::MultiBatch {
                product_type_id,
                rate,
                batch_selections,
            } => {
                let product = product_lookup(*product_type_id)?;
                Self::plan_line(
                    &product,
                    *rate,
                    batch_selections,
                    None,
                    &batch_lookup,
                    &mut claimed,
                    &mut planned,
                )?;
            }
            LineRequest::MultiProduct { items } => {
                for item in items {
                    let product = product_lookup(item.product_type_id)?;
                    Self::plan_line(
                        &product,
                        item.rate,
                        &item.batch_selections,
                        item.quantity,
                        &batch_lookup,
                        &mut claimed,
                        &mut planned,
                    )?;
                }
            }
        }

        Ok(planned)
    }

    /// Plans the sales for one product line.
    fn plan_line<B>(
        product: &ProductInfo,
        rate: Decimal,
        selections: &[BatchSelection],
        service_quantity: Option<i64>,
        batch_lookup: &B,
        claimed: &mut HashMap<Uuid, i64>,
        planned: &mut Vec<PlannedSale>,
    ) -> Result<(), AllocationError>
    where
        B: Fn(Uuid) -> Result<BatchStock, AllocationError>,
    {
        if product.is_service {
            // Service lines never touch stock; quantity defaults to 1.
            let quantity = match service_quantity {
                Some(q) if q > 0 => q,
                _ => 1,
            };
            planned.push(PlannedSale {
                product_type_id: product.id,
                production_batch_id: None,
                quantity,
                rate,
                amount: rate * Decimal::from(quantity),
            });
            return Ok(());
        }

        for selection in selections {
            if selection.quantity <= 0 {
                continue;
            }

            let batch = batch_lookup(selection.batch_id)?;
            let already = claimed.get(&batch.id).copied().unwrap_or(0);
            let effective = BatchStock::new(
                batch.id,
                batch.quantity,
                batch.remaining_quantity - already,
            );
            StockLedger::check_available(&effective, selection.quantity)?;

            claimed.insert(batch.id, already + selection.quantity);
            planned.push(PlannedSale {
                product_type_id: product.id,
                production_batch_id: Some(batch.id),
                quantity: selection.quantity,
                rate,
                amount: rate * Decimal::from(selection.quantity),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::types::LineItem;
    use crate::gst::GstRates;
    use crate::stock::StockError;
    use rust_decimal_macros::dec;

    fn physical(id: Uuid) -> ProductInfo {
        ProductInfo {
            id,
            is_service: false,
            rates: GstRates::default(),
        }
    }

    fn service(id: Uuid) -> ProductInfo {
        ProductInfo {
            id,
            is_service: true,
            rates: GstRates::default(),
        }
    }

    #[test]
    fn test_single_line_allocates_one_sale() {
        let product_id = Uuid::new_v4();
        let batch_id = Uuid::new_v4();

        let request = LineRequest::Single {
            product_type_id: product_id,
            production_batch_id: batch_id,
            quantity: 300,
            rate: dec!(10),
        };

        let plan = SaleLineAllocator::plan(
            &request,
            |id| Ok(physical(id)),
            |id| Ok(BatchStock::new(id, 1000, 1000)),
        )
        .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].production_batch_id, Some(batch_id));
        assert_eq!(plan[0].quantity, 300);
        assert_eq!(plan[0].amount, dec!(3000));
    }

    #[test]
    fn test_service_line_has_no_batch() {
        let product_id = Uuid::new_v4();
        let request = LineRequest::Single {
            product_type_id: product_id,
            production_batch_id: Uuid::new_v4(),
            quantity: 2,
            rate: dec!(100),
        };

        let plan = SaleLineAllocator::plan(
            &request,
            |id| Ok(service(id)),
            |_| panic!("service lines must not look up batches"),
        )
        .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].production_batch_id, None);
        assert_eq!(plan[0].quantity, 2);
        assert_eq!(plan[0].amount, dec!(200));
    }

    #[test]
    fn test_service_quantity_defaults_to_one() {
        let request = LineRequest::MultiProduct {
            items: vec![LineItem {
                product_type_id: Uuid::new_v4(),
                rate: dec!(500),
                batch_selections: vec![],
                quantity: Some(0),
            }],
        };

        let plan = SaleLineAllocator::plan(
            &request,
            |id| Ok(service(id)),
            |id| Ok(BatchStock::new(id, 0, 0)),
        )
        .unwrap();

        assert_eq!(plan[0].quantity, 1);
        assert_eq!(plan[0].amount, dec!(500));
    }

    #[test]
    fn test_zero_quantity_selection_skipped_silently() {
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate: dec!(10),
            batch_selections: vec![
                BatchSelection {
                    batch_id: Uuid::new_v4(),
                    quantity: 0,
                },
                BatchSelection {
                    batch_id: Uuid::new_v4(),
                    quantity: 50,
                },
            ],
        };

        let plan = SaleLineAllocator::plan(
            &request,
            |id| Ok(physical(id)),
            |id| Ok(BatchStock::new(id, 100, 100)),
        )
        .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].quantity, 50);
    }

    #[test]
    fn test_insufficient_stock_aborts_whole_plan() {
        let short_batch = Uuid::new_v4();
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate: dec!(10),
            batch_selections: vec![
                BatchSelection {
                    batch_id: Uuid::new_v4(),
                    quantity: 100,
                },
                BatchSelection {
                    batch_id: short_batch,
                    quantity: 600,
                },
            ],
        };

        let err = SaleLineAllocator::plan(
            &request,
            |id| Ok(physical(id)),
            |id| {
                if id == short_batch {
                    Ok(BatchStock::new(id, 1000, 500))
                } else {
                    Ok(BatchStock::new(id, 1000, 1000))
                }
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            AllocationError::Stock(StockError::InsufficientStock {
                batch_id: short_batch,
                available: 500,
                requested: 600,
            })
        );
    }

    #[test]
    fn test_repeated_batch_selections_checked_cumulatively() {
        let batch_id = Uuid::new_v4();
        // 600 + 600 against remaining 1000: second selection must fail even
        // though each passes in isolation.
        let request = LineRequest::MultiBatch {
            product_type_id: Uuid::new_v4(),
            rate: dec!(10),
            batch_selections: vec![
                BatchSelection {
                    batch_id,
                    quantity: 600,
                },
                BatchSelection {
                    batch_id,
                    quantity: 600,
                },
            ],
        };

        let err = SaleLineAllocator::plan(
            &request,
            |id| Ok(physical(id)),
            |id| Ok(BatchStock::new(id, 1000, 1000)),
        )
        .unwrap_err();

        assert_eq!(
            err,
            AllocationError::Stock(StockError::InsufficientStock {
                batch_id,
                available: 400,
                requested: 600,
            })
        );
    }

    #[test]
    fn test_multi_product_mixed_service_and_physical() {
        let service_id = Uuid::new_v4();
        let brick_id = Uuid::new_v4();
        let batch_id = Uuid::new_v4();

        let request = LineRequest::MultiProduct {
            items: vec![
                LineItem {
                    product_type_id: service_id,
                    rate: dec!(100),
                    batch_selections: vec![],
                    quantity: Some(2),
                },
                LineItem {
                    product_type_id: brick_id,
                    rate: dec!(5),
                    batch_selections: vec![BatchSelection {
                        batch_id,
                        quantity: 50,
                    }],
                    quantity: None,
                },
            ],
        };

        let plan = SaleLineAllocator::plan(
            &request,
            |id| {
                if id == service_id {
                    Ok(service(id))
                } else {
                    Ok(physical(id))
                }
            },
            |id| Ok(BatchStock::new(id, 1000, 1000)),
        )
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].production_batch_id, None);
        assert_eq!(plan[0].amount, dec!(200));
        assert_eq!(plan[1].production_batch_id, Some(batch_id));
        assert_eq!(plan[1].amount, dec!(250));

        let subtotal: Decimal = plan.iter().map(|s| s.amount).sum();
        assert_eq!(subtotal, dec!(450));
    }

    #[test]
    fn test_unknown_product_is_an_error() {
        let request = LineRequest::Single {
            product_type_id: Uuid::new_v4(),
            production_batch_id: Uuid::new_v4(),
            quantity: 1,
            rate: dec!(1),
        };

        let err = SaleLineAllocator::plan(
            &request,
            |id| Err(AllocationError::ProductNotFound(id)),
            |id| Ok(BatchStock::new(id, 1, 1)),
        )
        .unwrap_err();

        assert!(matches!(err, AllocationError::ProductNotFound(_)));
    }
}
