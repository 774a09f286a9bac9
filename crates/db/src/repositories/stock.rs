//! Guarded stock commits for production batches.
//!
//! The commit is a single conditional `UPDATE` so the availability check
//! and the decrement are atomic per batch row. Zero rows affected means
//! the guard rejected the delta; the batch is then re-read to classify
//! the failure. The remaining quantity is never clamped.

use brickyard_core::stock::{BatchStock, StockError};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::production_batches;

/// Errors raised while committing a stock delta.
#[derive(Debug, Error)]
pub enum StockCommitError {
    /// Referenced production batch does not exist.
    #[error("production batch not found: {0}")]
    BatchNotFound(Uuid),

    /// The guard rejected the delta.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Loads a batch's stock position.
///
/// # Errors
///
/// Returns `BatchNotFound` for unknown ids.
pub async fn load_batch<C: ConnectionTrait>(
    conn: &C,
    batch_id: Uuid,
) -> Result<BatchStock, StockCommitError> {
    let batch = production_batches::Entity::find_by_id(batch_id)
        .one(conn)
        .await?
        .ok_or(StockCommitError::BatchNotFound(batch_id))?;

    Ok(BatchStock::new(
        batch.id,
        batch.quantity,
        batch.remaining_quantity,
    ))
}

/// Applies a signed delta to a batch's remaining quantity.
///
/// Executes one guarded update:
///
/// ```sql
/// UPDATE production_batches
/// SET remaining_quantity = remaining_quantity + $delta
/// WHERE id = $batch_id
///   AND remaining_quantity + $delta >= 0
///   AND remaining_quantity + $delta <= quantity
/// ```
///
/// # Errors
///
/// When the guard rejects the update, re-reads the row and returns
/// `InsufficientStock` for a depleting delta that exceeds the remaining
/// quantity, or `InvariantViolation` for a delta that would exceed the
/// original quantity.
pub async fn commit_delta<C: ConnectionTrait>(
    conn: &C,
    batch_id: Uuid,
    delta: i64,
) -> Result<(), StockCommitError> {
    if delta == 0 {
        return Ok(());
    }

    let result = production_batches::Entity::update_many()
        .col_expr(
            production_batches::Column::RemainingQuantity,
            Expr::col(production_batches::Column::RemainingQuantity).add(delta),
        )
        .col_expr(
            production_batches::Column::UpdatedAt,
            Expr::value(Utc::now()),
        )
        .filter(production_batches::Column::Id.eq(batch_id))
        .filter(
            Expr::expr(Expr::col(production_batches::Column::RemainingQuantity).add(delta)).gte(0),
        )
        .filter(
            Expr::expr(Expr::col(production_batches::Column::RemainingQuantity).add(delta))
                .lte(Expr::col(production_batches::Column::Quantity)),
        )
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Guard rejected or the batch is gone; re-read to say which.
        let batch = load_batch(conn, batch_id).await?;
        let outcome = brickyard_core::stock::StockLedger::apply_delta(&batch, delta);
        return match outcome {
            Err(err) => Err(err.into()),
            // The row moved between our update and the re-read.
            Ok(_) => Err(StockError::InvariantViolation {
                batch_id,
                remaining: batch.remaining_quantity,
                delta,
                quantity: batch.quantity,
            }
            .into()),
        };
    }

    tracing::debug!(%batch_id, delta, "stock delta committed");
    Ok(())
}
