//! Allocation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gst::GstRates;

/// One caller-supplied `{batch, quantity}` allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSelection {
    /// Production batch to draw from.
    pub batch_id: Uuid,
    /// Quantity to draw. Zero is silently skipped, never an error.
    pub quantity: i64,
}

/// One product line inside a multi-product request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product being sold.
    pub product_type_id: Uuid,
    /// Unit rate.
    pub rate: Decimal,
    /// Batch allocations for this line. Ignored for service products.
    #[serde(default)]
    pub batch_selections: Vec<BatchSelection>,
    /// Quantity for service products (no batch to draw from).
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// A sale line request in one of its three shapes.
///
/// The legacy payloads arrived as three structurally different JSON
/// bodies; they are modeled as one tagged union and dispatched
/// explicitly rather than by optional-field sniffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineRequest {
    /// Multiple products, each with its own batch split.
    MultiProduct {
        /// Product lines.
        items: Vec<LineItem>,
    },
    /// One product split across several batches.
    MultiBatch {
        /// Product being sold.
        product_type_id: Uuid,
        /// Unit rate.
        rate: Decimal,
        /// Batch allocations.
        batch_selections: Vec<BatchSelection>,
    },
    /// One product drawn from a single batch.
    Single {
        /// Product being sold.
        product_type_id: Uuid,
        /// Batch to draw from.
        production_batch_id: Uuid,
        /// Quantity to sell.
        quantity: i64,
        /// Unit rate.
        rate: Decimal,
    },
}

/// Product information needed to plan an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product type ID.
    pub id: Uuid,
    /// Service products never consume batch stock.
    pub is_service: bool,
    /// The product's default GST rates.
    pub rates: GstRates,
}

/// One planned sale row, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSale {
    /// Product sold.
    pub product_type_id: Uuid,
    /// Batch the stock is drawn from; `None` for service lines.
    pub production_batch_id: Option<Uuid>,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit rate.
    pub rate: Decimal,
    /// Line amount, always `quantity × rate`.
    pub amount: Decimal,
}
