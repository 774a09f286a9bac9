//! Invoice ledger repository.
//!
//! Every operation runs inside one database transaction: stock deltas,
//! sale rows, invoice totals, and the mirrored financial transaction
//! either all commit or none do. Batch availability is re-enforced at
//! commit time by the guarded update in [`super::stock`], so two
//! concurrent sales cannot both pass the same check.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use brickyard_core::allocation::{AllocationError, LineRequest, PlannedSale, SaleLineAllocator};
use brickyard_core::gst::{GstRates, TaxCalculator};
use brickyard_core::invoice::{InvoiceMath, InvoiceTotals};
use brickyard_core::stock::{BatchStock, StockError, StockLedger};
use brickyard_shared::LedgerConfig;

use crate::entities::{
    financial_transactions, invoices, product_types, production_batches, sales,
    sea_orm_active_enums::{PaymentStatus, PaymentType, TransactionType},
};
use crate::repositories::stock::{self, StockCommitError};

/// Error types for invoice ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Invoice number already in use (case-sensitive match).
    #[error("invoice number already exists: {0}")]
    DuplicateInvoiceNumber(String),

    /// Invoice not found.
    #[error("invoice not found: {0}")]
    NotFound(Uuid),

    /// Sale not found.
    #[error("sale not found: {0}")]
    SaleNotFound(Uuid),

    /// Product type not found.
    #[error("product type not found: {0}")]
    ProductNotFound(Uuid),

    /// Production batch not found.
    #[error("production batch not found: {0}")]
    BatchNotFound(Uuid),

    /// A batch cannot cover the requested quantity.
    #[error(transparent)]
    Stock(StockError),

    /// Sale quantities must be positive.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// The request resolves to no sale rows at all.
    #[error("invoice has no sale lines after allocation")]
    EmptyInvoice,

    /// Multi-product creation exceeded its transaction budget.
    #[error("invoice creation timed out after {0}s")]
    Timeout(u64),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AllocationError> for InvoiceError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::ProductNotFound(id) => Self::ProductNotFound(id),
            AllocationError::BatchNotFound(id) => Self::BatchNotFound(id),
            AllocationError::Stock(err) => Self::Stock(err),
        }
    }
}

impl From<StockCommitError> for InvoiceError {
    fn from(err: StockCommitError) -> Self {
        match err {
            StockCommitError::BatchNotFound(id) => Self::BatchNotFound(id),
            StockCommitError::Stock(err) => Self::Stock(err),
            StockCommitError::Database(err) => Self::Database(err),
        }
    }
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Unique invoice number.
    pub invoice_number: String,
    /// Billed partner.
    pub partner_id: Uuid,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Whether GST applies.
    pub is_gst: bool,
    /// Invoice-level rates; override the product defaults when present.
    pub rates: Option<GstRates>,
    /// Amount already received.
    pub paid_amount: Decimal,
    /// Settlement state.
    pub payment_status: PaymentStatus,
    /// Payment method.
    pub payment_type: PaymentType,
    /// Optional transport vehicle.
    pub vehicle_number: Option<String>,
    /// Optional transporter name.
    pub transport_name: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// The sale line request, in any of its three shapes.
    pub line: LineRequest,
}

/// Input for editing an existing sale row.
#[derive(Debug, Clone)]
pub struct EditSaleInput {
    /// New batch; `None` for service lines.
    pub production_batch_id: Option<Uuid>,
    /// New quantity.
    pub quantity: i64,
    /// New unit rate.
    pub rate: Decimal,
    /// Invoice financial fields as supplied by the caller.
    pub financials: SuppliedFinancials,
}

/// Invoice financial fields supplied alongside a sale edit.
///
/// These are taken as-is rather than re-derived from the sale rows;
/// only `pending_amount` is recomputed as `total - paid`.
#[derive(Debug, Clone, Copy)]
pub struct SuppliedFinancials {
    /// Sum of sale amounts.
    pub subtotal: Decimal,
    /// CGST amount.
    pub cgst_amount: Decimal,
    /// SGST amount.
    pub sgst_amount: Decimal,
    /// IGST amount.
    pub igst_amount: Decimal,
    /// Invoice total.
    pub total_amount: Decimal,
    /// Amount received.
    pub paid_amount: Decimal,
}

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Earliest invoice date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest invoice date, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Filter by partner.
    pub partner_id: Option<Uuid>,
    /// Filter by settlement state.
    pub payment_status: Option<PaymentStatus>,
}

/// An invoice with its sale rows.
#[derive(Debug, Clone)]
pub struct InvoiceWithSales {
    /// Invoice header.
    pub invoice: invoices::Model,
    /// Sale rows.
    pub sales: Vec<sales::Model>,
}

/// Invoice repository owning the full invoice lifecycle.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
    multi_product_timeout: Duration,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, ledger: &LedgerConfig) -> Self {
        Self {
            db,
            multi_product_timeout: Duration::from_secs(ledger.multi_product_timeout_secs),
        }
    }

    /// Creates an invoice with its sales, stock decrements, and mirrored
    /// financial transaction.
    ///
    /// The invoice number is checked before any write. Multi-product
    /// requests run under the configured transaction budget because they
    /// perform many sequential row writes.
    ///
    /// # Errors
    ///
    /// `DuplicateInvoiceNumber`, `ProductNotFound`, `BatchNotFound`,
    /// `Stock` (insufficient availability), `EmptyInvoice`, `Timeout`,
    /// or `Database`.
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<InvoiceWithSales, InvoiceError> {
        let existing = invoices::Entity::find()
            .filter(invoices::Column::InvoiceNumber.eq(input.invoice_number.clone()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(InvoiceError::DuplicateInvoiceNumber(input.invoice_number));
        }

        let (products, batches) = self.resolve_request(&input.line).await?;
        let plan = SaleLineAllocator::plan(
            &input.line,
            |id| {
                products
                    .get(&id)
                    .copied()
                    .ok_or(AllocationError::ProductNotFound(id))
            },
            |id| {
                batches
                    .get(&id)
                    .copied()
                    .ok_or(AllocationError::BatchNotFound(id))
            },
        )?;
        if plan.is_empty() {
            return Err(InvoiceError::EmptyInvoice);
        }

        // One effective rate triple applies to the whole invoice; absent
        // an explicit override it comes from the first line's product.
        let product_rates = products[&plan[0].product_type_id].rates;
        let rates = TaxCalculator::effective_rates(input.rates, product_rates);

        let amounts: Vec<Decimal> = plan.iter().map(|sale| sale.amount).collect();
        let totals = InvoiceMath::recompute(&amounts, rates, input.is_gst, input.paid_amount);

        let write = self.write_invoice(&input, rates, &plan, totals);
        let invoice = if matches!(input.line, LineRequest::MultiProduct { .. }) {
            tokio::time::timeout(self.multi_product_timeout, write)
                .await
                .map_err(|_| InvoiceError::Timeout(self.multi_product_timeout.as_secs()))??
        } else {
            write.await?
        };

        tracing::info!(
            invoice_id = %invoice.invoice.id,
            invoice_number = %invoice.invoice.invoice_number,
            sales = invoice.sales.len(),
            total = %invoice.invoice.total_amount,
            "invoice created"
        );
        Ok(invoice)
    }

    /// Runs the write phase of invoice creation in one transaction.
    async fn write_invoice(
        &self,
        input: &CreateInvoiceInput,
        rates: GstRates,
        plan: &[PlannedSale],
        totals: InvoiceTotals,
    ) -> Result<InvoiceWithSales, InvoiceError> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let invoice_id = Uuid::new_v4();

        let insert = invoices::ActiveModel {
            id: Set(invoice_id),
            invoice_number: Set(input.invoice_number.clone()),
            partner_id: Set(input.partner_id),
            invoice_date: Set(input.invoice_date),
            is_gst: Set(input.is_gst),
            cgst_rate: Set(rates.cgst),
            sgst_rate: Set(rates.sgst),
            igst_rate: Set(rates.igst),
            subtotal: Set(totals.subtotal),
            cgst_amount: Set(totals.cgst_amount),
            sgst_amount: Set(totals.sgst_amount),
            igst_amount: Set(totals.igst_amount),
            total_amount: Set(totals.total_amount),
            paid_amount: Set(totals.paid_amount),
            pending_amount: Set(totals.pending_amount),
            payment_status: Set(input.payment_status.clone()),
            payment_type: Set(input.payment_type.clone()),
            vehicle_number: Set(input.vehicle_number.clone()),
            transport_name: Set(input.transport_name.clone()),
            remarks: Set(input.remarks.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await;

        // The pre-check races with concurrent creates; the unique index is
        // the authority, so its violation maps back to the same error.
        let invoice = match insert {
            Ok(model) => model,
            Err(e) if e.to_string().contains("duplicate key") => {
                return Err(InvoiceError::DuplicateInvoiceNumber(
                    input.invoice_number.clone(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let mut inserted = Vec::with_capacity(plan.len());
        for planned in plan {
            inserted.push(insert_sale(&txn, invoice_id, planned).await?);
            if let Some(batch_id) = planned.production_batch_id {
                stock::commit_delta(&txn, batch_id, -planned.quantity).await?;
            }
        }

        insert_mirror(
            &txn,
            TransactionType::Sale,
            Some(invoice_id),
            None,
            Some(input.partner_id),
            totals.total_amount,
            input.invoice_date,
            Some(format!("Invoice {}", input.invoice_number)),
        )
        .await?;

        txn.commit().await?;
        Ok(InvoiceWithSales {
            invoice,
            sales: inserted,
        })
    }

    /// Lists invoices, newest first, with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invoices(
        &self,
        filter: InvoiceFilter,
    ) -> Result<Vec<invoices::Model>, InvoiceError> {
        let mut query = invoices::Entity::find();

        if let Some(date_from) = filter.date_from {
            query = query.filter(invoices::Column::InvoiceDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(invoices::Column::InvoiceDate.lte(date_to));
        }
        if let Some(partner_id) = filter.partner_id {
            query = query.filter(invoices::Column::PartnerId.eq(partner_id));
        }
        if let Some(status) = filter.payment_status {
            query = query.filter(invoices::Column::PaymentStatus.eq(status));
        }

        let invoices = query
            .order_by_desc(invoices::Column::InvoiceDate)
            .order_by_desc(invoices::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(invoices)
    }

    /// Gets an invoice with its sale rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<InvoiceWithSales, InvoiceError> {
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        let sales = sales::Entity::find()
            .filter(sales::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(sales::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(InvoiceWithSales { invoice, sales })
    }

    /// Edits a sale row, applying only the marginal stock difference.
    ///
    /// Same batch: one delta of `old_qty - new_qty`. Batch change:
    /// restore the old quantity, consume the new one. The invoice's
    /// financial fields are taken from the supplied payload; the mirrored
    /// financial transaction follows the new total.
    ///
    /// # Errors
    ///
    /// `SaleNotFound`, `NonPositiveQuantity`, `BatchNotFound`, `Stock`,
    /// or `Database`.
    pub async fn edit_sale(
        &self,
        sale_id: Uuid,
        input: EditSaleInput,
    ) -> Result<InvoiceWithSales, InvoiceError> {
        // A non-positive quantity would plan a restoring delta larger than
        // the sale ever consumed; reject it before any write.
        if input.quantity <= 0 {
            return Err(InvoiceError::NonPositiveQuantity(input.quantity));
        }

        let sale = sales::Entity::find_by_id(sale_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::SaleNotFound(sale_id))?;
        let invoice_id = sale.invoice_id;

        let txn = self.db.begin().await?;

        let deltas = StockLedger::plan_requantify(
            sale.production_batch_id,
            sale.quantity,
            input.production_batch_id,
            input.quantity,
        );
        for delta in deltas {
            stock::commit_delta(&txn, delta.batch_id, delta.delta).await?;
        }

        let amount = input.rate * Decimal::from(input.quantity);
        let mut active: sales::ActiveModel = sale.into();
        active.production_batch_id = Set(input.production_batch_id);
        active.quantity = Set(input.quantity);
        active.rate = Set(input.rate);
        active.amount = Set(amount);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        let fin = input.financials;
        let pending = fin.total_amount - fin.paid_amount;
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;
        let mut active: invoices::ActiveModel = invoice.into();
        active.subtotal = Set(fin.subtotal);
        active.cgst_amount = Set(fin.cgst_amount);
        active.sgst_amount = Set(fin.sgst_amount);
        active.igst_amount = Set(fin.igst_amount);
        active.total_amount = Set(fin.total_amount);
        active.paid_amount = Set(fin.paid_amount);
        active.pending_amount = Set(pending);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        update_mirror_amount(&txn, invoice_id, fin.total_amount).await?;

        txn.commit().await?;
        self.get_invoice(invoice_id).await
    }

    /// Adds sale lines to an existing invoice, then recomputes the
    /// invoice's totals by summing all current sale rows.
    ///
    /// A request that allocates nothing (zero-quantity selections only)
    /// inserts no rows and leaves the totals unchanged.
    ///
    /// # Errors
    ///
    /// `NotFound`, `ProductNotFound`, `BatchNotFound`, `Stock`, or
    /// `Database`.
    pub async fn add_products(
        &self,
        invoice_id: Uuid,
        line: LineRequest,
    ) -> Result<InvoiceWithSales, InvoiceError> {
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        let (products, batches) = self.resolve_request(&line).await?;
        let plan = SaleLineAllocator::plan(
            &line,
            |id| {
                products
                    .get(&id)
                    .copied()
                    .ok_or(AllocationError::ProductNotFound(id))
            },
            |id| {
                batches
                    .get(&id)
                    .copied()
                    .ok_or(AllocationError::BatchNotFound(id))
            },
        )?;

        let txn = self.db.begin().await?;

        for planned in &plan {
            insert_sale(&txn, invoice_id, planned).await?;
            if let Some(batch_id) = planned.production_batch_id {
                stock::commit_delta(&txn, batch_id, -planned.quantity).await?;
            }
        }

        // Recompute from all current rows, never incrementally.
        let all_sales = sales::Entity::find()
            .filter(sales::Column::InvoiceId.eq(invoice_id))
            .all(&txn)
            .await?;
        let amounts: Vec<Decimal> = all_sales.iter().map(|sale| sale.amount).collect();
        let rates = GstRates::new(invoice.cgst_rate, invoice.sgst_rate, invoice.igst_rate);
        let totals = InvoiceMath::recompute(&amounts, rates, invoice.is_gst, invoice.paid_amount);

        let mut active: invoices::ActiveModel = invoice.into();
        active.subtotal = Set(totals.subtotal);
        active.cgst_amount = Set(totals.cgst_amount);
        active.sgst_amount = Set(totals.sgst_amount);
        active.igst_amount = Set(totals.igst_amount);
        active.total_amount = Set(totals.total_amount);
        active.pending_amount = Set(totals.pending_amount);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        update_mirror_amount(&txn, invoice_id, totals.total_amount).await?;

        txn.commit().await?;
        self.get_invoice(invoice_id).await
    }

    /// Deletes one sale, restoring its quantity to its batch.
    ///
    /// The invoice's financial transactions are removed with the sale.
    /// When the last sale goes, the invoice goes with it; an invoice
    /// never persists with zero sales through this path.
    ///
    /// # Errors
    ///
    /// `SaleNotFound`, `BatchNotFound`, or `Database`.
    pub async fn delete_sale(&self, sale_id: Uuid) -> Result<(), InvoiceError> {
        let sale = sales::Entity::find_by_id(sale_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::SaleNotFound(sale_id))?;
        let invoice_id = sale.invoice_id;

        let txn = self.db.begin().await?;

        if let Some(batch_id) = sale.production_batch_id {
            stock::commit_delta(&txn, batch_id, sale.quantity).await?;
        }

        financial_transactions::Entity::delete_many()
            .filter(financial_transactions::Column::InvoiceId.eq(invoice_id))
            .exec(&txn)
            .await?;
        sales::Entity::delete_by_id(sale_id).exec(&txn).await?;

        let remaining = sales::Entity::find()
            .filter(sales::Column::InvoiceId.eq(invoice_id))
            .all(&txn)
            .await?;
        if remaining.is_empty() {
            invoices::Entity::delete_by_id(invoice_id)
                .exec(&txn)
                .await?;
            tracing::info!(%invoice_id, "emptied invoice removed with its last sale");
        }

        txn.commit().await?;
        Ok(())
    }

    /// Deletes every sale of an invoice but keeps the invoice row with
    /// zeroed totals.
    ///
    /// Deliberately different from [`Self::delete_sale`], which removes
    /// an emptied invoice; callers depend on the difference.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BatchNotFound`, or `Database`.
    pub async fn delete_all_sales(&self, invoice_id: Uuid) -> Result<invoices::Model, InvoiceError> {
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        let txn = self.db.begin().await?;

        restore_and_delete_sales(&txn, invoice_id).await?;
        financial_transactions::Entity::delete_many()
            .filter(financial_transactions::Column::InvoiceId.eq(invoice_id))
            .exec(&txn)
            .await?;

        let totals = InvoiceMath::cleared();
        let mut active: invoices::ActiveModel = invoice.into();
        active.subtotal = Set(totals.subtotal);
        active.cgst_amount = Set(totals.cgst_amount);
        active.sgst_amount = Set(totals.sgst_amount);
        active.igst_amount = Set(totals.igst_amount);
        active.total_amount = Set(totals.total_amount);
        active.paid_amount = Set(totals.paid_amount);
        active.pending_amount = Set(totals.pending_amount);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes an invoice with its sales and financial transactions,
    /// restoring every consumed quantity.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BatchNotFound`, or `Database`.
    pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), InvoiceError> {
        invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        let txn = self.db.begin().await?;

        restore_and_delete_sales(&txn, invoice_id).await?;
        financial_transactions::Entity::delete_many()
            .filter(financial_transactions::Column::InvoiceId.eq(invoice_id))
            .exec(&txn)
            .await?;
        invoices::Entity::delete_by_id(invoice_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        tracing::info!(%invoice_id, "invoice deleted");
        Ok(())
    }

    /// Fetches the products and batches a line request references.
    ///
    /// Missing ids surface as `ProductNotFound` / `BatchNotFound` before
    /// any write happens.
    async fn resolve_request(
        &self,
        line: &LineRequest,
    ) -> Result<
        (
            HashMap<Uuid, brickyard_core::allocation::ProductInfo>,
            HashMap<Uuid, BatchStock>,
        ),
        InvoiceError,
    > {
        let (product_ids, batch_ids) = referenced_ids(line);

        let mut products = HashMap::with_capacity(product_ids.len());
        for model in product_types::Entity::find()
            .filter(product_types::Column::Id.is_in(product_ids.clone()))
            .all(&self.db)
            .await?
        {
            products.insert(
                model.id,
                brickyard_core::allocation::ProductInfo {
                    id: model.id,
                    is_service: model.is_service,
                    rates: GstRates::new(model.cgst_rate, model.sgst_rate, model.igst_rate),
                },
            );
        }
        for id in &product_ids {
            if !products.contains_key(id) {
                return Err(InvoiceError::ProductNotFound(*id));
            }
        }

        let mut batches = HashMap::with_capacity(batch_ids.len());
        for model in production_batches::Entity::find()
            .filter(production_batches::Column::Id.is_in(batch_ids.clone()))
            .all(&self.db)
            .await?
        {
            batches.insert(
                model.id,
                BatchStock::new(model.id, model.quantity, model.remaining_quantity),
            );
        }
        for id in &batch_ids {
            if !batches.contains_key(id) {
                return Err(InvoiceError::BatchNotFound(*id));
            }
        }

        Ok((products, batches))
    }
}

/// Collects the product and batch ids a line request mentions.
fn referenced_ids(line: &LineRequest) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut product_ids = Vec::new();
    let mut batch_ids = Vec::new();

    match line {
        LineRequest::Single {
            product_type_id,
            production_batch_id,
            ..
        } => {
            product_ids.push(*product_type_id);
            batch_ids.push(*production_batch_id);
        }
        LineRequest::MultiBatch {
            product_type_id,
            batch_selections,
            ..
        } => {
            product_ids.push(*product_type_id);
            batch_ids.extend(batch_selections.iter().map(|s| s.batch_id));
        }
        LineRequest::MultiProduct { items } => {
            for item in items {
                product_ids.push(item.product_type_id);
                batch_ids.extend(item.batch_selections.iter().map(|s| s.batch_id));
            }
        }
    }

    product_ids.dedup();
    batch_ids.sort_unstable();
    batch_ids.dedup();
    (product_ids, batch_ids)
}

/// Inserts one planned sale row.
async fn insert_sale(
    txn: &DatabaseTransaction,
    invoice_id: Uuid,
    planned: &PlannedSale,
) -> Result<sales::Model, InvoiceError> {
    let now = Utc::now().into();
    let sale = sales::ActiveModel {
        id: Set(Uuid::new_v4()),
        invoice_id: Set(invoice_id),
        product_type_id: Set(planned.product_type_id),
        production_batch_id: Set(planned.production_batch_id),
        quantity: Set(planned.quantity),
        rate: Set(planned.rate),
        amount: Set(planned.amount),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(sale)
}

/// Inserts a mirrored financial transaction row.
#[allow(clippy::too_many_arguments)]
async fn insert_mirror(
    txn: &DatabaseTransaction,
    transaction_type: TransactionType,
    invoice_id: Option<Uuid>,
    expense_id: Option<Uuid>,
    partner_id: Option<Uuid>,
    amount: Decimal,
    transaction_date: NaiveDate,
    description: Option<String>,
) -> Result<financial_transactions::Model, InvoiceError> {
    let now = Utc::now().into();
    let row = financial_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        transaction_type: Set(transaction_type),
        invoice_id: Set(invoice_id),
        expense_id: Set(expense_id),
        partner_id: Set(partner_id),
        amount: Set(amount),
        transaction_date: Set(transaction_date),
        description: Set(description),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(row)
}

/// Updates the mirrored amount for all of an invoice's transactions.
async fn update_mirror_amount(
    txn: &DatabaseTransaction,
    invoice_id: Uuid,
    amount: Decimal,
) -> Result<(), InvoiceError> {
    financial_transactions::Entity::update_many()
        .col_expr(financial_transactions::Column::Amount, Expr::value(amount))
        .col_expr(
            financial_transactions::Column::UpdatedAt,
            Expr::value(Utc::now()),
        )
        .filter(financial_transactions::Column::InvoiceId.eq(invoice_id))
        .exec(txn)
        .await?;
    Ok(())
}

/// Restores every sale's quantity to its batch, then deletes the sales.
async fn restore_and_delete_sales(
    txn: &DatabaseTransaction,
    invoice_id: Uuid,
) -> Result<(), InvoiceError> {
    let rows = sales::Entity::find()
        .filter(sales::Column::InvoiceId.eq(invoice_id))
        .all(txn)
        .await?;

    for sale in &rows {
        if let Some(batch_id) = sale.production_batch_id {
            stock::commit_delta(txn, batch_id, sale.quantity).await?;
        }
    }

    sales::Entity::delete_many()
        .filter(sales::Column::InvoiceId.eq(invoice_id))
        .exec(txn)
        .await?;
    Ok(())
}
