//! Initial database migration.
//!
//! Creates the enums and tables for the brickyard invoicing ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: MASTER DATA
        // ============================================================
        db.execute_unprepared(PARTNERS_SQL).await?;
        db.execute_unprepared(PRODUCT_TYPES_SQL).await?;
        db.execute_unprepared(STORAGE_LOCATIONS_SQL).await?;
        db.execute_unprepared(RAW_MATERIALS_SQL).await?;
        db.execute_unprepared(EXPENSE_CATEGORIES_SQL).await?;

        // ============================================================
        // PART 3: STOCK
        // ============================================================
        db.execute_unprepared(PRODUCTION_BATCHES_SQL).await?;

        // ============================================================
        // PART 4: INVOICING
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(SALES_SQL).await?;

        // ============================================================
        // PART 5: EXPENSES & MIRRORED LEDGER
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(FINANCIAL_TRANSACTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Mirrored financial transaction kinds
CREATE TYPE transaction_type AS ENUM ('sale', 'purchase', 'expense');

-- Invoice settlement state
CREATE TYPE payment_status AS ENUM ('paid', 'pending', 'partial');

-- Payment method
CREATE TYPE payment_type AS ENUM ('cash', 'credit', 'upi', 'bank_transfer');

-- Partner role
CREATE TYPE partner_type AS ENUM ('customer', 'vendor', 'both');
";

const PARTNERS_SQL: &str = r"
CREATE TABLE partners (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    partner_type partner_type NOT NULL DEFAULT 'customer',
    phone TEXT,
    address TEXT,
    gst_number TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCT_TYPES_SQL: &str = r"
CREATE TABLE product_types (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL UNIQUE,
    hsn_number TEXT,
    is_service BOOLEAN NOT NULL DEFAULT FALSE,
    cgst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    sgst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    igst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const STORAGE_LOCATIONS_SQL: &str = r"
CREATE TABLE storage_locations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const RAW_MATERIALS_SQL: &str = r"
CREATE TABLE raw_materials (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    unit TEXT NOT NULL,
    current_stock NUMERIC(14, 3) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const EXPENSE_CATEGORIES_SQL: &str = r"
CREATE TABLE expense_categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCTION_BATCHES_SQL: &str = r"
CREATE TABLE production_batches (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    product_type_id UUID NOT NULL REFERENCES product_types(id),
    storage_location_id UUID REFERENCES storage_locations(id),
    batch_number TEXT NOT NULL,
    quantity BIGINT NOT NULL CHECK (quantity >= 0),
    remaining_quantity BIGINT NOT NULL
        CHECK (remaining_quantity >= 0 AND remaining_quantity <= quantity),
    manufactured_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_production_batches_product ON production_batches(product_type_id);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_number TEXT NOT NULL UNIQUE,
    partner_id UUID NOT NULL REFERENCES partners(id),
    invoice_date DATE NOT NULL,
    is_gst BOOLEAN NOT NULL DEFAULT FALSE,
    cgst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    sgst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    igst_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    subtotal NUMERIC(14, 2) NOT NULL DEFAULT 0,
    cgst_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    sgst_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    igst_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    total_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    paid_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    pending_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    payment_status payment_status NOT NULL DEFAULT 'pending',
    payment_type payment_type NOT NULL DEFAULT 'cash',
    vehicle_number TEXT,
    transport_name TEXT,
    remarks TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_invoices_partner ON invoices(partner_id);
CREATE INDEX idx_invoices_date ON invoices(invoice_date);
";

const SALES_SQL: &str = r"
CREATE TABLE sales (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_id UUID NOT NULL REFERENCES invoices(id),
    product_type_id UUID NOT NULL REFERENCES product_types(id),
    production_batch_id UUID REFERENCES production_batches(id),
    quantity BIGINT NOT NULL,
    rate NUMERIC(14, 2) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_sales_invoice ON sales(invoice_id);
CREATE INDEX idx_sales_batch ON sales(production_batch_id);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category_id UUID NOT NULL REFERENCES expense_categories(id),
    partner_id UUID REFERENCES partners(id),
    raw_material_id UUID REFERENCES raw_materials(id),
    amount NUMERIC(14, 2) NOT NULL,
    quantity NUMERIC(14, 3),
    rate NUMERIC(14, 2),
    expense_date DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_expenses_category ON expenses(category_id);
";

const FINANCIAL_TRANSACTIONS_SQL: &str = r"
CREATE TABLE financial_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    transaction_type transaction_type NOT NULL,
    invoice_id UUID REFERENCES invoices(id),
    expense_id UUID REFERENCES expenses(id),
    partner_id UUID REFERENCES partners(id),
    amount NUMERIC(14, 2) NOT NULL,
    transaction_date DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    -- Every row mirrors exactly one source document
    CHECK (
        (invoice_id IS NOT NULL AND expense_id IS NULL)
        OR (invoice_id IS NULL AND expense_id IS NOT NULL)
    )
);

CREATE INDEX idx_financial_transactions_invoice ON financial_transactions(invoice_id);
CREATE INDEX idx_financial_transactions_expense ON financial_transactions(expense_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS financial_transactions CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS sales CASCADE;
DROP TABLE IF EXISTS invoices CASCADE;
DROP TABLE IF EXISTS production_batches CASCADE;
DROP TABLE IF EXISTS expense_categories CASCADE;
DROP TABLE IF EXISTS raw_materials CASCADE;
DROP TABLE IF EXISTS storage_locations CASCADE;
DROP TABLE IF EXISTS product_types CASCADE;
DROP TABLE IF EXISTS partners CASCADE;

DROP TYPE IF EXISTS partner_type;
DROP TYPE IF EXISTS payment_type;
DROP TYPE IF EXISTS payment_status;
DROP TYPE IF EXISTS transaction_type;
";
