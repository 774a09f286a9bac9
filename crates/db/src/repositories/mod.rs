//! Repository abstractions for data access.

pub mod expense;
pub mod invoice;
pub mod stock;

pub use expense::{
    CreateExpenseInput, EditExpenseInput, ExpenseError, ExpenseRepository, ExpenseWithMirror,
    PurchaseRawMaterialInput,
};
pub use invoice::{
    CreateInvoiceInput, EditSaleInput, InvoiceError, InvoiceFilter, InvoiceRepository,
    InvoiceWithSales, SuppliedFinancials,
};
pub use stock::StockCommitError;
