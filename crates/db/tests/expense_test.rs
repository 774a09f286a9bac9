//! Integration tests for ExpenseRepository.
//!
//! Exercises expense creation, mirror lockstep updates, raw-material
//! purchase intake, and referential-integrity ordered deletion.
//!
//! Tests are skipped when no DATABASE_URL is configured.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use brickyard_db::entities::{
    expense_categories::{self, RAW_MATERIAL_CATEGORY},
    expenses, financial_transactions, partners, raw_materials,
    sea_orm_active_enums::{PartnerType, TransactionType},
};
use brickyard_db::migration::Migrator;
use brickyard_db::repositories::{
    CreateExpenseInput, EditExpenseInput, ExpenseError, ExpenseRepository,
    PurchaseRawMaterialInput,
};

fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| std::env::var("BRICKYARD__DATABASE__URL").ok())
}

async fn setup() -> Option<DatabaseConnection> {
    let url = database_url()?;
    let db = brickyard_db::connect(&url).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    Some(db)
}

fn expense_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
}

async fn seed_category(db: &DatabaseConnection, name: &str) -> Uuid {
    if let Some(existing) = expense_categories::Entity::find()
        .filter(expense_categories::Column::Name.eq(name))
        .one(db)
        .await
        .expect("query category")
    {
        return existing.id;
    }
    let model = expense_categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("seed category");
    model.id
}

async fn seed_vendor(db: &DatabaseConnection) -> Uuid {
    let now = chrono::Utc::now().into();
    let model = partners::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Test Vendor {}", Uuid::new_v4())),
        partner_type: Set(PartnerType::Vendor),
        phone: Set(None),
        address: Set(None),
        gst_number: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed vendor");
    model.id
}

async fn mirrors_for(
    db: &DatabaseConnection,
    expense_id: Uuid,
) -> Vec<financial_transactions::Model> {
    financial_transactions::Entity::find()
        .filter(financial_transactions::Column::ExpenseId.eq(expense_id))
        .all(db)
        .await
        .expect("query mirrors")
}

#[tokio::test]
async fn test_create_expense_writes_mirror() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    let category_id = seed_category(&db, "Fuel").await;
    let created = repo
        .create_expense(CreateExpenseInput {
            category_id,
            partner_id: None,
            raw_material_id: None,
            amount: dec!(1500),
            expense_date: expense_date(),
            description: Some("Diesel for the kiln".to_string()),
        })
        .await
        .expect("create expense");

    assert_eq!(created.expense.amount, dec!(1500));
    assert_eq!(created.transaction.transaction_type, TransactionType::Expense);
    assert_eq!(created.transaction.amount, dec!(1500));
    assert_eq!(created.transaction.expense_id, Some(created.expense.id));
}

#[tokio::test]
async fn test_raw_material_expense_requires_details() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    let category_id = seed_category(&db, RAW_MATERIAL_CATEGORY).await;
    let err = repo
        .create_expense(CreateExpenseInput {
            category_id,
            partner_id: None,
            raw_material_id: None,
            amount: dec!(100),
            expense_date: expense_date(),
            description: None,
        })
        .await
        .expect_err("must require details");

    assert!(matches!(err, ExpenseError::RawMaterialDetailsRequired));
}

#[tokio::test]
async fn test_edit_expense_moves_mirror_in_lockstep() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    let category_id = seed_category(&db, "Maintenance").await;
    let created = repo
        .create_expense(CreateExpenseInput {
            category_id,
            partner_id: None,
            raw_material_id: None,
            amount: dec!(200),
            expense_date: expense_date(),
            description: Some("Belt replacement".to_string()),
        })
        .await
        .expect("create expense");

    let new_date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
    let updated = repo
        .edit_expense(
            created.expense.id,
            EditExpenseInput {
                amount: dec!(350),
                expense_date: new_date,
                description: Some("Belt and bearings".to_string()),
            },
        )
        .await
        .expect("edit expense");

    assert_eq!(updated.amount, dec!(350));

    let mirrors = mirrors_for(&db, created.expense.id).await;
    assert_eq!(mirrors.len(), 1);
    assert_eq!(mirrors[0].amount, dec!(350));
    assert_eq!(mirrors[0].transaction_date, new_date);
    assert_eq!(mirrors[0].description.as_deref(), Some("Belt and bearings"));
}

#[tokio::test]
async fn test_purchase_restocks_existing_material() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    seed_category(&db, RAW_MATERIAL_CATEGORY).await;
    let vendor_id = seed_vendor(&db).await;

    let now = chrono::Utc::now().into();
    let material = raw_materials::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Clay {}", Uuid::new_v4())),
        unit: Set("ton".to_string()),
        current_stock: Set(dec!(10)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("seed material");

    let created = repo
        .purchase_raw_material(PurchaseRawMaterialInput {
            raw_material_id: Some(material.id),
            name: None,
            unit: None,
            quantity: dec!(5),
            amount: dec!(2500),
            partner_id: vendor_id,
            expense_date: expense_date(),
            description: None,
        })
        .await
        .expect("purchase");

    assert_eq!(created.expense.quantity, Some(dec!(5)));
    assert_eq!(created.expense.rate, Some(dec!(500)));
    assert_eq!(created.transaction.transaction_type, TransactionType::Purchase);

    let restocked = raw_materials::Entity::find_by_id(material.id)
        .one(&db)
        .await
        .expect("query material")
        .expect("material exists");
    assert_eq!(restocked.current_stock, dec!(15));
}

#[tokio::test]
async fn test_purchase_creates_new_material() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    seed_category(&db, RAW_MATERIAL_CATEGORY).await;
    let vendor_id = seed_vendor(&db).await;

    let created = repo
        .purchase_raw_material(PurchaseRawMaterialInput {
            raw_material_id: None,
            name: Some(format!("Sand {}", Uuid::new_v4())),
            unit: Some("ton".to_string()),
            quantity: dec!(8),
            amount: dec!(1600),
            partner_id: vendor_id,
            expense_date: expense_date(),
            description: None,
        })
        .await
        .expect("purchase new");

    let material_id = created.expense.raw_material_id.expect("material linked");
    let material = raw_materials::Entity::find_by_id(material_id)
        .one(&db)
        .await
        .expect("query material")
        .expect("material exists");
    assert_eq!(material.current_stock, dec!(8));
    assert_eq!(created.expense.rate, Some(dec!(200)));
}

#[tokio::test]
async fn test_purchase_zero_quantity_rate_is_zero() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    seed_category(&db, RAW_MATERIAL_CATEGORY).await;
    let vendor_id = seed_vendor(&db).await;

    let created = repo
        .purchase_raw_material(PurchaseRawMaterialInput {
            raw_material_id: None,
            name: Some(format!("Ash {}", Uuid::new_v4())),
            unit: Some("kg".to_string()),
            quantity: dec!(0),
            amount: dec!(100),
            partner_id: vendor_id,
            expense_date: expense_date(),
            description: None,
        })
        .await
        .expect("purchase zero quantity");

    assert_eq!(created.expense.rate, Some(dec!(0)));
}

#[tokio::test]
async fn test_delete_expense_removes_mirrors_first() {
    let Some(db) = setup().await else { return };
    let repo = ExpenseRepository::new(db.clone());

    let category_id = seed_category(&db, "Wages").await;
    let created = repo
        .create_expense(CreateExpenseInput {
            category_id,
            partner_id: None,
            raw_material_id: None,
            amount: dec!(900),
            expense_date: expense_date(),
            description: None,
        })
        .await
        .expect("create expense");

    repo.delete_expense(created.expense.id)
        .await
        .expect("delete expense");

    let gone = expenses::Entity::find_by_id(created.expense.id)
        .one(&db)
        .await
        .expect("query expense");
    assert!(gone.is_none());
    assert!(mirrors_for(&db, created.expense.id).await.is_empty());
}
