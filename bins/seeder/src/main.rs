//! Database seeder for Brickyard development and testing.
//!
//! Seeds partners, product types, storage locations, production batches,
//! and expense categories for local development.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use brickyard_db::entities::{
    expense_categories::{self, RAW_MATERIAL_CATEGORY},
    partners, product_types, production_batches,
    sea_orm_active_enums::PartnerType,
    storage_locations,
};

/// Test customer ID (consistent for all seeds)
const TEST_CUSTOMER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test vendor ID (consistent for all seeds)
const TEST_VENDOR_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Main yard storage location ID (consistent for all seeds)
const MAIN_YARD_ID: &str = "00000000-0000-0000-0000-000000000003";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = brickyard_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding partners...");
    seed_partners(&db).await;

    println!("Seeding storage locations...");
    seed_storage_locations(&db).await;

    println!("Seeding product types...");
    seed_product_types(&db).await;

    println!("Seeding production batches...");
    seed_production_batches(&db).await;

    println!("Seeding expense categories...");
    seed_expense_categories(&db).await;

    println!("Seeding complete!");
}

fn test_customer_id() -> Uuid {
    Uuid::parse_str(TEST_CUSTOMER_ID).unwrap()
}

fn test_vendor_id() -> Uuid {
    Uuid::parse_str(TEST_VENDOR_ID).unwrap()
}

fn main_yard_id() -> Uuid {
    Uuid::parse_str(MAIN_YARD_ID).unwrap()
}

/// Seeds a test customer and a test vendor.
async fn seed_partners(db: &DatabaseConnection) {
    let partners_data = [
        (
            test_customer_id(),
            "Test Builders & Co",
            PartnerType::Customer,
        ),
        (test_vendor_id(), "Test Clay Supplies", PartnerType::Vendor),
    ];

    for (id, name, partner_type) in partners_data {
        if partners::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Partner {name} already exists, skipping...");
            continue;
        }

        let partner = partners::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            partner_type: Set(partner_type),
            phone: Set(None),
            address: Set(None),
            gst_number: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = partner.insert(db).await {
            eprintln!("Failed to insert partner {name}: {e}");
        } else {
            println!("  Created partner: {name}");
        }
    }
}

/// Seeds the main yard storage location.
async fn seed_storage_locations(db: &DatabaseConnection) {
    if storage_locations::Entity::find_by_id(main_yard_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Main Yard already exists, skipping...");
        return;
    }

    let location = storage_locations::ActiveModel {
        id: Set(main_yard_id()),
        name: Set("Main Yard".to_string()),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = location.insert(db).await {
        eprintln!("Failed to insert storage location: {e}");
    } else {
        println!("  Created storage location: Main Yard");
    }
}

/// Seeds brick products and a transport service.
async fn seed_product_types(db: &DatabaseConnection) {
    // name, hsn/sac, is_service, cgst, sgst, igst (percent)
    let products = [
        ("Red Brick (First Class)", "6904", false, "9", "9", "0"),
        ("Red Brick (Second Class)", "6904", false, "9", "9", "0"),
        ("Fly Ash Brick", "6815", false, "6", "6", "0"),
        ("Transport Charge", "9965", true, "9", "9", "0"),
    ];

    let mut inserted = 0;
    for (name, hsn_number, is_service, cgst, sgst, igst) in products {
        let existing = product_types::Entity::find()
            .filter(product_types::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            continue;
        }

        let product = product_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            hsn_number: Set(Some(hsn_number.to_string())),
            is_service: Set(is_service),
            cgst_rate: Set(Decimal::from_str(cgst).unwrap()),
            sgst_rate: Set(Decimal::from_str(sgst).unwrap()),
            igst_rate: Set(Decimal::from_str(igst).unwrap()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = product.insert(db).await {
            eprintln!("Failed to insert product type {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} product types");
}

/// Seeds one full production batch per physical product.
async fn seed_production_batches(db: &DatabaseConnection) {
    let products = product_types::Entity::find()
        .filter(product_types::Column::IsService.eq(false))
        .all(db)
        .await
        .unwrap_or_default();

    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for (index, product) in products.iter().enumerate() {
        let batch_number = format!("BATCH-{:03}", index + 1);

        let existing = production_batches::Entity::find()
            .filter(production_batches::Column::BatchNumber.eq(batch_number.clone()))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            continue;
        }

        let batch = production_batches::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_type_id: Set(product.id),
            storage_location_id: Set(Some(main_yard_id())),
            batch_number: Set(batch_number),
            quantity: Set(10_000),
            remaining_quantity: Set(10_000),
            manufactured_on: Set(Some(today)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = batch.insert(db).await {
            eprintln!("Failed to insert batch for {}: {e}", product.name);
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} production batches");
}

/// Seeds expense categories, including the distinguished raw-material one.
async fn seed_expense_categories(db: &DatabaseConnection) {
    let categories = [
        RAW_MATERIAL_CATEGORY,
        "Labour",
        "Fuel",
        "Machinery Maintenance",
        "Miscellaneous",
    ];

    let mut inserted = 0;
    for name in categories {
        let existing = expense_categories::Entity::find()
            .filter(expense_categories::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            continue;
        }

        let category = expense_categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = category.insert(db).await {
            eprintln!("Failed to insert expense category {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} expense categories");
}
