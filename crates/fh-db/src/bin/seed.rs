//! # Seed Data Generator
//!
//! Populates a development database with a small grocery catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p fh-db --bin seed
//!
//! # Specify database path
//! cargo run -p fh-db --bin seed -- --db ./data/fh_online.db
//!
//! # Set the store currency as well
//! cargo run -p fh-db --bin seed -- --currency UGX
//! ```
//!
//! ## Generated Items
//! - One item per product and size: `{GROUP}-{PRODUCT}-{SIZE}`
//! - A "Standard Selling" rate for every item except the last of each
//!   group, so unpriced ordering can be tried by hand

use chrono::Utc;
use std::env;

use fh_core::{Item, STANDARD_SELLING_PRICE_LIST};
use fh_db::repository::settings::DEFAULT_CURRENCY_KEY;
use fh_db::{Database, DbConfig};

/// (item group, code prefix, products)
const GROUPS: &[(&str, &str, &[&str])] = &[
    (
        "Dairy",
        "DRY",
        &["Fresh Milk", "Yoghurt", "Butter", "Cheddar Cheese", "Mala"],
    ),
    (
        "Bakery",
        "BKR",
        &["White Bread", "Brown Bread", "Mandazi", "Scones"],
    ),
    (
        "Beverages",
        "BEV",
        &["Mineral Water", "Orange Juice", "Mango Juice", "Black Tea", "Coffee"],
    ),
    (
        "Grains",
        "GRN",
        &["Maize Flour", "Wheat Flour", "Basmati Rice", "Pishori Rice"],
    ),
];

/// (size label, price addon in cents)
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Large", 7500)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./fh_online.db");
    let mut currency: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--currency" => {
                if i + 1 < args.len() {
                    currency = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("FH Online Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./fh_online.db)");
                println!("      --currency <CODE>  Default store currency (default: keep KES)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 FH Online Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if let Some(code) = currency {
        db.settings().set(DEFAULT_CURRENCY_KEY, &code).await?;
        println!("✓ Default currency set to {}", code);
    }

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    let mut priced = 0;

    for (group, prefix, products) in GROUPS {
        for (product_idx, product) in products.iter().enumerate() {
            for (size_name, price_addon) in SIZES {
                let item = build_item(group, prefix, product, size_name);

                if let Err(e) = db.items().upsert(&item).await {
                    eprintln!("Failed to insert {}: {}", item.item_code, e);
                    continue;
                }
                generated += 1;

                // last product of every group stays unpriced
                if product_idx + 1 == products.len() {
                    continue;
                }

                let rate = 4500 + (product_idx as i64 * 2500) + price_addon;
                db.items()
                    .set_selling_rate(&item.item_code, STANDARD_SELLING_PRICE_LIST, rate)
                    .await?;
                priced += 1;
            }
        }
    }

    println!();
    println!("✓ Generated {} items ({} priced)", generated, priced);

    let catalog = db.items().list_catalog().await?;
    println!("  Catalog now lists {} items", catalog.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn build_item(group: &str, prefix: &str, product: &str, size: &str) -> Item {
    let code_part: String = product
        .split_whitespace()
        .map(|w| w.chars().take(3).collect::<String>())
        .collect::<String>()
        .to_uppercase();

    Item {
        item_code: format!("{}-{}-{}", prefix, code_part, size.to_uppercase()),
        item_name: format!("{} ({})", product, size),
        description: Some(format!("{} {}", size, product.to_lowercase())),
        item_group: Some(group.to_string()),
        image: Some(format!(
            "/files/{}.png",
            product.to_lowercase().replace(' ', "-")
        )),
        disabled: false,
        created_at: Utc::now(),
    }
}
