//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default)
//! cargo run -p shelf-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p shelf-db --bin seed -- --db ./data/shelf.db
//! ```
//!
//! Each product has:
//! - Unique SKU: `{CATEGORY}-{NAME}-{INDEX}`
//! - One to three unique barcodes
//! - A color and a size attribute
//! - Price between 1.99 and 9.99 plus a size addon

use std::env;

use shelf_core::{NewProduct, ProductAttribute, ProductField, ProductQuery};
use shelf_db::{Database, DbConfig};

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "KIT",
        &[
            "Mug", "Teapot", "Bowl", "Plate", "Ladle", "Whisk", "Colander", "Kettle",
        ],
    ),
    (
        "OFF",
        &[
            "Notebook", "Stapler", "Pen Set", "Desk Lamp", "Folder", "Marker", "Ruler",
        ],
    ),
    (
        "GAR",
        &[
            "Trowel", "Watering Can", "Planter", "Hose", "Gloves", "Rake", "Shears",
        ],
    ),
];

/// Size variants with their price addon in cents
const SIZES: &[(&str, u32)] = &[("S", 0), ("M", 100), ("L", 200), ("XL", 350)];

const COLORS: &[&str] = &["red", "blue", "green", "black", "white"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./shelf_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./shelf_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shelf Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();

    println!("✓ Connected to database");
    println!("✓ Schema ready");

    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category_code, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (size_idx, size) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + name_idx * 20 + size_idx;
                let product = generate_product(category_code, name, *size, seed);

                if let Err(e) = products.create_product(&product).await {
                    eprintln!("Failed to insert {}: {}", product.sku, e);
                    continue;
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    // Spot-check a sparse read
    println!();
    println!("Verifying reads...");
    let page = products
        .list_products(
            &ProductQuery::page(0, 5).fields([ProductField::Sku, ProductField::Barcodes]),
        )
        .await?;
    println!("  First page: {} of {} products", page.products.len(), page.total);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(category: &str, name: &str, size: (&str, u32), seed: usize) -> NewProduct {
    let (size_name, price_addon) = size;

    let code: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let sku = format!("{}-{}-{:04}", category, code, seed);

    // EAN-13 shaped, checksum not valid
    let barcodes = (0..=seed % 3)
        .map(|n| format!("590{:09}{}", seed, n))
        .collect();

    // 1.99 - 9.99 plus size addon
    let cents = 199 + ((seed * 17) % 800) as u32 + price_addon;
    let price = format!("{}.{:02}", cents / 100, cents % 100);

    NewProduct {
        title: format!("{} {}", name, size_name),
        sku,
        price,
        description: (seed % 4 == 0).then(|| format!("{} in size {}", name, size_name)),
        barcodes,
        attributes: vec![
            ProductAttribute::new("color", COLORS[seed % COLORS.len()]),
            ProductAttribute::new("size", size_name),
        ],
    }
}
