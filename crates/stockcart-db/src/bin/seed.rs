//! # Seed Data Generator
//!
//! Populates the SQLite catalog with sample shoes and stock levels.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p stockcart-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockcart-db --bin seed -- --db ./data/stockcart.db
//!
//! # Replace existing rows
//! cargo run -p stockcart-db --bin seed -- --force
//! ```
//!
//! ## Generated Catalog
//! Product ids start at 1. Each model is priced from a decimal string so the
//! seed goes through the same exact parsing as the HTTP catalog. Some stock
//! levels are deliberately 0 or 1 to exercise the stock-exceeded paths.

use std::env;

use stockcart_core::{Money, Product, ProductId};
use stockcart_db::{Database, DbConfig};

/// (title, price, stock)
const SHOES: &[(&str, &str, i64)] = &[
    ("Tênis de Caminhada Leve Confortável", "179.90", 3),
    ("Tênis VR Caminhada Confortável Detalhes Couro Masculino", "139.90", 5),
    ("Tênis Adidas Duramo Lite 2.0", "219.90", 2),
    ("Tênis Nike Revolution 5", "199.90", 1),
    ("Tênis Olympikus Corre 2", "159.90", 7),
    ("Tênis Mizuno Wave Prophecy", "899.90", 0),
    ("Tênis Asics Gel Nimbus", "749.00", 4),
    ("Tênis Fila Float Maxxi", "299.99", 10),
];

const IMAGE_BASE: &str = "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockcart_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-f" | "--force" => force = true,
            "-h" | "--help" => {
                println!("Stockcart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockcart_dev.db)");
                println!("  -f, --force        Overwrite existing products and stock");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockcart Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let catalog = db.catalog();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = catalog.count().await?;
    if existing > 0 && !force {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed. Pass --force to overwrite.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    for (index, (title, price, stock)) in SHOES.iter().enumerate() {
        let id = ProductId::new(index as u64 + 1);
        let product = Product {
            id,
            title: title.to_string(),
            image: format!("{}/tenis{}.jpg", IMAGE_BASE, index % 3 + 1),
            price: Money::parse_decimal(price)?,
        };

        if let Err(e) = catalog.upsert_product(&product).await {
            eprintln!("Failed to insert {}: {}", id, e);
            continue;
        }
        if let Err(e) = catalog.set_stock(id, *stock).await {
            eprintln!("Failed to set stock for {}: {}", id, e);
            continue;
        }

        println!("  #{:<3} {:<58} {:>8}  stock {}", id, title, product.price, stock);
        generated += 1;
    }

    println!();
    println!("✓ Seeded {} products", generated);

    db.close().await;
    Ok(())
}
