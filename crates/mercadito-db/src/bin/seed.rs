//! # Seed Data Generator
//!
//! Populates a database with sample minimarket products for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p mercadito-db --bin seed
//! cargo run -p mercadito-db --bin seed -- --db ./data/mercadito.db
//! ```

use std::env;

use mercadito_core::{Money, NewProduct};
use mercadito_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Sample catalog: name, code, purchase price, sale price, stock.
/// Fractional stock marks weighable goods (kg).
const PRODUCTS: &[(&str, Option<&str>, i64, i64, f64)] = &[
    ("Pan Amasado", Some("7001"), 300, 500, 40.0),
    ("Leche Entera 1L", Some("7802900000011"), 850, 1200, 24.0),
    ("Huevos Docena", Some("7002"), 2200, 3000, 15.0),
    ("Arroz Granel", None, 800, 1200, 25.5),
    ("Azucar 1kg", Some("7003"), 900, 1300, 18.0),
    ("Aceite Maravilla 1L", Some("7004"), 2400, 3200, 12.0),
    ("Tomate", None, 600, 990, 8.75),
    ("Palta", None, 2800, 4500, 6.2),
    ("Bebida Cola 1.5L", Some("7005"), 1100, 1800, 30.0),
    ("Fideos Espirales 400g", Some("7006"), 650, 950, 22.0),
    ("Queso Laminado 500g", Some("7007"), 3200, 4200, 9.0),
    ("Detergente 1L", Some("7008"), 1800, 2500, 14.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./mercadito_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mercadito Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mercadito_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Mercadito Seed Data Generator");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products; skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let mut inserted = 0;
    for (name, code, purchase, sale, stock) in PRODUCTS {
        let product = NewProduct {
            name: (*name).to_string(),
            code: code.map(str::to_string),
            purchase_price: Money::from_units(*purchase),
            sale_price: Money::from_units(*sale),
            quantity: *stock,
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }
        inserted += 1;
    }

    println!("Inserted {} products", inserted);

    let listed = db.products().list(Some("pan")).await?;
    println!("Filter check 'pan': {} result(s)", listed.len());

    println!("Seed complete");
    Ok(())
}
