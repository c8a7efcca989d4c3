//! # Demo Catalog Seeder
//!
//! Populates an empty product database with the demo catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (SHOPFRONT_DB_PATH or the platform data dir)
//! cargo run -p shopfront-db --bin seed
//!
//! # Specify database path
//! cargo run -p shopfront-db --bin seed -- --db ./data/ecommerce_db.sqlite
//!
//! # More logging
//! RUST_LOG=debug cargo run -p shopfront-db --bin seed
//! ```

use std::env;

use shopfront_core::filter::category_counts;
use shopfront_db::seed::populate_if_empty;
use shopfront_db::{schema, Database, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug,sqlx=warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopfront Demo Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $SHOPFRONT_DB_PATH or platform data dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env()?,
    };

    println!("🌱 Shopfront Demo Catalog Seeder");
    println!("================================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::open(config).await?;
    let (supported, stored) = schema::status(db.ensure_open().await?).await?;
    println!("✓ Connected to database (schema v{}, file v{})", supported, stored);

    let repo = db.products();
    let inserted = populate_if_empty(&repo).await?;

    if inserted == 0 {
        println!("⚠ Database already has {} products", repo.count().await?);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ Inserted {} demo products", inserted);
    }

    let products = repo.list_all().await?;

    println!();
    println!("Categories:");
    for (category, count) in category_counts(&products) {
        println!("  {:<20} {}", category.name, count);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
