//! # Demo Catalog
//!
//! The bundled products the list page shows on a fresh install.
//!
//! ```text
//! list page mounts
//!       │
//!       ▼
//! populate_if_empty(&repo)
//!       ├── count() > 0  → 0, nothing inserted
//!       └── count() == 0 → insert every DEMO_PRODUCTS entry
//! ```
//!
//! Image paths are relative to the site root, so the demo records are stored
//! as-is and never pass through form validation.

use tracing::{info, warn};

use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use shopfront_core::{PriceInput, ProductFormData};

/// One demo product: (name, slug, category, price, image path, description).
type DemoProduct = (&'static str, &'static str, &'static str, f64, &'static str, &'static str);

/// The demo catalog, in insertion order.
pub const DEMO_PRODUCTS: &[DemoProduct] = &[
    (
        "Sony WH-1000XM5 Noise Cancelling Headphones",
        "sony-wh-1000xm5-noise-cancelling-headphones",
        "Electronics",
        250000.0,
        "/images/sony-headphone.jpg",
        "Industry-leading noise cancellation with crystal-clear call quality and comfortable design. Perfect for travel and daily commute.",
    ),
    (
        "Apple Watch Series 9 GPS",
        "apple-watch-series-9-gps",
        "Electronics",
        450000.0,
        "/images/apple-watch.jpg",
        "Advanced health features, brighter display, and powerful new ways to interact with your watch. Track your fitness and stay connected.",
    ),
    (
        "Genuine Leather Bi-Fold Wallet",
        "genuine-leather-bi-fold-wallet",
        "Accessories",
        12000.0,
        "/images/genuine-leather-wallet.jpg",
        "Slim and stylish wallet with RFID blocking technology, perfect for everyday use. Durable and elegant.",
    ),
    (
        "Organic Cotton Crewneck T-Shirt",
        "organic-cotton-crewneck-t-shirt",
        "Apparel",
        8500.0,
        "/images/cotton-crewneck-t-shirt.jpg",
        "Eco-friendly and incredibly soft, this classic unisex t-shirt is a wardrobe essential. Available in multiple colors.",
    ),
    (
        "Herman Miller Aeron Ergonomic Office Chair",
        "herman-miller-aeron-ergonomic-office-chair",
        "Furniture",
        750000.0,
        "/images/herman-ergonomic-office-chair.jpg",
        "The benchmark for ergonomic seating, designed for comfort and optimal support during long working hours. Fully adjustable.",
    ),
    (
        "Anker PowerCore III Elite 20000mAh Power Bank",
        "anker-powercore-iii-elite-20000mah-power-bank",
        "Electronics",
        18000.0,
        "/images/anker-power-bank.jpg",
        "Ultra-high capacity portable charger with PowerIQ 3.0 for rapid charging of multiple devices. Essential for travel.",
    ),
    (
        "Vintage Leather Travel Backpack",
        "vintage-leather-travel-backpack",
        "Accessories",
        35000.0,
        "/images/vintage-leather-backpack.jpg",
        "Stylish and durable backpack, perfect for daily commute or weekend getaways. Features multiple compartments and robust zippers.",
    ),
    (
        "Dell XPS 15 High-Performance Gaming Laptop",
        "dell-xps-15-high-performance-gaming-laptop",
        "Electronics",
        1200000.0,
        "/images/dell_laptop.jpg",
        "Experience immersive gaming and demanding tasks with cutting-edge graphics and lightning-fast processing. Sleek design and powerful performance.",
    ),
    (
        "Bose QuietComfort Earbuds II",
        "bose-quietcomfort-earbuds-ii",
        "Electronics",
        75000.0,
        "/images/bose-earbuds.jpg",
        "Compact and powerful earbuds with active noise cancellation for on-the-go listening. Exceptional sound quality and comfortable fit.",
    ),
    (
        "Ray-Ban Wayfarer Classic Sunglasses",
        "ray-ban-wayfarer-classic-sunglasses",
        "Accessories",
        15000.0,
        "/images/ray-sunglasses.jpg",
        "Protect your eyes with style. Iconic design with UV400 protection and lightweight frame. A timeless accessory.",
    ),
    (
        "Stainless Steel Water Bottle",
        "stainless-steel-water-bottle",
        "Home Goods",
        4500.0,
        "/images/stainless-steel-water-bottle.jpg",
        "Keep your drinks cold for 24 hours or hot for 12. Durable and eco-friendly, perfect for gym or office.",
    ),
    (
        "Yoga Mat Non-Slip Eco-Friendly",
        "yoga-mat-non-slip-eco-friendly",
        "Sports & Outdoors",
        7000.0,
        "/images/yoga-mat.jpg",
        "Premium yoga mat made from natural rubber, providing excellent grip and comfort for all yoga styles.",
    ),
    (
        "Coffee Maker Drip with Timer",
        "coffee-maker-drip-with-timer",
        "Home Goods",
        15000.0,
        "/images/drip-with-timer.jpg",
        "Programmable coffee maker with a 12-cup capacity and a built-in timer for fresh coffee every morning.",
    ),
    (
        "Digital Camera Mirrorless APS-C",
        "digital-camera-mirrorless-aps-c",
        "Electronics",
        800000.0,
        "/images/digital-camera.jpg",
        "Capture stunning photos and 4K videos with this compact and powerful mirrorless camera. Ideal for enthusiasts.",
    ),
    (
        "Portable Bluetooth Speaker",
        "portable-bluetooth-speaker",
        "Electronics",
        22000.0,
        "/images/bluetooth-speaker.jpg",
        "Enjoy high-quality audio on the go with this compact and waterproof Bluetooth speaker. Long battery life.",
    ),
    (
        "Gardening Tool Set (5-Piece)",
        "gardening-tool-set-5-piece",
        "Home Goods",
        9500.0,
        "/images/gardening-tool-set.jpg",
        "Essential tools for every gardener: trowel, transplanter, cultivator, pruning shears, and gloves. Durable and comfortable.",
    ),
    (
        "Fitness Tracker with GPS",
        "fitness-tracker-with-gps",
        "Sports & Outdoors",
        30000.0,
        "/images/fitness-tracker.jpg",
        "Monitor your steps, heart rate, sleep, and track your routes with built-in GPS. Stay motivated on your fitness journey.",
    ),
    (
        "Wireless Bluetooth Headphones",
        "wireless-bluetooth-headphones",
        "Electronics",
        25000.0,
        "/images/headphones.jpg",
        "High-fidelity sound with comfortable over-ear design and long-lasting battery.",
    ),
    (
        "Smartwatch with Heart Rate Monitor",
        "smartwatch-with-heart-rate-monitor",
        "Electronics",
        45000.0,
        "/images/smart-watch.jpg",
        "Track your fitness, receive notifications, and monitor your health with this sleek smartwatch.",
    ),
    (
        "Classic Leather Wallet",
        "classic-leather-wallet",
        "Accessories",
        12000.0,
        "/images/wallet.jpg",
        "Handcrafted from genuine leather, featuring multiple card slots and a coin pouch.",
    ),
    (
        "Organic Cotton T-Shirt",
        "organic-cotton-t-shirt",
        "Apparel",
        8500.0,
        "/images/organic-cotton.jpg",
        "Soft and breathable 100% organic cotton t-shirt, perfect for everyday wear.",
    ),
    (
        "Ergonomic Office Chair",
        "ergonomic-office-chair",
        "Furniture",
        75000.0,
        "/images/office-chair.jpg",
        "Designed for maximum comfort and support during long working hours. Adjustable height and lumbar support.",
    ),
    (
        "Portable Power Bank 20000mAh",
        "portable-power-bank-20000mah",
        "Electronics",
        18000.0,
        "/images/powerbank.jpg",
        "High-capacity power bank to keep your devices charged on the go. Fast charging support.",
    ),
];

/// Builds the form data for every demo product.
pub fn demo_forms() -> Vec<ProductFormData> {
    DEMO_PRODUCTS
        .iter()
        .map(|&(name, slug, category, price, image_url, description)| ProductFormData {
            name: name.to_string(),
            description: description.to_string(),
            price: PriceInput::Number(price),
            category: category.to_string(),
            image_url: image_url.to_string(),
            slug: Some(slug.to_string()),
        })
        .collect()
}

/// Inserts the demo catalog when the store holds no products.
///
/// ## Returns
/// How many products were inserted (0 when the catalog was not empty).
pub async fn populate_if_empty(repo: &ProductRepository) -> DbResult<usize> {
    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping demo data");
        return Ok(0);
    }

    let mut inserted = 0;
    for form in demo_forms() {
        if let Err(err) = repo.insert(&form).await {
            warn!(name = %form.name, error = %err, "Failed to insert demo product");
            return Err(err);
        }
        inserted += 1;
    }

    info!(inserted, "Demo catalog inserted");
    Ok(inserted)
}

// =============================================================================
// Unit Tests
// =============================================================================
