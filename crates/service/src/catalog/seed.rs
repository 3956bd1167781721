use std::{path::Path, sync::Arc};

use tracing::info;

use crate::catalog::{domain::Product, memory::InMemoryProductStore, IdStrategy};
use crate::errors::ServiceError;

fn item(id: u64, name: &str, category: &str, description: &str, price: f64, stock: i64, image: &str) -> Product {
    Product {
        id,
        name: name.into(),
        category: category.into(),
        description: description.into(),
        price,
        stock,
        image: image.into(),
    }
}

/// Built-in catalog, ids 1..=10.
pub fn default_products() -> Vec<Product> {
    vec![
        item(1, "Smartphone X", "Phones", "Powerful smartphone with a great camera", 50000.0, 10, "/images/phone.jpg"),
        item(2, "Laptop Pro", "Computers", "For work and gaming", 120000.0, 5, "/images/laptop.jpg"),
        item(3, "Headphones Air", "Audio", "Wireless headphones", 15000.0, 20, "/images/headphones.jpg"),
        item(4, "Smart Watch", "Gadgets", "Fitness tracker", 10000.0, 15, "/images/watch.jpg"),
        item(5, "Camera 4K", "Photo", "Professional camera", 80000.0, 3, "/images/camera.jpg"),
        item(6, "Tablet Mini", "Tablets", "Compact tablet", 30000.0, 8, "/images/tablet.jpg"),
        item(7, "Monitor 27\"", "Computers", "IPS panel", 25000.0, 12, "/images/monitor.jpg"),
        item(8, "Mech Keyboard", "Accessories", "RGB backlight", 8000.0, 25, "/images/keyboard.jpg"),
        item(9, "Gaming Mouse", "Accessories", "High DPI", 5000.0, 30, "/images/mouse.jpg"),
        item(10, "Bass Speaker", "Audio", "Powerful sound", 12000.0, 18, "/images/speaker.jpg"),
    ]
}

/// Read a JSON array of products.
pub async fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Product>, ServiceError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ServiceError::Seed(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Seed(format!("invalid seed {}: {}", path.display(), e)))
}

/// Build the store from the seed file if one is configured, otherwise from
/// [`default_products`].
pub async fn build_store(seed_path: Option<&str>, strategy: IdStrategy) -> Result<Arc<InMemoryProductStore>, ServiceError> {
    let products = match seed_path {
        Some(path) => load_seed_file(path).await?,
        None => default_products(),
    };
    let count = products.len();
    let store = InMemoryProductStore::with_products(products, strategy)?;
    info!(count, strategy = ?store.strategy(), source = seed_path.unwrap_or("built-in"), "catalog seeded");
    Ok(store)
}
