use serde::{Deserialize, Serialize};

/// A catalog entry. `id` is owned by the store and never taken from clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    /// Path under the images route, e.g. `/images/phone.jpg`. Not checked.
    pub image: String,
}

/// Create payload. Every field is optional and defaults to empty / zero;
/// an `id` in the request body is dropped during deserialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image: String,
}

impl ProductInput {
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
        }
    }
}

/// Partial update. Only `Some` fields are written; `id` cannot be patched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image.is_none()
    }
}

impl Product {
    /// Shallow merge: each supplied field overwrites, the rest stay as they are.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(category) = patch.category { self.category = category; }
        if let Some(description) = patch.description { self.description = description; }
        if let Some(price) = patch.price { self.price = price; }
        if let Some(stock) = patch.stock { self.stock = stock; }
        if let Some(image) = patch.image { self.image = image; }
    }
}
