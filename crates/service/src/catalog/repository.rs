use async_trait::async_trait;

use crate::catalog::domain::{Product, ProductInput, ProductPatch};
use crate::errors::ServiceError;

/// Storage seam for products. `list` cannot fail and `create` fails only when
/// no id is left to assign; lookups by id report [`ServiceError::NotFound`]
/// and leave the collection untouched.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Vec<Product>;
    async fn get(&self, id: u64) -> Result<Product, ServiceError>;
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError>;
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError>;
    /// Returns the removed product.
    async fn delete(&self, id: u64) -> Result<Product, ServiceError>;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
