use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::catalog::domain::{Product, ProductInput, ProductPatch};
use crate::catalog::repository::ProductRepository;
use crate::errors::ServiceError;

/// Application service over a [`ProductRepository`]. Adds structured
/// logging; the repository decides the storage rules.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Vec<Product> {
        let products = self.repo.list().await;
        debug!(count = products.len(), "list products");
        products
    }

    pub async fn get(&self, id: u64) -> Result<Product, ServiceError> { self.repo.get(id).await }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let product = self.repo.create(input).await?;
        info!(id = product.id, "created product");
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        if patch.is_empty() {
            debug!("empty patch");
        }
        let product = self.repo.update(id, patch).await?;
        info!("updated product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<Product, ServiceError> {
        let removed = self.repo.delete(id).await?;
        info!(name = %removed.name, "deleted product");
        Ok(removed)
    }

    pub async fn count(&self) -> usize { self.repo.len().await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed::default_products, InMemoryProductStore, IdStrategy};

    fn service() -> ProductService {
        let store = InMemoryProductStore::with_products(default_products(), IdStrategy::MaxPlusOne).unwrap();
        ProductService::new(store)
    }

    #[tokio::test]
    async fn crud_round_through_service() -> Result<(), anyhow::Error> {
        let svc = service();
        assert_eq!(svc.count().await, 10);

        let created = svc.create(ProductInput { name: "X".into(), price: 9.99, ..Default::default() }).await?;
        assert_eq!(created.id, 11);
        assert_eq!(svc.get(11).await?, created);

        let updated = svc.update(11, ProductPatch { stock: Some(3), ..Default::default() }).await?;
        assert_eq!(updated.stock, 3);
        assert_eq!(updated.price, 9.99);

        let removed = svc.delete(11).await?;
        assert_eq!(removed.id, 11);
        assert_eq!(svc.count().await, 10);
        assert!(svc.get(11).await.unwrap_err().is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let svc = service();
        svc.create(ProductInput::default()).await.unwrap();
        let ids: Vec<u64> = svc.list().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }
}
