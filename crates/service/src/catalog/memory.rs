use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::domain::{Product, ProductInput, ProductPatch};
use crate::catalog::repository::ProductRepository;
use crate::catalog::IdStrategy;
use crate::errors::ServiceError;

struct Inner {
    products: Vec<Product>,
    /// Only consulted by [`IdStrategy::Monotonic`]; `None` once `u64::MAX` was handed out.
    next_id: Option<u64>,
}

impl Inner {
    fn position(&self, id: u64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn assign_id(&mut self, strategy: IdStrategy) -> Result<u64, ServiceError> {
        let id = match strategy {
            IdStrategy::LastPlusOne => successor(self.products.last().map(|p| p.id)),
            IdStrategy::MaxPlusOne => successor(max_id(&self.products)),
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id = id.and_then(|n| n.checked_add(1));
                id
            }
        };
        id.ok_or(ServiceError::IdsExhausted)
    }
}

fn max_id(products: &[Product]) -> Option<u64> {
    products.iter().map(|p| p.id).max()
}

/// `base + 1`, or 1 for an empty collection; `None` on overflow.
fn successor(base: Option<u64>) -> Option<u64> {
    base.map_or(Some(1), |id| id.checked_add(1))
}

/// Ordered in-memory product collection behind a single lock.
///
/// Every operation takes the lock for its whole duration, so no two
/// mutations interleave even on a multi-threaded runtime.
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
    strategy: IdStrategy,
}

impl InMemoryProductStore {
    /// Empty store.
    pub fn new(strategy: IdStrategy) -> Arc<Self> {
        Self::build(Vec::new(), strategy)
    }

    /// Store preloaded with `products` in the given order. Duplicate ids are rejected.
    pub fn with_products(products: Vec<Product>, strategy: IdStrategy) -> Result<Arc<Self>, ServiceError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(ServiceError::Seed(format!("duplicate product id {}", dup.id)));
        }
        Ok(Self::build(products, strategy))
    }

    fn build(products: Vec<Product>, strategy: IdStrategy) -> Arc<Self> {
        let next_id = successor(max_id(&products));
        Arc::new(Self { inner: RwLock::new(Inner { products, next_id }), strategy })
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn list(&self) -> Vec<Product> {
        let inner = self.inner.read().await;
        inner.products.clone()
    }

    async fn get(&self, id: u64) -> Result<Product, ServiceError> {
        let inner = self.inner.read().await;
        inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        let id = inner.assign_id(self.strategy)?;
        let product = input.into_product(id);
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id).ok_or_else(|| ServiceError::not_found("product", id))?;
        let existing = &mut inner.products[idx];
        existing.apply(patch);
        Ok(existing.clone())
    }

    async fn delete(&self, id: u64) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id).ok_or_else(|| ServiceError::not_found("product", id))?;
        Ok(inner.products.remove(idx))
    }

    async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }
}
