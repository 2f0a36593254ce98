//! In-memory implementation of ProductRepository

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// Process-local substitute for the record store
///
/// Clones share the same contents. Insertion order is the listing order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`ProductError::StoreUnavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    fn check_available(&self) -> ProductResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProductError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, mut product: Product) -> ProductResult<Product> {
        self.check_available()?;

        let id = ObjectId::new();
        product.id = Some(id);
        self.products.write().await.push(product.clone());

        tracing::info!(product_id = %id, "Product created successfully");
        Ok(product)
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.check_available()?;
        Ok(self.products.read().await.clone())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        self.check_available()?;

        let mut products = self.products.write().await;
        let deleted = products.len() as u64;
        products.clear();
        Ok(deleted)
    }
}
