use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Implementations translate between [`Product`] and the backing store and
/// hold no other logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the returned copy carries the store-assigned id
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Every stored product, in store order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Remove every stored product, returning how many were removed.
    ///
    /// Reset hook for test harnesses; no HTTP route reaches it.
    async fn delete_all(&self) -> ProductResult<u64>;
}
