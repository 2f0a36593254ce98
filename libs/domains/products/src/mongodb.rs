//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// Default collection holding product documents
pub const DEFAULT_COLLECTION: &str = "product";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, mut product: Product) -> ProductResult<Product> {
        let result = self.collection.insert_one(&product).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            ProductError::Internal(format!(
                "Unexpected identifier type: {}",
                result.inserted_id
            ))
        })?;
        product.id = Some(id);

        tracing::info!(product_id = %id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        tracing::debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;

        tracing::info!(deleted = result.deleted_count, "Product collection cleared");
        Ok(result.deleted_count)
    }
}
