//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The repository is injected at construction; the service itself holds no
/// mutable state.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a new product and return its identifier.
    ///
    /// Exactly one document is inserted per successful call. Store failures
    /// propagate unchanged.
    #[instrument(skip(self, request), fields(product_name = %request.name))]
    pub async fn create_product(&self, request: ProductRequest) -> ProductResult<String> {
        request.validate()?;

        let product = self.repository.insert(Product::from(request)).await?;

        product
            .id
            .map(|id| id.to_hex())
            .ok_or_else(|| ProductError::Internal("Store returned no identifier".to_string()))
    }

    /// All stored products, in store order
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
