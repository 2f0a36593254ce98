//! Product API routes

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository =
        MongoProductRepository::with_collection(&state.db, &state.config.products_collection);
    let service = ProductService::new(repository);
    handlers::router(service)
}
