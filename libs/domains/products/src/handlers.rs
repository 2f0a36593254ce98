//! HTTP handlers for Products API

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, JsonExtractionResponse,
        ServiceUnavailableResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{ProductCreated, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(get_all_products, create_product),
    components(
        schemas(ProductRequest, ProductResponse, ProductCreated),
        responses(
            BadRequestValidationResponse,
            JsonExtractionResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_all_products::<R>).post(create_product::<R>))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All stored products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.get_all_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductCreated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = JsonExtractionResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductRequest>,
) -> ProductResult<impl IntoResponse> {
    let id = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductCreated { id })))
}
