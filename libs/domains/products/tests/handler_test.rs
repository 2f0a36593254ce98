//! Handler tests for Products domain
//!
//! These tests drive the products router directly, backed by the in-memory
//! store:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes and error bodies

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: &InMemoryProductRepository) -> Router {
    handlers::router(ProductService::new(repo.clone()))
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_all() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_product_handler_returns_201_with_id() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "Test Product",
            "description": "Test Description",
            "price": 20.00
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ProductCreated = json_body(response.into_body()).await;
    assert_eq!(created.id.len(), 24);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_created_product_is_listed() {
    let repo = InMemoryProductRepository::new();
    let builder = TestDataBuilder::from_test_name("handler_created_listed");
    let name = builder.name("product", "main");

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": name,
            "description": "listed",
            "price": "12.34"
        })))
        .await
        .unwrap();
    let created: ProductCreated = json_body(response.into_body()).await;

    let response = app(&repo).oneshot(get_all()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, created.id);
    assert_eq!(products[0].name, name);
    assert_eq!(products[0].description, "listed");
    assert_eq!(products[0].price, Decimal::new(1234, 2));
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo).oneshot(get_all()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_price_is_json_number() {
    let repo = InMemoryProductRepository::new();
    repo.insert(Product::new("p", "d", Decimal::new(150, 2)))
        .await
        .unwrap();

    let response = app(&repo).oneshot(get_all()).await.unwrap();

    let body: Value = json_body(response.into_body()).await;
    assert!(body[0]["price"].is_number());
    assert_eq!(body[0]["price"].to_string(), "1.50");
    assert!(body[0]["id"].is_string());
}

#[tokio::test]
async fn test_price_beyond_f64_precision_round_trips() {
    let expected = Decimal::from_str("12345678901234567.89").unwrap();

    for price in ["12345678901234567.89", "\"12345678901234567.89\""] {
        let repo = InMemoryProductRepository::new();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(format!(
                r#"{{"name":"big","description":"","price":{price}}}"#
            )))
            .unwrap();

        let response = app(&repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app(&repo).oneshot(get_all()).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let raw = std::str::from_utf8(&bytes).unwrap();
        assert!(raw.contains(r#""price":12345678901234567.89"#), "{raw}");

        let products: Vec<ProductResponse> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(products[0].price, expected);
    }
}

#[tokio::test]
async fn test_create_with_empty_description_round_trips() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "No description",
            "description": "",
            "price": 3
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app(&repo).oneshot(get_all()).await.unwrap();
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products[0].description, "");
}

#[tokio::test]
async fn test_create_product_handler_validates_name() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "",  // Invalid!
            "description": "d",
            "price": 1
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_product_missing_field_is_client_error() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "p",
            "description": "d"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_product_mistyped_price_is_client_error() {
    let repo = InMemoryProductRepository::new();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "p",
            "description": "d",
            "price": "twenty"
        })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_product_malformed_json_is_400() {
    let repo = InMemoryProductRepository::new();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_unavailable_maps_to_503() {
    let repo = InMemoryProductRepository::new();
    repo.set_unavailable(true);

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": "p",
            "description": "d",
            "price": 1
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app(&repo).oneshot(get_all()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "DATABASE_UNAVAILABLE");
}

#[tokio::test]
async fn test_list_is_repeatable() {
    let repo = InMemoryProductRepository::new();
    let builder = TestDataBuilder::from_test_name("handler_repeatable");
    for index in 0..3 {
        repo.insert(Product::new(
            builder.name("product", &index.to_string()),
            "",
            builder.price(index).parse().unwrap(),
        ))
        .await
        .unwrap();
    }

    let first: Vec<ProductResponse> =
        json_body(app(&repo).oneshot(get_all()).await.unwrap().into_body()).await;
    let second: Vec<ProductResponse> =
        json_body(app(&repo).oneshot(get_all()).await.unwrap().into_body()).await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

// Create one product then list the store
async fn create_then_list(
    name: &str,
    description: &str,
    price: Decimal,
) -> (StatusCode, ProductCreated, Vec<ProductResponse>) {
    let repo = InMemoryProductRepository::new();
    let price = serde_json::Number::from_str(&price.to_string()).unwrap();

    let response = app(&repo)
        .oneshot(post_json(json!({
            "name": name,
            "description": description,
            "price": price
        })))
        .await
        .unwrap();
    let status = response.status();
    let created: ProductCreated = json_body(response.into_body()).await;

    let response = app(&repo).oneshot(get_all()).await.unwrap();
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;

    (status, created, products)
}

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..=10).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Any valid product comes back from the listing exactly as it was sent.
    #[test]
    fn created_product_lists_back_unchanged(
        name in "\\PC{1,40}",
        description in "\\PC{0,40}",
        price in price_strategy()
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (status, created, products) =
            runtime.block_on(create_then_list(&name, &description, price));

        prop_assert_eq!(status, StatusCode::CREATED);
        prop_assert_eq!(created.id.len(), 24);
        prop_assert!(created.id.chars().all(|c| c.is_ascii_hexdigit()));

        prop_assert_eq!(products.len(), 1);
        prop_assert_eq!(&products[0].id, &created.id);
        prop_assert_eq!(&products[0].name, &name);
        prop_assert_eq!(&products[0].description, &description);
        prop_assert_eq!(products[0].price, price);
        prop_assert_eq!(products[0].price.to_string(), price.to_string());
    }
}
