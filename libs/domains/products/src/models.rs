use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity as stored in the `product` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, `None` until inserted
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    /// Kept as a decimal string in the document so the amount stays exact
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl Product {
    /// A product not yet persisted
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl From<ProductRequest> for Product {
    fn from(request: ProductRequest) -> Self {
        Product::new(request.name, request.description, request.price)
    }
}

/// DTO for creating a product
///
/// `price` accepts a JSON number or a numeric string. Numbers are read from
/// their literal digits, never through `f64`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

/// Product as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// Hex-encoded ObjectId
    #[schema(example = "65f1c0a2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub name: String,
    pub description: String,
    /// JSON number carrying the stored digits and scale
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Body of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCreated {
    #[schema(example = "65f1c0a2e4b0a1b2c3d4e5f6")]
    pub id: String,
}
