//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the product service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Service API",
        version = "0.1.0",
        description = "Create and list product records"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/product", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let path = doc
            .paths
            .paths
            .get("/api/product")
            .expect("product path documented");

        assert!(path.get.is_some());
        assert!(path.post.is_some());
    }

    #[test]
    fn test_schemas_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;

        assert!(schemas.contains_key("ProductRequest"));
        assert!(schemas.contains_key("ProductResponse"));
        assert!(schemas.contains_key("ProductCreated"));
    }
}
