use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Environment variable naming the single allowed browser origin.
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer for the given origin.
///
/// Allows GET, POST and OPTIONS with JSON content headers and a 1 hour max age.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Reads `CORS_ALLOWED_ORIGIN`; `Ok(None)` when unset.
pub fn cors_from_env() -> std::io::Result<Option<CorsLayer>> {
    cors_for_origin(std::env::var(CORS_ALLOWED_ORIGIN).ok().as_deref())
}

/// Builds the CORS layer for an optional origin value.
pub fn cors_for_origin(origin: Option<&str>) -> std::io::Result<Option<CorsLayer>> {
    let Some(origin) = origin else {
        return Ok(None);
    };

    let value = origin.parse::<HeaderValue>().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid {CORS_ALLOWED_ORIGIN} '{origin}': {e}"),
        )
    })?;
    Ok(Some(create_cors_layer(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_unset() {
        assert!(cors_for_origin(None).unwrap().is_none());
    }

    #[test]
    fn test_cors_set() {
        assert!(cors_for_origin(Some("http://localhost:3000")).unwrap().is_some());
    }

    #[test]
    fn test_cors_invalid_origin() {
        let err = cors_for_origin(Some("bad\norigin")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
