//! HTTP middleware: CORS and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(origin));
//! ```

pub mod cors;
pub mod security;

pub use cors::{cors_for_origin, cors_from_env, create_cors_layer};
pub use security::security_headers;
