//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    MongoError, close, connect, connect_from_config, connect_from_config_with_retry, ping,
};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
