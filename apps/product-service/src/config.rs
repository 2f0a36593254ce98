//! Configuration for the product service

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding product documents (`PRODUCTS_COLLECTION`)
    pub products_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let products_collection = env_or_default(
            "PRODUCTS_COLLECTION",
            domain_products::mongodb::DEFAULT_COLLECTION,
        );

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            products_collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("product-service")),
                ("APP_ENV", None),
                ("PORT", None),
                ("PRODUCTS_COLLECTION", None),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.app.name, "product_service");
                assert_eq!(config.mongodb.database(), "product-service");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.products_collection, "product");
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("MONGO_URL", Some("mongodb://db:27017")),
                ("MONGO_DATABASE", Some("catalog")),
                ("MONGODB_URL", None),
                ("MONGODB_DATABASE", None),
                ("APP_ENV", Some("production")),
                ("PORT", Some("9090")),
                ("PRODUCTS_COLLECTION", Some("items")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.mongodb.url(), "mongodb://db:27017");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.products_collection, "items");
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars_unset(["MONGODB_URL", "MONGO_URL"], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("product-service")),
                ("PORT", Some("not-a-port")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
