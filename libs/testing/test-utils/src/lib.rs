//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `mongo` (default): Enables MongoDB test infrastructure
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestMongo, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let db = mongo.database(&builder.database_name());
//!     let product_name = builder.name("product", "main");
//! }
//! ```
//!
//! Container tests need a running Docker daemon; mark them `#[ignore]` and run
//! them with `cargo test -- --ignored`.

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this builder's seed
    ///
    /// Lets tests sharing one server avoid seeing each other's records.
    pub fn database_name(&self) -> String {
        format!("test_{:x}", self.seed)
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("product", "main");
    /// assert!(name.starts_with("test-product-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Deterministic decimal price string between 1.00 and 1000.99
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let price = TestDataBuilder::new(7).price(0);
    /// assert_eq!(price.split('.').nth(1).map(str::len), Some(2));
    /// ```
    pub fn price(&self, index: u64) -> String {
        let mixed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(index);
        let units = mixed % 1000 + 1;
        let cents = (mixed / 1000) % 100;
        format!("{}.{:02}", units, cents)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that a slice has the expected length with a nice error message
    pub fn assert_len<T: std::fmt::Debug>(items: &[T], expected: usize, context: &str) {
        assert_eq!(
            items.len(),
            expected,
            "{}: expected {} items, got {:?}",
            context,
            expected,
            items
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
