//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied and automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("user", "main");
//!     let email = builder.email("main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
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
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("user", "main"), "test-user-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate a unique, already lowercased email for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.email("ana"), "ana-12345@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local.to_lowercase(), self.seed)
    }
}
