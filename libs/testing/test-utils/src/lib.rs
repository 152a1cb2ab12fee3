//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo", default)
//! - `TestDataBuilder`: deterministic, per-test unique data
//! - `assertions`: assertion helpers for envelopes and options
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn creates_user() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("creates_user");
//!     let username = data.username("owner");
//!     // ...
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// Values derive from a seed, so a test sees the same data on every run
/// while different tests do not collide in a shared database.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name (the recommended constructor)
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

    /// A name such as `test-product-1a2b3c-main`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(0x1a2b3c);
    /// assert_eq!(builder.name("product", "main"), "test-product-1a2b3c-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{:x}-{}", prefix, self.seed, suffix)
    }

    /// A username that is valid as a single URL path segment
    pub fn username(&self, suffix: &str) -> String {
        format!("user{:x}{}", self.seed, suffix)
    }

    /// A syntactically valid email address belonging to [`username`](Self::username)
    pub fn email(&self, suffix: &str) -> String {
        format!("{}@example.com", self.username(suffix))
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert the `status` flag of a response envelope
    pub fn assert_envelope_status(body: &Value, expected: bool, context: &str) {
        assert_eq!(
            body.get("status"),
            Some(&Value::Bool(expected)),
            "{}: expected envelope status {}, body was {}",
            context,
            expected,
            body
        );
    }

    /// Assert a failure envelope and return its message
    pub fn assert_failure_message(body: &Value, context: &str) -> String {
        assert_envelope_status(body, false, context);
        body.get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| panic!("{}: failure envelope without message: {}", context, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::from_test_name("my_test");
        let b = TestDataBuilder::from_test_name("my_test");
        assert_eq!(a.username("x"), b.username("x"));
        assert_eq!(a.name("product", "main"), b.name("product", "main"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.username("x"), b.username("x"));
    }

    #[test]
    fn test_username_is_a_single_path_segment() {
        let username = TestDataBuilder::new(u64::MAX).username("owner");
        assert!(!username.contains('/'));
        assert!(!username.contains(char::is_whitespace));
    }

    #[test]
    fn test_envelope_assertions() {
        let body = json!({ "status": false, "message": "User 'x' not found" });
        assertions::assert_envelope_status(&body, false, "lookup");
        assert_eq!(
            assertions::assert_failure_message(&body, "lookup"),
            "User 'x' not found"
        );
    }

    #[test]
    #[should_panic(expected = "expected envelope status true")]
    fn test_envelope_status_mismatch_panics() {
        assertions::assert_envelope_status(&json!({ "status": false }), true, "create");
    }
}
