//! Unique identifiers for test isolation.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use barflow_test_support::unique_str;
///
/// let a = unique_str("night");
/// assert_ne!(a, unique_str("night"));
/// assert!(a.starts_with("night-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A customer id that no authored catalog will contain.
pub fn unique_customer_id() -> String {
    unique_str("guest").to_lowercase()
}
