//! Test configuration constants.
//!
//! Placeholder values shared by every test; none of them are real credentials.

/// Bearer token accepted by admin routes in tests.
pub static TEST_ADMIN_TOKEN: &str = "test-admin-token";
