//! End-to-end tests for Tradepost.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server
//! cargo run -p tradepost-server
//!
//! # Run the end-to-end suite
//! cargo test -p tradepost-integration-tests -- --ignored
//! ```
//!
//! The tests in `tests/` talk to a live server over HTTP and are `#[ignore]`d
//! by default. Point them at a non-default instance with `TRADEPOST_BASE_URL`.

use reqwest::Client;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TRADEPOST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Create an HTTP client for the test suite.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique username per test run, so reruns against the same database
/// don't collide on the unique username constraint.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
