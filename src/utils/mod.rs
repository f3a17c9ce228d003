//! Utility modules for common functionality.
//!
//! - http: Retryable HTTP client construction
//! - logging: Logging utilities
//! - tests: Builders for test fixtures

pub mod http;
pub mod logging;

pub use http::{create_retryable_http_client, HttpRetryConfig, TransientErrorRetryStrategy};
