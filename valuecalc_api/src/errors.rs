//! Error types for the API client.

use std::time::Duration;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error or unexpected response).
    #[error("Request failed")]
    RequestFailed,
    /// The provider did not answer within the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The provider has no data for this ticker.
    #[error("Ticker not found: {0}")]
    NotFound(String),
    /// The provider answered with an error object instead of a result.
    #[error("Provider error {code}: {description}")]
    Provider { code: String, description: String },
    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
