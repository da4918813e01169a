//! Error types for the catalog crate.
//!
//! One enum covers both sides of the crate: talking to the movie
//! catalog over the network and persisting interaction logs locally.

use thiserror::Error;

/// Errors that can occur while fetching catalog data or handling logs
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connection reset, ...)
    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    /// The catalog answered with a non-success status code
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// The response body could not be decoded into the expected shape
    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// The fetch did not settle within the configured bound
    #[error("{endpoint} timed out after {millis}ms")]
    Timeout { endpoint: String, millis: u64 },

    /// I/O error while reading or writing a stored log
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored or imported log was not valid JSON for a list of records
    #[error("Invalid interaction log JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
