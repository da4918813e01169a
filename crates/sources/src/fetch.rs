//! Optional time bound around a catalog fetch.

use catalog::{CatalogError, Result};
use std::future::Future;
use std::time::Duration;

/// Await `fetch`, failing with `CatalogError::Timeout` if `timeout` elapses first.
///
/// With no timeout the fetch is awaited as is; a hung catalog hangs the caller.
pub async fn bounded<T, F>(endpoint: &str, timeout: Option<Duration>, fetch: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        None => fetch.await,
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| CatalogError::Timeout {
                endpoint: endpoint.to_string(),
                millis: limit.as_millis() as u64,
            })?,
    }
}
