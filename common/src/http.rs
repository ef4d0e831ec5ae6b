use async_trait::async_trait;

use crate::error::FetchError;

/// HTTP access used by the service prober.
///
/// Implementations apply the probe timeout and the browser-like user agent
/// to every request.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues a GET and returns the `Content-Type` header, if any.
    ///
    /// The body is not read.
    async fn content_type(&self, url: &str) -> Result<Option<String>, FetchError>;

    /// Issues a GET and returns the decoded response body.
    async fn document(&self, url: &str) -> Result<String, FetchError>;
}
