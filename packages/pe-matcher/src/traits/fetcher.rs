//! Page fetcher trait.
//!
//! A fetcher turns one URL into raw markup. It follows redirects, applies
//! its own timeout and treats any non-2xx status as a failure.

use async_trait::async_trait;

use crate::error::FetchResult;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Fetcher name for logging.
    fn name(&self) -> &str;
}
