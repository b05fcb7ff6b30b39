pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use parallel::ParallelFetcher;

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the raw body of a successful response.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
