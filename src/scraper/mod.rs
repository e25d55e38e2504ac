pub mod cache;
pub mod fetcher;
pub mod traits;

pub use cache::PageCache;
pub use fetcher::HttpFetcher;
pub use traits::Fetcher;
