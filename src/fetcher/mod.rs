pub mod client;
pub mod traits;

pub use client::FetcherImpl;
pub use traits::MarketFetcher;
