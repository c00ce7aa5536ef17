use crate::model::{CoinRecord, FetchError};

#[async_trait::async_trait]
pub trait MarketFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<CoinRecord>, FetchError>;
}
