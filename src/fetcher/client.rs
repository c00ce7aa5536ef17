use crate::config::AppConfig;
use crate::fetcher::traits::MarketFetcher;
use crate::model::{CoinRecord, FetchError};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Raw wire shape of one element of the /coins/markets response. The API
/// serves JSON null for numeric fields it has no fresh data for.
#[derive(Debug, Deserialize)]
struct MarketCoin {
    name: String,
    symbol: String,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    price_change_percentage_24h: Option<f64>,
}

pub struct FetcherImpl {
    client: Client,
    config: Arc<AppConfig>,
}

impl FetcherImpl {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) GeckoReportBot/0.1")
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.api_base_url)
    }
}

#[async_trait::async_trait]
impl MarketFetcher for FetcherImpl {
    /// Fetches the top coins by market cap, one page. A non-success status
    /// is reported and mapped to an empty batch so the caller can skip the
    /// rest of the cycle.
    async fn fetch(&self) -> Result<Vec<CoinRecord>, FetchError> {
        let per_page = self.config.per_page.to_string();
        let response = self
            .client
            .get(self.markets_url())
            .query(&[
                ("vs_currency", self.config.vs_currency.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Market API returned status {}", status);
            return Ok(Vec::new());
        }

        let coins: Vec<MarketCoin> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        // One timestamp for the whole batch.
        let fetched_at = Utc::now();
        Ok(coins
            .into_iter()
            .map(|coin| CoinRecord {
                name: coin.name,
                symbol: coin.symbol.to_uppercase(),
                current_price: coin.current_price.unwrap_or(0.0),
                market_cap: coin.market_cap.unwrap_or(0.0),
                total_volume: coin.total_volume.unwrap_or(0.0),
                price_change_24h: coin.price_change_percentage_24h,
                fetched_at,
            })
            .collect())
    }
}
