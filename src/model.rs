// Core structs: CoinRecord, MarketSummary
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One row of per-asset market data, rebuilt from scratch every cycle.
#[derive(Debug, Clone)]
pub struct CoinRecord {
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_24h: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

/// Aggregates derived from one cycle's records. No history is kept.
#[derive(Debug, Clone)]
pub struct MarketSummary {
    pub top_by_market_cap: Vec<String>,
    pub average_price: f64,
    pub highest_change: Option<String>,
    pub lowest_change: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("workbook error: {0}")]
    Workbook(String),
    #[error("sheet operation failed: {0}")]
    Sheet(String),
}

/// Everything that can end a cycle early. The scheduler logs it and waits
/// for the next tick.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("report write failed: {0}")]
    Report(#[from] ReportError),
}
