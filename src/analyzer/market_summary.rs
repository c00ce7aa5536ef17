use crate::model::{CoinRecord, MarketSummary};
use chrono::Utc;
use std::cmp::Ordering;

/// Trait defining the interface for the market analyzer.
pub trait Analyzer: Send + Sync {
    fn summarize(&self, coins: &[CoinRecord]) -> MarketSummary;
}

/// Implementation of the market analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    /// Derives the summary for one cycle. Callers must pass a non-empty
    /// slice; the scheduler skips the call when the fetch came back empty.
    ///
    /// Records without a 24h change value are excluded from the
    /// highest/lowest selection; both names are `None` only when no record
    /// carries the value at all.
    fn summarize(&self, coins: &[CoinRecord]) -> MarketSummary {
        // Stable sort keeps input order on equal caps.
        let mut by_cap: Vec<&CoinRecord> = coins.iter().collect();
        by_cap.sort_by(|a, b| {
            b.market_cap
                .partial_cmp(&a.market_cap)
                .unwrap_or(Ordering::Equal)
        });
        let top_by_market_cap: Vec<String> =
            by_cap.iter().take(5).map(|c| c.name.clone()).collect();

        let average_price =
            coins.iter().map(|c| c.current_price).sum::<f64>() / coins.len() as f64;

        // First occurrence wins ties, so only a strict improvement replaces.
        let mut highest: Option<(&CoinRecord, f64)> = None;
        let mut lowest: Option<(&CoinRecord, f64)> = None;
        for coin in coins {
            let Some(change) = coin.price_change_24h else {
                continue;
            };
            match highest {
                Some((_, best)) if change <= best => {}
                _ => highest = Some((coin, change)),
            }
            match lowest {
                Some((_, worst)) if change >= worst => {}
                _ => lowest = Some((coin, change)),
            }
        }

        MarketSummary {
            top_by_market_cap,
            average_price,
            highest_change: highest.map(|(c, _)| c.name.clone()),
            lowest_change: lowest.map(|(c, _)| c.name.clone()),
            generated_at: Utc::now(),
        }
    }
}
