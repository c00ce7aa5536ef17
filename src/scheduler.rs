use crate::analyzer::Analyzer;
use crate::config::AppConfig;
use crate::fetcher::MarketFetcher;
use crate::model::CycleError;
use crate::report::ReportWriter;

use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

/// What a single cycle did, so tests can assert the skip path directly.
#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    Skipped,
}

pub struct Scheduler<F, A, W> {
    fetcher: F,
    analyzer: A,
    writer: W,
    config: Arc<AppConfig>,
}

impl<F, A, W> Scheduler<F, A, W>
where
    F: MarketFetcher,
    A: Analyzer,
    W: ReportWriter,
{
    pub fn new(fetcher: F, analyzer: A, writer: W, config: Arc<AppConfig>) -> Self {
        Self {
            fetcher,
            analyzer,
            writer,
            config,
        }
    }

    /// Runs exactly one fetch → analyze → write pass. An empty fetch skips
    /// the rest of the cycle and leaves the report file untouched.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        info!("Fetching market data...");
        let coins = self.fetcher.fetch().await?;
        if coins.is_empty() {
            warn!("No market data this cycle, skipping report update");
            return Ok(CycleOutcome::Skipped);
        }
        info!("Fetched {} coins", coins.len());

        let summary = self.analyzer.summarize(&coins);
        info!(
            "Top by market cap: {} | avg price {:.2}",
            summary.top_by_market_cap.join(", "),
            summary.average_price
        );

        self.writer
            .write(&coins, &summary, Path::new(&self.config.report_path))?;

        Ok(CycleOutcome::Completed)
    }

    /// Main processing loop. Every cycle error is caught here so the loop
    /// always reaches its sleep; Ctrl-C exits after the current cycle.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                Ok(CycleOutcome::Completed) => {
                    info!(
                        "Report updated successfully at {}!",
                        Local::now().format("%H:%M")
                    );
                }
                Ok(CycleOutcome::Skipped) => {}
                Err(e) => {
                    warn!("Cycle failed: {}", e);
                }
            }

            info!(
                "Next run at {} + {} minutes",
                Local::now().format("%H:%M"),
                self.config.check_interval_seconds / 60
            );
            tokio::select! {
                _ = sleep(Duration::from_secs(self.config.check_interval_seconds)) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested, exiting.");
                    break;
                }
            }
        }
    }
}
