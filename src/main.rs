mod analyzer;
mod config;
mod fetcher;
mod model;
mod report;
mod scheduler;

use analyzer::AnalyzerImpl;
use config::{AppConfig, load_config};
use fetcher::FetcherImpl;
use report::XlsxReportWriter;
use scheduler::Scheduler;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

const CONFIG_FILE: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file; the defaults match the public API, so
    // the binary runs without one.
    let config: Arc<AppConfig> = if Path::new(CONFIG_FILE).exists() {
        match load_config(CONFIG_FILE) {
            Ok(cfg) => Arc::new(cfg),
            Err(e) => {
                error!("Config load error: {}", e);
                return;
            }
        }
    } else {
        info!("No {} found, using defaults", CONFIG_FILE);
        Arc::new(AppConfig::default())
    };

    info!(
        "🚀 gecko-report started: {} coins every {}s -> {}",
        config.per_page, config.check_interval_seconds, config.report_path
    );

    let fetcher = FetcherImpl::new(config.clone());
    let analyzer = AnalyzerImpl::new();
    let writer = XlsxReportWriter::new();

    Scheduler::new(fetcher, analyzer, writer, config).run().await;
}
