// Analyzer module: derives the per-cycle summary from the fetched records.

pub mod market_summary;

// Re-export the main Analyzer implementation for ease of use.
pub use market_summary::{Analyzer, AnalyzerImpl};
