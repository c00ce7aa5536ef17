use crate::model::{CoinRecord, MarketSummary, ReportError};

use std::path::Path;
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub const LIVE_DATA_SHEET: &str = "Live Data";
pub const ANALYSIS_SHEET: &str = "Analysis Report";

const LIVE_DATA_HEADERS: [&str; 7] = [
    "Name",
    "Symbol",
    "Current Price (USD)",
    "Market Cap",
    "24h Trading Volume",
    "24h Price Change (%)",
    "Last Updated",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trait defining the interface for a report writer.
pub trait ReportWriter: Send + Sync {
    fn write(
        &self,
        coins: &[CoinRecord],
        summary: &MarketSummary,
        path: &Path,
    ) -> Result<(), ReportError>;
}

/// Writes both report sheets into a single xlsx workbook.
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Drops a previous sheet of the same name, then recreates it empty.
    /// Sheets with other names stay as they are.
    fn replace_sheet<'a>(
        book: &'a mut Spreadsheet,
        name: &str,
    ) -> Result<&'a mut Worksheet, ReportError> {
        let _ = book.remove_sheet_by_name(name);
        book.new_sheet(name)
            .map_err(|e| ReportError::Sheet(e.to_string()))
    }

    fn fill_live_data(sheet: &mut Worksheet, coins: &[CoinRecord]) {
        for (col, header) in LIVE_DATA_HEADERS.iter().enumerate() {
            sheet.get_cell_mut(((col + 1) as u32, 1)).set_value(*header);
        }

        for (i, coin) in coins.iter().enumerate() {
            let row = (i + 2) as u32;
            sheet.get_cell_mut((1, row)).set_value(coin.name.clone());
            sheet.get_cell_mut((2, row)).set_value(coin.symbol.clone());
            sheet
                .get_cell_mut((3, row))
                .set_value_number(coin.current_price);
            sheet
                .get_cell_mut((4, row))
                .set_value_number(coin.market_cap);
            sheet
                .get_cell_mut((5, row))
                .set_value_number(coin.total_volume);
            if let Some(change) = coin.price_change_24h {
                sheet.get_cell_mut((6, row)).set_value_number(change);
            }
            sheet
                .get_cell_mut((7, row))
                .set_value(coin.fetched_at.format(TIMESTAMP_FORMAT).to_string());
        }
    }

    fn fill_analysis(sheet: &mut Worksheet, summary: &MarketSummary) {
        sheet.get_cell_mut((1, 1)).set_value("Metric");
        sheet.get_cell_mut((2, 1)).set_value("Value");

        sheet
            .get_cell_mut((1, 2))
            .set_value("Top 5 Cryptos by Market Cap");
        sheet
            .get_cell_mut((2, 2))
            .set_value(summary.top_by_market_cap.join(", "));

        sheet.get_cell_mut((1, 3)).set_value("Average Price");
        sheet
            .get_cell_mut((2, 3))
            .set_value_number(summary.average_price);

        sheet.get_cell_mut((1, 4)).set_value("Highest 24h Change");
        sheet
            .get_cell_mut((2, 4))
            .set_value(summary.highest_change.as_deref().unwrap_or("n/a"));

        sheet.get_cell_mut((1, 5)).set_value("Lowest 24h Change");
        sheet
            .get_cell_mut((2, 5))
            .set_value(summary.lowest_change.as_deref().unwrap_or("n/a"));

        sheet.get_cell_mut((1, 6)).set_value("Last Updated");
        sheet
            .get_cell_mut((2, 6))
            .set_value(summary.generated_at.format(TIMESTAMP_FORMAT).to_string());
    }
}

impl ReportWriter for XlsxReportWriter {
    /// Updates the workbook at `path`, creating it when absent. Both report
    /// sheets hold only the current cycle's data afterwards.
    fn write(
        &self,
        coins: &[CoinRecord],
        summary: &MarketSummary,
        path: &Path,
    ) -> Result<(), ReportError> {
        let mut book = if path.exists() {
            umya_spreadsheet::reader::xlsx::read(path)
                .map_err(|e| ReportError::Workbook(format!("{:?}", e)))?
        } else {
            umya_spreadsheet::new_file_empty_worksheet()
        };

        let live = Self::replace_sheet(&mut book, LIVE_DATA_SHEET)?;
        Self::fill_live_data(live, coins);

        let analysis = Self::replace_sheet(&mut book, ANALYSIS_SHEET)?;
        Self::fill_analysis(analysis, summary);

        umya_spreadsheet::writer::xlsx::write(&book, path)
            .map_err(|e| ReportError::Workbook(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gecko-report-{}-{}.xlsx", name, std::process::id()))
    }

    fn sample_records() -> Vec<CoinRecord> {
        let fetched_at = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        vec![
            CoinRecord {
                name: "Bitcoin".to_string(),
                symbol: "BTC".to_string(),
                current_price: 97230.12,
                market_cap: 1_900_000_000_000.0,
                total_volume: 31_000_000_000.0,
                price_change_24h: Some(1.75),
                fetched_at,
            },
            CoinRecord {
                name: "Ethereum".to_string(),
                symbol: "ETH".to_string(),
                current_price: 3421.5,
                market_cap: 410_000_000_000.0,
                total_volume: 15_000_000_000.0,
                price_change_24h: None,
                fetched_at,
            },
        ]
    }

    fn sample_summary() -> MarketSummary {
        MarketSummary {
            top_by_market_cap: vec!["Bitcoin".to_string(), "Ethereum".to_string()],
            average_price: 50325.81,
            highest_change: Some("Bitcoin".to_string()),
            lowest_change: None,
            generated_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 1).unwrap(),
        }
    }

    fn sheet_grid(path: &Path, sheet: &str, rows: u32, cols: u32) -> Vec<String> {
        let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
        let sheet = book.get_sheet_by_name(sheet).unwrap();
        let mut grid = Vec::new();
        for row in 1..=rows {
            for col in 1..=cols {
                grid.push(sheet.get_value((col, row)));
            }
        }
        grid
    }

    #[test]
    fn round_trip_preserves_rows_and_column_order() {
        let path = temp_path("round-trip");
        let _ = fs::remove_file(&path);

        XlsxReportWriter::new()
            .write(&sample_records(), &sample_summary(), &path)
            .unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let live = book.get_sheet_by_name(LIVE_DATA_SHEET).unwrap();

        for (col, header) in LIVE_DATA_HEADERS.iter().enumerate() {
            assert_eq!(live.get_value(((col + 1) as u32, 1)), *header);
        }

        assert_eq!(live.get_value((1, 2)), "Bitcoin");
        assert_eq!(live.get_value((2, 2)), "BTC");
        assert_eq!(live.get_value((3, 2)).parse::<f64>().unwrap(), 97230.12);
        assert_eq!(
            live.get_value((4, 2)).parse::<f64>().unwrap(),
            1_900_000_000_000.0
        );
        assert_eq!(live.get_value((6, 2)).parse::<f64>().unwrap(), 1.75);
        assert_eq!(live.get_value((7, 2)), "2026-08-07 12:00:00");

        assert_eq!(live.get_value((1, 3)), "Ethereum");
        // A record with no 24h change leaves the cell empty.
        assert_eq!(live.get_value((6, 3)), "");

        let analysis = book.get_sheet_by_name(ANALYSIS_SHEET).unwrap();
        assert_eq!(analysis.get_value((1, 2)), "Top 5 Cryptos by Market Cap");
        assert_eq!(analysis.get_value((2, 2)), "Bitcoin, Ethereum");
        assert_eq!(analysis.get_value((2, 3)).parse::<f64>().unwrap(), 50325.81);
        assert_eq!(analysis.get_value((2, 4)), "Bitcoin");
        assert_eq!(analysis.get_value((2, 5)), "n/a");
        assert_eq!(analysis.get_value((2, 6)), "2026-08-07 12:00:01");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn writing_twice_is_idempotent() {
        let path = temp_path("idempotent");
        let _ = fs::remove_file(&path);

        let writer = XlsxReportWriter::new();
        let records = sample_records();
        let summary = sample_summary();

        writer.write(&records, &summary, &path).unwrap();
        let first_live = sheet_grid(&path, LIVE_DATA_SHEET, 4, 7);
        let first_analysis = sheet_grid(&path, ANALYSIS_SHEET, 6, 2);

        writer.write(&records, &summary, &path).unwrap();
        assert_eq!(sheet_grid(&path, LIVE_DATA_SHEET, 4, 7), first_live);
        assert_eq!(sheet_grid(&path, ANALYSIS_SHEET, 6, 2), first_analysis);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unrelated_sheets_survive_an_update() {
        let path = temp_path("preserve");
        let _ = fs::remove_file(&path);

        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        book.new_sheet("Notes")
            .unwrap()
            .get_cell_mut((1, 1))
            .set_value("keep me");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        XlsxReportWriter::new()
            .write(&sample_records(), &sample_summary(), &path)
            .unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let notes = book.get_sheet_by_name("Notes").unwrap();
        assert_eq!(notes.get_value((1, 1)), "keep me");
        assert!(book.get_sheet_by_name(LIVE_DATA_SHEET).is_some());
        assert!(book.get_sheet_by_name(ANALYSIS_SHEET).is_some());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn replaced_sheet_drops_stale_rows() {
        let path = temp_path("replace");
        let _ = fs::remove_file(&path);

        let writer = XlsxReportWriter::new();
        writer
            .write(&sample_records(), &sample_summary(), &path)
            .unwrap();

        // Second cycle with a single record: the old second row must be gone.
        let shorter = vec![sample_records().remove(0)];
        writer.write(&shorter, &sample_summary(), &path).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let live = book.get_sheet_by_name(LIVE_DATA_SHEET).unwrap();
        assert_eq!(live.get_value((1, 2)), "Bitcoin");
        assert_eq!(live.get_value((1, 3)), "");

        let _ = fs::remove_file(&path);
    }
}
