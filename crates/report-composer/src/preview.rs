//! Sample selection for previewing generated reports against a `data.json` dump.

use std::collections::HashSet;
use std::path::Path;

use crate::composer::compose_report;
use crate::error::ReportError;
use crate::types::StockMetrics;

/// Tickers readers look up most, previewed whenever present in the dump
pub const POPULAR_TICKERS: [&str; 7] = ["NVDA", "TSLA", "AAPL", "AMD", "PLTR", "SOXL", "TQQQ"];

/// Records ranked at or above this are always previewed
const TOP_RANK_CUTOFF: i64 = 3;
/// Rank assumed for records without one
const UNRANKED: i64 = 999;
/// Records scoring below this exercise the cautious wording
const LOW_SCORE_CUTOFF: f64 = 40.0;
const LOW_SCORE_SAMPLES: usize = 2;
pub const MAX_PREVIEW_SAMPLES: usize = 10;

/// Load the array of stock records published as `data.json`
pub fn load_stocks(path: impl AsRef<Path>) -> Result<Vec<StockMetrics>, ReportError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Pick a spread of records covering top-ranked, popular and low-scoring stocks.
///
/// Duplicates are removed by ticker keeping the first occurrence, and at most
/// [`MAX_PREVIEW_SAMPLES`] records are returned.
pub fn select_preview_samples(stocks: &[StockMetrics]) -> Vec<&StockMetrics> {
    let mut candidates: Vec<&StockMetrics> = stocks
        .iter()
        .filter(|s| s.rank.unwrap_or(UNRANKED) <= TOP_RANK_CUTOFF)
        .collect();

    for ticker in POPULAR_TICKERS {
        if let Some(found) = stocks.iter().find(|s| s.ticker() == ticker) {
            if !candidates.iter().any(|c| std::ptr::eq(*c, found)) {
                candidates.push(found);
            }
        }
    }

    candidates.extend(
        stocks
            .iter()
            .filter(|s| s.final_score.unwrap_or(0.0) < LOW_SCORE_CUTOFF)
            .take(LOW_SCORE_SAMPLES),
    );

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|s| seen.insert(s.ticker().to_string()))
        .take(MAX_PREVIEW_SAMPLES)
        .collect()
}

/// Printable block for one previewed stock
pub fn render_preview(stock: &StockMetrics) -> String {
    let score = stock
        .final_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "None".to_string());

    format!(
        "📌 {} (Score: {})\n📝 {}\n{}\n",
        stock.ticker(),
        score,
        compose_report(stock),
        "-".repeat(50)
    )
}
