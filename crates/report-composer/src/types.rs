use serde::{Deserialize, Serialize};

/// Score assumed for any stats-bar entry or RSI reading that is missing
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Tier assumed when the record carries none
pub const DEFAULT_TIER: f64 = 3.0;

/// Sector label used when the record carries none
pub const DEFAULT_SECTOR: &str = "기타";

/// Signal code emitted upstream when MACD crosses above its signal line
pub const MACD_GOLDEN_CROSS: &str = "MACD_GoldenCross";

/// One stock record as published in the site's `data.json`.
///
/// Every field is optional. Upstream writes zero for "not computed" in several
/// places, so the accessors below treat zero the same as a missing value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockMetrics {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub tier: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub stats_bar: Option<StatsBar>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub consensus: Option<Consensus>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub technical_analysis: Option<TechnicalAnalysis>,
    #[serde(default)]
    pub signals: Vec<String>,
    /// Site-wide ranking, only used when picking preview samples
    #[serde(default)]
    pub rank: Option<i64>,
}

/// Normalized 0-100 sub-scores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBar {
    #[serde(default)]
    pub fundamentals: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub stability: Option<f64>,
    #[serde(default)]
    pub momentum: Option<f64>,
}

/// Analyst consensus block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Consensus {
    #[serde(default)]
    pub target_price: Option<TargetPrice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetPrice {
    #[serde(default)]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    #[serde(default)]
    pub rsi: Option<RsiReading>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsiReading {
    #[serde(default)]
    pub value: Option<f64>,
}

/// `Some(v)` only for a usable, non-zero number
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl StockMetrics {
    pub fn ticker(&self) -> &str {
        non_empty(self.ticker.as_ref()).unwrap_or("")
    }

    /// Display name, falling back to the ticker
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_ref()).unwrap_or_else(|| self.ticker())
    }

    pub fn tier(&self) -> f64 {
        present(self.tier).unwrap_or(DEFAULT_TIER)
    }

    pub fn sector(&self) -> &str {
        non_empty(self.sector.as_ref()).unwrap_or(DEFAULT_SECTOR)
    }

    /// Overall score; `None` means the report cannot be generated
    pub fn final_score(&self) -> Option<f64> {
        present(self.final_score)
    }

    /// Fundamentals sub-score, used as the growth proxy
    pub fn growth_score(&self) -> f64 {
        self.stat(|s| s.fundamentals)
    }

    pub fn value_score(&self) -> f64 {
        self.stat(|s| s.value)
    }

    pub fn stability_score(&self) -> f64 {
        self.stat(|s| s.stability)
    }

    pub fn momentum_score(&self) -> f64 {
        self.stat(|s| s.momentum)
    }

    fn stat(&self, pick: impl Fn(&StatsBar) -> Option<f64>) -> f64 {
        present(self.stats_bar.as_ref().and_then(pick)).unwrap_or(NEUTRAL_SCORE)
    }

    /// Mean analyst target price
    pub fn target_price_mean(&self) -> Option<f64> {
        present(
            self.consensus
                .as_ref()
                .and_then(|c| c.target_price.as_ref())
                .and_then(|t| t.mean),
        )
    }

    pub fn current_price(&self) -> Option<f64> {
        present(self.current_price)
    }

    /// Percentage distance from the current price to the consensus target.
    ///
    /// `None` unless both prices are present.
    pub fn upside_percent(&self) -> Option<f64> {
        let mean = self.target_price_mean()?;
        let current = self.current_price()?;
        Some((mean - current) / current * 100.0)
    }

    pub fn rsi(&self) -> f64 {
        self.technical_analysis
            .as_ref()
            .and_then(|t| t.rsi.as_ref())
            .and_then(|r| r.value)
            .filter(|v| v.is_finite())
            .unwrap_or(NEUTRAL_SCORE)
    }

    pub fn has_signal(&self, code: &str) -> bool {
        self.signals.iter().any(|s| s == code)
    }

    pub fn has_macd_golden_cross(&self) -> bool {
        self.has_signal(MACD_GOLDEN_CROSS)
    }
}
