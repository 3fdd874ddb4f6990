//! Stock route matching and date stamping.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// First path segment of the stock detail route (`/stock/:ticker*`)
pub const STOCK_ROUTE_SEGMENT: &str = "stock";

/// Ticker for a `/stock/<ticker>...` path, uppercased.
///
/// Returns `None` for any other path, for a stock path with an empty ticker
/// segment, and for a segment with characters outside [`is_ticker_char`]; the
/// caller treats all of these as pass-through. Any query string must be
/// stripped beforehand.
pub fn extract_ticker(path: &str) -> Option<String> {
    let mut segments = path.split('/');
    // Leading "" before the first slash
    if !segments.next()?.is_empty() {
        return None;
    }
    if segments.next()? != STOCK_ROUTE_SEGMENT {
        return None;
    }

    segments
        .next()
        .filter(|ticker| !ticker.is_empty() && ticker.chars().all(is_ticker_char))
        .map(|ticker| ticker.to_ascii_uppercase())
}

/// Characters that can appear in a listed symbol (`BRK.B`, `BF-B`, `^GSPC`).
///
/// The ticker is rendered into HTML attributes, so nothing else is accepted.
pub fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^')
}

/// `"<month>월 <day>일"` for `now` in the given timezone, without padding or year
pub fn format_korean_date(now: DateTime<Utc>, timezone: Tz) -> String {
    let local = now.with_timezone(&timezone);
    format!("{}월 {}일", local.month(), local.day())
}
