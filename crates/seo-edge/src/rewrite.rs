//! Meta tag rewriting for stock detail pages.
//!
//! The origin page ships with generic title/description tags. Each rule below
//! swaps one of those literal tags for a copy stamped with the ticker and date.

use regex::{NoExpand, Regex};

use crate::error::EdgeError;

const DATE_PLACEHOLDER: &str = "{date}";
const TICKER_PLACEHOLDER: &str = "{ticker}";

/// (tag, default markup in the template, replacement template)
const SEO_TAGS: [(&str, &str, &str); 6] = [
    (
        "title",
        "<title>종목 상세페이지:나스픽</title>",
        "<title>{date} {ticker} 주가 전망 및 AI 분석 | 나스픽</title>",
    ),
    (
        "description",
        r#"<meta name="description" content="미국 주식 실시간 티어 분석 정보">"#,
        r#"<meta name="description" content="[{date}] {ticker} 주가 전망, 목표가, 실시간 AI 분석. 나스픽 점수와 티어 확인. 재무건전성, RSI, 상승여력 분석.">"#,
    ),
    (
        "og:title",
        r#"<meta property="og:title" content="종목 상세페이지 | 나스픽">"#,
        r#"<meta property="og:title" content="{date} {ticker} 주가 전망 및 AI 분석 | 나스픽">"#,
    ),
    (
        "og:description",
        r#"<meta property="og:description" content="미국 주식 실시간 티어 분석 정보">"#,
        r#"<meta property="og:description" content="[{date}] {ticker} 주가 전망과 목표가 분석. 나스픽 AI 점수 확인.">"#,
    ),
    (
        "twitter:title",
        r#"<meta name="twitter:title" content="종목 상세페이지 | 나스픽">"#,
        r#"<meta name="twitter:title" content="{date} {ticker} 주가 전망 및 AI 분석 | 나스픽">"#,
    ),
    (
        "twitter:description",
        r#"<meta name="twitter:description" content="미국 주식 실시간 티어 분석 정보">"#,
        r#"<meta name="twitter:description" content="[{date}] {ticker} AI 분석. 주가 전망과 목표가 확인.">"#,
    ),
];

struct SeoRule {
    tag: &'static str,
    anchor: Regex,
    template: &'static str,
}

impl SeoRule {
    fn render(&self, ticker: &str, date: &str) -> String {
        self.template
            .replace(DATE_PLACEHOLDER, date)
            .replace(TICKER_PLACEHOLDER, ticker)
    }
}

/// Applies the stock page meta tag rules in a fixed order.
pub struct SeoRewriter {
    rules: Vec<SeoRule>,
}

impl SeoRewriter {
    pub fn new() -> Result<Self, EdgeError> {
        let rules = SEO_TAGS
            .into_iter()
            .map(|(tag, default_markup, template)| -> Result<SeoRule, EdgeError> {
                Ok(SeoRule {
                    tag,
                    anchor: Regex::new(&regex::escape(default_markup))?,
                    template,
                })
            })
            .collect::<Result<Vec<_>, EdgeError>>()?;

        Ok(Self { rules })
    }

    /// Rewrite the first occurrence of each default tag.
    ///
    /// A tag missing from `html` is skipped; the remaining rules still run.
    pub fn apply(&self, html: &str, ticker: &str, date: &str) -> String {
        let mut page = html.to_string();
        for rule in &self.rules {
            if !rule.anchor.is_match(&page) {
                tracing::debug!(tag = rule.tag, "SEO anchor not found in template");
                continue;
            }
            let replacement = rule.render(ticker, date);
            page = rule
                .anchor
                .replacen(&page, 1, NoExpand(&replacement))
                .into_owned();
        }
        page
    }
}
