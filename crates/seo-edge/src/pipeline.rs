//! Stock page rewrite pipeline: parse ticker, stamp date, fetch template,
//! apply the SEO rules.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::TemplateMode;
use crate::error::EdgeError;
use crate::origin::TemplateSource;
use crate::rewrite::SeoRewriter;
use crate::route::{extract_ticker, format_korean_date};

/// Status used for rewritten pages when the template is a fixed page
const FIXED_PAGE_STATUS: u16 = 200;

/// Result of rewriting one stock page
#[derive(Debug, Clone)]
pub struct RewrittenPage {
    pub ticker: String,
    pub date: String,
    pub status: u16,
    pub html: String,
}

pub struct EdgePipeline {
    rewriter: SeoRewriter,
    mode: TemplateMode,
    timezone: Tz,
}

impl EdgePipeline {
    pub fn new(rewriter: SeoRewriter, mode: TemplateMode, timezone: Tz) -> Self {
        Self {
            rewriter,
            mode,
            timezone,
        }
    }

    pub fn mode(&self) -> &TemplateMode {
        &self.mode
    }

    /// Rewrite the page for `path_and_query` as of `now`.
    ///
    /// Returns `Ok(None)` when the path is not a stock route with a ticker; the
    /// caller should pass the request through untouched. Origin fetch errors
    /// are returned as-is.
    pub async fn rewrite_page<S>(
        &self,
        source: &S,
        path_and_query: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<RewrittenPage>, EdgeError>
    where
        S: TemplateSource + ?Sized,
    {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path);
        let Some(ticker) = extract_ticker(path) else {
            return Ok(None);
        };

        let date = format_korean_date(now, self.timezone);

        let (template, status) = match &self.mode {
            TemplateMode::FixedPage {
                path: template_path,
            } => (source.fetch(template_path).await?, FIXED_PAGE_STATUS),
            TemplateMode::Forwarded => {
                let page = source.fetch(path_and_query).await?;
                let status = page.status;
                (page, status)
            }
        };

        let html = self.rewriter.apply(&template.text(), &ticker, &date);
        tracing::debug!(ticker = %ticker, status, "Rewrote stock page meta tags");

        Ok(Some(RewrittenPage {
            ticker,
            date,
            status,
            html,
        }))
    }
}
