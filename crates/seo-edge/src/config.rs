use std::net::SocketAddr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::EdgeError;

const DEFAULT_ORIGIN_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TEMPLATE_PATH: &str = "/page.html";
const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;
const DEFAULT_ORIGIN_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Where the page template for a stock route comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateMode {
    /// Every stock route renders the same static page; the response is always 200
    FixedPage { path: String },
    /// The request is forwarded as-is and the origin status is mirrored
    Forwarded,
}

/// Runtime settings for the edge service.
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    pub origin_url: String,
    pub template_mode: TemplateMode,
    pub timezone: Tz,
    pub origin_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl EdgeConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, EdgeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EdgeError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let origin_url = var("SEO_ORIGIN_URL")
            .unwrap_or_else(|| DEFAULT_ORIGIN_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !origin_url.starts_with("http://") && !origin_url.starts_with("https://") {
            return Err(EdgeError::Config(format!(
                "SEO_ORIGIN_URL must be an http(s) URL, got {}",
                origin_url
            )));
        }

        let template_mode = match var("SEO_TEMPLATE_MODE").as_deref() {
            None | Some("fixed") => {
                let path = var("SEO_TEMPLATE_PATH").unwrap_or_else(|| DEFAULT_TEMPLATE_PATH.to_string());
                if !path.starts_with('/') {
                    return Err(EdgeError::Config(format!(
                        "SEO_TEMPLATE_PATH must start with '/', got {}",
                        path
                    )));
                }
                TemplateMode::FixedPage { path }
            }
            Some("forwarded") => TemplateMode::Forwarded,
            Some(other) => {
                return Err(EdgeError::Config(format!(
                    "SEO_TEMPLATE_MODE must be 'fixed' or 'forwarded', got {}",
                    other
                )))
            }
        };

        let timezone = match var("SEO_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| EdgeError::InvalidTimezone(name.clone()))?,
            None => DEFAULT_TIMEZONE,
        };

        let origin_timeout = Duration::from_secs(
            var("SEO_ORIGIN_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ORIGIN_TIMEOUT_SECS),
        );

        let bind = var("SEO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| EdgeError::Config(format!("SEO_BIND_ADDR is not a socket address: {}", bind)))?;

        Ok(Self {
            origin_url,
            template_mode,
            timezone,
            origin_timeout,
            bind_addr,
        })
    }
}
