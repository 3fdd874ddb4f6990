use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName};
use reqwest::{redirect, Client, Method, Response};

use crate::error::EdgeError;

/// Connection-scoped headers that must not cross the proxy in either direction.
/// `host` and `content-length` are recomputed by the HTTP stack.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "host",
    "content-length",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "proxy-authenticate",
    "proxy-authorization",
    "keep-alive",
];

/// Remove hop-by-hop headers, including any named in `Connection`
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }
}

/// A page fetched from the origin site
#[derive(Debug, Clone)]
pub struct OriginPage {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// An incoming request to replay against the origin unchanged
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl OriginPage {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can serve origin pages by path
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch `path_and_query` (e.g. `/page.html` or `/stock/AAPL?tab=chart`).
    ///
    /// Non-2xx statuses are returned as pages, not errors.
    async fn fetch(&self, path_and_query: &str) -> Result<OriginPage, EdgeError>;

    /// Replay a client request (method, headers and body) against the origin.
    ///
    /// The returned page keeps every end-to-end response header.
    async fn forward(&self, request: ForwardRequest) -> Result<OriginPage, EdgeError>;
}

/// HTTP client for the origin site
#[derive(Clone)]
pub struct OriginClient {
    base_url: String,
    client: Client,
}

impl OriginClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        // Redirects go back to the client untouched
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

async fn read_page(url: &str, response: Response) -> Result<OriginPage, EdgeError> {
    let status = response.status().as_u16();
    let mut headers = response.headers().clone();
    strip_hop_by_hop(&mut headers);

    let body = response
        .bytes()
        .await
        .map_err(|e| EdgeError::Origin(format!("Reading body of {}: {}", url, e)))?
        .to_vec();

    tracing::debug!("Fetched {} ({}, {} bytes)", url, status, body.len());

    Ok(OriginPage {
        status,
        headers,
        body,
    })
}

#[async_trait]
impl TemplateSource for OriginClient {
    async fn fetch(&self, path_and_query: &str) -> Result<OriginPage, EdgeError> {
        let url = self.url_for(path_and_query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EdgeError::Origin(format!("GET {}: {}", url, e)))?;

        read_page(&url, response).await
    }

    async fn forward(&self, request: ForwardRequest) -> Result<OriginPage, EdgeError> {
        let url = self.url_for(&request.path_and_query);
        let method = request.method;
        let mut headers = request.headers;
        strip_hop_by_hop(&mut headers);

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EdgeError::Origin(format!("{} {}: {}", method, url, e)))?;

        read_page(&url, response).await
    }
}
