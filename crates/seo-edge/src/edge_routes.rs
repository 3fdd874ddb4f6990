//! Edge Routes
//!
//! Every request except the health check lands here. `GET`/`HEAD` on a stock
//! detail route gets its meta tags rewritten; anything else is replayed against
//! the origin with its method, headers and body, and the origin's response is
//! returned with its headers intact.

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;

use crate::error::EdgeError;
use crate::origin::{strip_hop_by_hop, ForwardRequest, OriginPage};
use crate::pipeline::RewrittenPage;
use crate::{AppError, AppState};

pub const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

/// Largest client body buffered for a pass-through request
pub const MAX_FORWARD_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn edge_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .fallback(handle_edge_request)
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_edge_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    if parts.method == Method::GET || parts.method == Method::HEAD {
        if let Some(page) = state
            .pipeline
            .rewrite_page(state.source.as_ref(), &path_and_query, Utc::now())
            .await?
        {
            return Ok(rewritten_response(page));
        }
    }

    let body = axum::body::to_bytes(body, MAX_FORWARD_BODY_BYTES)
        .await
        .map_err(|e| EdgeError::Request(e.to_string()))?;

    tracing::debug!("Passing through {} {}", parts.method, path_and_query);
    let page = state
        .source
        .forward(ForwardRequest {
            method: parts.method,
            path_and_query,
            headers: parts.headers,
            body: body.to_vec(),
        })
        .await?;
    Ok(passthrough_response(page))
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn rewritten_response(page: RewrittenPage) -> Response {
    (
        status_of(page.status),
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        page.html,
    )
        .into_response()
}

fn passthrough_response(page: OriginPage) -> Response {
    let mut headers = page.headers;
    strip_hop_by_hop(&mut headers);

    let mut response = (status_of(page.status), page.body).into_response();
    *response.headers_mut() = headers;
    response
}
