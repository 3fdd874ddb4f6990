pub mod config;
pub mod edge_routes;
pub mod error;
pub mod origin;
pub mod pipeline;
pub mod rewrite;
pub mod route;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{EdgeConfig, TemplateMode};
pub use error::EdgeError;
pub use origin::{ForwardRequest, OriginClient, OriginPage, TemplateSource};
pub use pipeline::{EdgePipeline, RewrittenPage};
pub use rewrite::SeoRewriter;
pub use route::{extract_ticker, format_korean_date};

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EdgePipeline>,
    pub source: Arc<dyn TemplateSource>,
}

impl AppState {
    pub fn new(pipeline: EdgePipeline, source: impl TemplateSource + 'static) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            source: Arc::new(source),
        }
    }
}

/// Handler error; origin failures surface as 502, unreadable client requests as
/// 400, everything else as 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<EdgeError>() {
            Some(EdgeError::Origin(_)) => StatusCode::BAD_GATEWAY,
            Some(EdgeError::Request(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Request failed ({}): {:#}", status, self.0);

        (status, status.canonical_reason().unwrap_or("error")).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    edge_routes::edge_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seo_edge=info,tower_http=info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Load configuration, bind and serve until the process is stopped.
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = EdgeConfig::from_env()?;
    let pipeline = EdgePipeline::new(
        SeoRewriter::new()?,
        config.template_mode.clone(),
        config.timezone,
    );
    let origin = OriginClient::new(config.origin_url.clone(), config.origin_timeout);

    tracing::info!(
        "SEO edge proxying {} ({:?}, timezone {})",
        config.origin_url,
        config.template_mode,
        config.timezone
    );

    let app = build_router(AppState::new(pipeline, origin));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
