use anyhow::Context;
use report_composer::preview::{load_stocks, render_preview, select_preview_samples};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATA_PATH: &str = "data/data.json";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "report_preview=info,report_composer=info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // CLI argument wins over NASPICK_DATA_PATH
    let data_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NASPICK_DATA_PATH").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    let stocks = load_stocks(&data_path)
        .with_context(|| format!("Error loading data from {}", data_path))?;
    tracing::info!("Loaded {} stock records from {}", stocks.len(), data_path);

    let samples = select_preview_samples(&stocks);
    if samples.is_empty() {
        tracing::warn!("No records matched the preview selection");
    }

    println!("=== AI Report Samples (Simulation) ===\n");
    for stock in samples {
        println!("{}", render_preview(stock));
    }

    Ok(())
}
