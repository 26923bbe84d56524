use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sar_viewer::server::{start_server, AppState};
use sar_viewer::settings::Settings;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_logging(&settings.log_filter);

    tracing::info!("🗺️  SAR Viewer v{} starting...", env!("CARGO_PKG_VERSION"));
    let config_path = Settings::config_path();
    tracing::info!("⚙️  Config file: {}", config_path.display());
    if !config_path.exists() {
        match settings.save() {
            Ok(()) => tracing::info!("📝 Wrote default settings"),
            Err(e) => tracing::warn!("Could not write default settings: {:#}", e),
        }
    }

    if !settings.imagery_dir.exists() {
        tracing::warn!(
            "⚠️  Imagery directory not found: {} (panel images will not load)",
            settings.imagery_dir.display()
        );
    }

    let state = AppState::new(settings);
    start_server(state).await?;

    Ok(())
}
