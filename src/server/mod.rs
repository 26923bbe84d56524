use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub mod events;
pub mod handlers;
pub mod state;

pub use self::state::AppState;
use handlers::{
    apply_filters, change_time_range, change_zone, close_panel, download_imagery, get_all_markers,
    get_config, get_state, index_html, pointer_moved, reset_filters, script_js,
    select_marker_handler, serve_imagery, style_css, toggle_sidebar, viewer_events_stream,
    zoom_changed,
};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/script.js", get(script_js))
        .route("/api/config", get(get_config))
        .route("/api/markers", get(get_all_markers))
        .route("/api/markers/:id/select", post(select_marker_handler))
        .route("/api/state", get(get_state))
        .route("/api/zone", post(change_zone))
        .route("/api/time-range", post(change_time_range))
        .route("/api/filters/apply", post(apply_filters))
        .route("/api/filters/reset", post(reset_filters))
        .route("/api/panel/close", post(close_panel))
        .route("/api/sidebar/toggle", post(toggle_sidebar))
        .route("/api/map/pointer", post(pointer_moved))
        .route("/api/map/zoom", post(zoom_changed))
        .route("/api/events", get(viewer_events_stream))
        .route("/api/download/*filepath", get(download_imagery))
        .route("/imagery/*filepath", get(serve_imagery))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.settings.host, state.settings.port)
        .parse()
        .context("Invalid host/port in settings")?;
    let imagery_dir = state.settings.imagery_dir.clone();

    let app = create_app(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🌐 Server running at http://{}", addr);
    tracing::info!("🛰️  Serving SAR imagery from {}", imagery_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown requested");
}
