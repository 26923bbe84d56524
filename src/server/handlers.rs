use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{sse::Event as SseEvent, Html, IntoResponse, Json, Response, Sse},
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;

use super::events::{ViewerData, ViewerEvent};
use super::state::AppState;
use crate::catalog::Marker;
use crate::constants::{
    DEFAULT_EVENT_COLOR, DEFAULT_RESOLUTION, DEFAULT_TIME_RANGE, EVENT_COLOR_TABLE, MAX_ZOOM,
    TILE_ATTRIBUTION, TILE_SUBDOMAINS, TILE_URL,
};
use crate::filters::{FilterOutcome, FilterQuery};
use crate::panel::{PanelContent, PanelState};
use crate::time_range::{today, DateRange, TimeRange};
use crate::utils::{file_name_of, get_mime_type, safe_join};
use crate::viewer::{select_marker, SidebarState, ViewerSnapshot};
use crate::viewport::{Viewport, ViewportChange, Zone};

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn embedded(name: &str, content_type: &'static str) -> Result<Response, StatusCode> {
    let file = Asset::get(name).ok_or_else(|| {
        tracing::error!("Embedded asset missing: {}", name);
        StatusCode::NOT_FOUND
    })?;
    Ok(([(header::CONTENT_TYPE, content_type)], file.data.into_owned()).into_response())
}

pub async fn index_html() -> Result<Html<Vec<u8>>, StatusCode> {
    let file = Asset::get("index.html").ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(file.data.into_owned()))
}

pub async fn style_css() -> Result<Response, StatusCode> {
    embedded("style.css", "text/css")
}

pub async fn script_js() -> Result<Response, StatusCode> {
    embedded("script.js", "application/javascript")
}

// Static map configuration consumed by the page at startup
#[derive(Serialize, Debug)]
pub struct MapConfig {
    pub tile_url: &'static str,
    pub tile_subdomains: &'static str,
    pub tile_attribution: &'static str,
    pub max_zoom: u8,
    pub initial_view: Viewport,
    pub zones: Vec<ZoneInfo>,
    pub event_colors: Vec<EventColorInfo>,
    pub default_event_color: &'static str,
    pub default_resolution: &'static str,
    pub default_time_range: &'static str,
    pub notification_dismiss_ms: u64,
}

#[derive(Serialize, Debug)]
pub struct ZoneInfo {
    pub id: &'static str,
    pub view: Viewport,
}

#[derive(Serialize, Debug)]
pub struct EventColorInfo {
    pub event_type: &'static str,
    pub color: &'static str,
}

pub async fn get_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(MapConfig {
        tile_url: TILE_URL,
        tile_subdomains: TILE_SUBDOMAINS,
        tile_attribution: TILE_ATTRIBUTION,
        max_zoom: MAX_ZOOM,
        initial_view: Viewport::initial(),
        zones: Zone::ALL
            .into_iter()
            .map(|zone| ZoneInfo {
                id: zone.id(),
                view: zone.viewport(),
            })
            .collect(),
        event_colors: EVENT_COLOR_TABLE
            .iter()
            .map(|&(event_type, color)| EventColorInfo { event_type, color })
            .collect(),
        default_event_color: DEFAULT_EVENT_COLOR,
        default_resolution: DEFAULT_RESOLUTION,
        default_time_range: DEFAULT_TIME_RANGE,
        notification_dismiss_ms: state.settings.notification_dismiss_ms,
    })
}

// Structure for API responses
#[derive(Serialize, Debug)]
pub struct MarkerResponse {
    #[serde(flatten)]
    pub marker: Marker,
    pub popup: Vec<String>,
    pub selectable: bool,
}

pub async fn get_all_markers(State(state): State<AppState>) -> Json<Vec<MarkerResponse>> {
    let viewer = state.viewer.lock().await;
    let markers = viewer
        .catalog()
        .all()
        .iter()
        .map(|marker| MarkerResponse {
            popup: marker.popup_lines(),
            selectable: marker.location().is_some(),
            marker: marker.clone(),
        })
        .collect();
    Json(markers)
}

pub async fn get_state(State(state): State<AppState>) -> Json<ViewerSnapshot> {
    Json(state.viewer.lock().await.snapshot())
}

#[derive(Deserialize, Debug)]
pub struct ZoneRequest {
    #[serde(default)]
    pub zone: String,
}

pub async fn change_zone(
    State(state): State<AppState>,
    Json(payload): Json<ZoneRequest>,
) -> Json<ViewportChange> {
    Json(state.viewer.lock().await.change_zone(&payload.zone))
}

#[derive(Deserialize, Debug)]
pub struct TimeRangeRequest {
    pub range: String,
}

#[derive(Serialize, Debug)]
pub struct TimeRangeResponse {
    pub changed: bool,
    pub time_range: TimeRange,
    pub dates: DateRange,
}

// Unknown tokens are ignored, same as choosing "custom" without dates
pub async fn change_time_range(
    State(state): State<AppState>,
    Json(payload): Json<TimeRangeRequest>,
) -> Json<TimeRangeResponse> {
    let mut viewer = state.viewer.lock().await;
    let changed = match payload.range.parse::<TimeRange>() {
        Ok(range) => viewer.change_time_range(range, today()).is_some(),
        Err(e) => {
            tracing::warn!("{}", e);
            false
        }
    };

    let filters = viewer.filters();
    Json(TimeRangeResponse {
        changed,
        time_range: filters.time_range,
        dates: filters.dates(),
    })
}

pub async fn apply_filters(
    State(state): State<AppState>,
    Json(query): Json<FilterQuery>,
) -> Json<FilterOutcome> {
    Json(state.viewer.lock().await.apply_filters(query))
}

pub async fn reset_filters(State(state): State<AppState>) -> Json<ViewerSnapshot> {
    Json(state.viewer.lock().await.reset_filters(today()))
}

pub async fn select_marker_handler(
    State(state): State<AppState>,
    AxumPath(marker_id): AxumPath<String>,
) -> Result<Json<PanelContent>, StatusCode> {
    let content = select_marker(&state.viewer, state.imagery.as_ref(), &marker_id)
        .await
        .map_err(|e| {
            tracing::warn!("Marker selection failed: {}", e);
            e.status()
        })?;
    Ok(Json(content))
}

pub async fn close_panel(State(state): State<AppState>) -> Json<PanelState> {
    let mut viewer = state.viewer.lock().await;
    viewer.close_panel();
    Json(viewer.panel().clone())
}

pub async fn toggle_sidebar(State(state): State<AppState>) -> Json<SidebarState> {
    Json(state.viewer.lock().await.toggle_sidebar())
}

#[derive(Deserialize, Debug)]
pub struct PointerRequest {
    pub lat: f64,
    pub lon: f64,
}

pub async fn pointer_moved(
    State(state): State<AppState>,
    Json(payload): Json<PointerRequest>,
) -> Json<serde_json::Value> {
    let label = state
        .viewer
        .lock()
        .await
        .pointer_moved(payload.lat, payload.lon);
    Json(serde_json::json!({ "coordinates": label }))
}

#[derive(Deserialize, Debug)]
pub struct ZoomRequest {
    pub zoom: u8,
}

pub async fn zoom_changed(
    State(state): State<AppState>,
    Json(payload): Json<ZoomRequest>,
) -> Json<serde_json::Value> {
    let label = state.viewer.lock().await.zoom_changed(payload.zoom);
    Json(serde_json::json!({ "zoom": label }))
}

async fn read_imagery(state: &AppState, filepath: &str) -> Result<Vec<u8>, StatusCode> {
    let path = safe_join(&state.settings.imagery_dir, filepath).ok_or_else(|| {
        tracing::warn!("Rejected imagery path: {}", filepath);
        StatusCode::BAD_REQUEST
    })?;

    match tokio::fs::read(&path).await {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Imagery file not found: {}", path.display());
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn serve_imagery(
    State(state): State<AppState>,
    AxumPath(filepath): AxumPath<String>,
) -> Result<Response, StatusCode> {
    let data = read_imagery(&state, &filepath).await?;
    let content_type = get_mime_type(std::path::Path::new(&filepath));
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        data,
    )
        .into_response())
}

pub async fn download_imagery(
    State(state): State<AppState>,
    AxumPath(filepath): AxumPath<String>,
) -> Result<Response, StatusCode> {
    state.viewer.lock().await.download_started(&filepath);
    let data = read_imagery(&state, &filepath).await?;

    let content_type = get_mime_type(std::path::Path::new(&filepath));
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file_name_of(&filepath).replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

// SSE endpoint for viewer updates
pub async fn viewer_events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::channel(100);

    // Subscribe to the main event sender
    let mut event_receiver = state.event_sender.subscribe();

    // Forward events from main sender to SSE stream
    tokio::spawn(async move {
        let mut heartbeat_timer = tokio::time::interval(Duration::from_secs(30));
        // First tick completes immediately
        heartbeat_timer.tick().await;

        loop {
            tokio::select! {
                event = event_receiver.recv() => {
                    match event {
                        Ok(viewer_event) => {
                            let sse_event = SseEvent::default()
                                .json_data(&viewer_event)
                                .unwrap_or_else(|_| SseEvent::default().data("Error serializing event"));

                            if tx.send(Ok(sse_event)).await.is_err() {
                                break; // Client disconnected
                            }
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!("SSE client lagged, {} events skipped", skipped);
                        }
                        Err(_) => break, // Channel closed
                    }
                }
                _ = heartbeat_timer.tick() => {
                    // Send periodic heartbeat
                    let heartbeat = ViewerEvent::new(
                        "heartbeat",
                        ViewerData {
                            message: Some("SSE connection alive".to_string()),
                            ..Default::default()
                        },
                    );

                    let sse_event = SseEvent::default()
                        .json_data(&heartbeat)
                        .unwrap_or_else(|_| SseEvent::default().data("Error serializing heartbeat"));

                    if tx.send(Ok(sse_event)).await.is_err() {
                        break; // Client disconnected
                    }
                }
            }
        }
    });

    let stream = ReceiverStream::new(rx);

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive-message"),
    )
}
