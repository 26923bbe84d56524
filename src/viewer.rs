//! Application state of a viewing session.
//!
//! Everything the page can change lives in [`Viewer`]: map view, filter form,
//! detail panel and sidebar. Handlers receive it through the server state;
//! there is no ambient global.

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::catalog::{Catalog, MarkerLocation};
use crate::constants::{MSG_DOWNLOADING, MSG_SEARCHING};
use crate::error::ViewerError;
use crate::filters::{FilterOutcome, FilterQuery, FilterState};
use crate::imagery::{Imagery, ImageryProvider};
use crate::notify::Notifier;
use crate::panel::{PanelContent, PanelState};
use crate::server::events::ViewerEvent;
use crate::time_range::{DateRange, TimeRange};
use crate::viewport::{MapView, ViewportChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub collapsed: bool,
    pub toggle_label: &'static str,
}

impl SidebarState {
    fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            toggle_label: if collapsed { "▶" } else { "◀" },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub map: MapView,
    pub coordinates_label: Option<String>,
    pub zoom_label: String,
    pub filters: FilterState,
    pub panel: PanelState,
    pub sidebar: SidebarState,
}

pub struct Viewer {
    catalog: Catalog,
    notifier: Notifier,
    map: MapView,
    filters: FilterState,
    panel: PanelState,
    sidebar_collapsed: bool,
}

impl Viewer {
    pub fn new(catalog: Catalog, notifier: Notifier, today: NaiveDate) -> Self {
        Self {
            catalog,
            notifier,
            map: MapView::default(),
            filters: FilterState::new(today),
            panel: PanelState::default(),
            sidebar_collapsed: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn change_zone(&mut self, token: &str) -> ViewportChange {
        let change = self.filters.change_zone(token);
        if self.map.apply(change) {
            self.notifier.publish(ViewerEvent::view_changed(self.map.view));
        } else {
            tracing::debug!("Zone {:?} left the view unchanged", token);
        }
        change
    }

    pub fn change_time_range(&mut self, range: TimeRange, today: NaiveDate) -> Option<DateRange> {
        let dates = self.filters.change_time_range(range, today)?;
        tracing::debug!("Time range {} resolved to {} .. {}", range, dates.start, dates.end);
        self.notifier.publish(ViewerEvent::dates_changed(dates));
        Some(dates)
    }

    pub fn apply_filters(&mut self, query: FilterQuery) -> FilterOutcome {
        let outcome = self.filters.apply(query);
        self.notifier.notify(outcome.message);
        outcome
    }

    pub fn reset_filters(&mut self, today: NaiveDate) -> ViewerSnapshot {
        let message = self.filters.reset(today);
        self.map.reset();
        self.notifier.publish(ViewerEvent::view_changed(self.map.view));
        self.notifier.publish(ViewerEvent::dates_changed(self.filters.dates()));
        self.notifier.notify(message);
        self.snapshot()
    }

    /// First half of a marker click: announces the search and hands back the
    /// location to fetch imagery for.
    pub fn begin_marker_lookup(&self, marker_id: &str) -> Result<MarkerLocation, ViewerError> {
        let marker = self
            .catalog
            .find(marker_id)
            .ok_or_else(|| ViewerError::UnknownMarker(marker_id.to_string()))?;
        let location = marker
            .location()
            .cloned()
            .ok_or_else(|| ViewerError::NoImagery(marker_id.to_string()))?;

        self.notifier.notify(MSG_SEARCHING);
        Ok(location)
    }

    /// Second half: opens the panel, replacing anything already shown.
    pub fn finish_marker_lookup(&mut self, location: &MarkerLocation, imagery: &Imagery) -> PanelContent {
        let content = self.panel.open(location, imagery);
        self.notifier.publish(ViewerEvent::panel_changed(self.panel.clone()));
        content
    }

    pub fn close_panel(&mut self) {
        self.panel.close();
        self.notifier.publish(ViewerEvent::panel_changed(PanelState::Closed));
    }

    pub fn toggle_sidebar(&mut self) -> SidebarState {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        SidebarState::new(self.sidebar_collapsed)
    }

    pub fn pointer_moved(&mut self, lat: f64, lon: f64) -> Option<String> {
        self.map.pointer_moved(lat, lon);
        self.map.coordinates_label()
    }

    pub fn zoom_changed(&mut self, zoom: u8) -> String {
        self.map.zoom_changed(zoom);
        self.map.zoom_label()
    }

    pub fn download_started(&self, path: &str) {
        tracing::info!("⬇️  Download requested: {}", path);
        self.notifier.notify(MSG_DOWNLOADING);
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            map: self.map.clone(),
            coordinates_label: self.map.coordinates_label(),
            zoom_label: self.map.zoom_label(),
            filters: self.filters.clone(),
            panel: self.panel.clone(),
            sidebar: SidebarState::new(self.sidebar_collapsed),
        }
    }
}

/// Full marker click: notify, wait for imagery, open the panel.
///
/// The lock is released while the provider runs, so other controls stay
/// responsive during the lookup. If several lookups overlap, the last one to
/// finish is what the panel shows.
pub async fn select_marker(
    viewer: &Mutex<Viewer>,
    provider: &dyn ImageryProvider,
    marker_id: &str,
) -> Result<PanelContent, ViewerError> {
    let location = viewer.lock().await.begin_marker_lookup(marker_id)?;
    let imagery = provider.fetch_imagery(&location).await?;
    Ok(viewer.lock().await.finish_marker_lookup(&location, &imagery))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Resolution;
    use crate::imagery::SimulatedImagery;
    use crate::viewport::Viewport;
    use std::time::Duration;
    use tokio::sync::broadcast;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
    }

    fn viewer() -> (Viewer, broadcast::Receiver<ViewerEvent>) {
        let (tx, rx) = broadcast::channel(64);
        let notifier = Notifier::new(tx, Duration::from_millis(5));
        (Viewer::new(Catalog::builtin(), notifier, today()), rx)
    }

    fn drain(rx: &mut broadcast::Receiver<ViewerEvent>) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn zone_change_moves_map_and_publishes() {
        let (mut viewer, mut rx) = viewer();
        viewer.change_zone("africa");
        assert_eq!(
            viewer.map().view,
            Viewport {
                lat: 0.0,
                lon: 20.0,
                zoom: 4
            }
        );
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "view_changed");

        viewer.change_zone("");
        assert_eq!(viewer.map().view.lon, 20.0);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn reset_restores_filters_and_global_view() {
        let (mut viewer, _rx) = viewer();
        viewer.change_zone("asia");
        viewer.change_time_range(TimeRange::Last30Days, today());
        viewer.apply_filters(FilterQuery {
            zone: "asia".to_string(),
            date_start: Some(today()),
            date_end: Some(today()),
            event_type: "incendio".to_string(),
            resolution: Resolution::Low,
        });

        let snapshot = viewer.reset_filters(today());
        assert_eq!(snapshot.filters.zone, "");
        assert_eq!(snapshot.filters.event_type, "");
        assert_eq!(snapshot.filters.resolution, Resolution::High);
        assert_eq!(snapshot.filters.time_range, TimeRange::Last7Days);
        assert_eq!(snapshot.map.view, Viewport::initial());
        assert_eq!(snapshot.zoom_label, "Zoom: 2");
    }

    #[tokio::test]
    async fn selecting_a_site_opens_panel_after_search_notice() {
        let (viewer, mut rx) = viewer();
        let viewer = Mutex::new(viewer);
        let provider = SimulatedImagery::new(Duration::ZERO);

        let content = select_marker(&viewer, &provider, "turis").await.unwrap();
        assert_eq!(content.title, "Turís, Valencia");
        assert_eq!(content.image.satellite, "Sentinel-1");
        assert!(viewer.lock().await.panel().is_open());

        let events = drain(&mut rx);
        assert_eq!(events[0].event_type, "notification");
        assert_eq!(events[0].data.message.as_deref(), Some("Buscando imágenes SAR..."));
        assert_eq!(events[1].event_type, "panel_changed");
    }

    #[tokio::test]
    async fn second_selection_replaces_panel_and_close_clears_it() {
        let (viewer, _rx) = viewer();
        let viewer = Mutex::new(viewer);
        let provider = SimulatedImagery::new(Duration::ZERO);

        select_marker(&viewer, &provider, "turis").await.unwrap();
        select_marker(&viewer, &provider, "la-palma").await.unwrap();
        {
            let guard = viewer.lock().await;
            let content = guard.panel().content().unwrap();
            assert_eq!(content.title, "Volcán de La Palma, Canarias");
        }

        viewer.lock().await.close_panel();
        assert_eq!(viewer.lock().await.panel(), &PanelState::Closed);
    }

    #[tokio::test]
    async fn example_and_unknown_markers_do_not_open_panel() {
        let (viewer, mut rx) = viewer();
        let viewer = Mutex::new(viewer);
        let provider = SimulatedImagery::new(Duration::ZERO);

        let err = select_marker(&viewer, &provider, "tokio").await.unwrap_err();
        assert!(matches!(err, ViewerError::NoImagery(_)));
        let err = select_marker(&viewer, &provider, "atlantis").await.unwrap_err();
        assert!(matches!(err, ViewerError::UnknownMarker(_)));

        assert!(!viewer.lock().await.panel().is_open());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn sidebar_toggle_flips_glyph() {
        let (mut viewer, _rx) = viewer();
        assert_eq!(viewer.snapshot().sidebar.toggle_label, "◀");
        let state = viewer.toggle_sidebar();
        assert!(state.collapsed);
        assert_eq!(state.toggle_label, "▶");
        assert!(!viewer.toggle_sidebar().collapsed);
    }

    #[tokio::test]
    async fn pointer_and_zoom_update_labels() {
        let (mut viewer, _rx) = viewer();
        assert_eq!(
            viewer.pointer_moved(28.57191, -17.84489).as_deref(),
            Some("Lat: 28.5719, Lon: -17.8449")
        );
        assert_eq!(viewer.zoom_changed(7), "Zoom: 7");
        assert_eq!(viewer.snapshot().zoom_label, "Zoom: 7");
    }
}
