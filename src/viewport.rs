use serde::{Deserialize, Serialize};

use crate::constants::{INITIAL_VIEW, MAX_ZOOM, ZONE_TABLE};

/// Named coarse geographic region used to recenter the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    NorteAmerica,
    SurAmerica,
    Europa,
    Asia,
    Africa,
    Oceania,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::NorteAmerica,
        Zone::SurAmerica,
        Zone::Europa,
        Zone::Asia,
        Zone::Africa,
        Zone::Oceania,
    ];

    pub fn id(self) -> &'static str {
        ZONE_TABLE[self as usize].0
    }

    /// Looks up a zone by its selector id. Empty or unknown ids return `None`.
    pub fn from_id(id: &str) -> Option<Zone> {
        Zone::ALL.into_iter().find(|zone| zone.id() == id)
    }

    pub fn viewport(self) -> Viewport {
        let (_, lat, lon, zoom) = ZONE_TABLE[self as usize];
        Viewport { lat, lon, zoom }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl Viewport {
    pub fn initial() -> Self {
        let (lat, lon, zoom) = INITIAL_VIEW;
        Viewport { lat, lon, zoom }
    }
}

/// Outcome of resolving a zone token
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ViewportChange {
    Recenter(Viewport),
    NoChange,
}

/// Resolves a zone selector value. The empty token and unrecognized ids leave
/// the view untouched.
pub fn resolve_zone(token: &str) -> ViewportChange {
    match Zone::from_id(token) {
        Some(zone) => ViewportChange::Recenter(zone.viewport()),
        None => ViewportChange::NoChange,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub lat: f64,
    pub lon: f64,
}

/// Current state of the map widget as last reported or commanded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub view: Viewport,
    pub pointer: Option<Pointer>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            view: Viewport::initial(),
            pointer: None,
        }
    }
}

impl MapView {
    pub fn set_view(&mut self, view: Viewport) {
        self.view = Viewport {
            zoom: view.zoom.min(MAX_ZOOM),
            ..view
        };
    }

    /// Applies a resolved change. Returns true when the view moved.
    pub fn apply(&mut self, change: ViewportChange) -> bool {
        match change {
            ViewportChange::Recenter(view) => {
                self.set_view(view);
                true
            }
            ViewportChange::NoChange => false,
        }
    }

    pub fn reset(&mut self) {
        self.set_view(Viewport::initial());
    }

    pub fn pointer_moved(&mut self, lat: f64, lon: f64) {
        self.pointer = Some(Pointer { lat, lon });
    }

    pub fn zoom_changed(&mut self, zoom: u8) {
        self.view.zoom = zoom.min(MAX_ZOOM);
    }

    pub fn coordinates_label(&self) -> Option<String> {
        self.pointer
            .map(|p| format!("Lat: {:.4}, Lon: {:.4}", p.lat, p.lon))
    }

    pub fn zoom_label(&self) -> String {
        format!("Zoom: {}", self.view.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_zone_resolves_to_its_documented_view() {
        let expected = [
            ("norte-america", 45.0, -100.0),
            ("sur-america", -15.0, -60.0),
            ("europa", 50.0, 10.0),
            ("asia", 35.0, 105.0),
            ("africa", 0.0, 20.0),
            ("oceania", -25.0, 135.0),
        ];
        for (id, lat, lon) in expected {
            assert_eq!(
                resolve_zone(id),
                ViewportChange::Recenter(Viewport { lat, lon, zoom: 4 }),
                "zone {id}"
            );
        }
    }

    #[test]
    fn empty_and_unknown_zones_do_not_move_the_view() {
        assert_eq!(resolve_zone(""), ViewportChange::NoChange);
        assert_eq!(resolve_zone("bogus"), ViewportChange::NoChange);
        assert_eq!(Zone::from_id("Europa"), None);

        let mut map = MapView::default();
        assert!(!map.apply(resolve_zone("bogus")));
        assert_eq!(map.view, Viewport::initial());
    }

    #[test]
    fn zone_ids_round_trip_through_serde() {
        let json = serde_json::to_string(&Zone::NorteAmerica).unwrap();
        assert_eq!(json, "\"norte-america\"");
        assert_eq!(Zone::from_id(Zone::Oceania.id()), Some(Zone::Oceania));
    }

    #[test]
    fn labels_follow_pointer_and_zoom() {
        let mut map = MapView::default();
        assert_eq!(map.coordinates_label(), None);
        assert_eq!(map.zoom_label(), "Zoom: 2");

        map.pointer_moved(39.38974, -0.68501);
        map.zoom_changed(25);
        assert_eq!(
            map.coordinates_label().as_deref(),
            Some("Lat: 39.3897, Lon: -0.6850")
        );
        assert_eq!(map.zoom_label(), "Zoom: 19");
    }

    #[test]
    fn reset_returns_to_global_view() {
        let mut map = MapView::default();
        map.apply(resolve_zone("asia"));
        assert_eq!(map.view.lon, 105.0);
        map.reset();
        assert_eq!(
            map.view,
            Viewport {
                lat: 20.0,
                lon: 0.0,
                zoom: 2
            }
        );
    }
}
