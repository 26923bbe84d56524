use serde::Serialize;
use std::sync::Arc;

use crate::event_type::event_color_or_default;

// Location that carries a static SAR image reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLocation {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub image_path: String, // Relative to the imagery directory (e.g. "sar_simulado.png")
    pub date: String,
    pub satellite_name: String,
}

// Circle marker styling passed straight to the map widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius: u8,
    pub fill_color: String,
    pub color: String,
    pub weight: u8,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    fn example(event: &str) -> Self {
        Self {
            radius: 8,
            fill_color: event_color_or_default(event).to_string(),
            color: "#fff".to_string(),
            weight: 2,
            opacity: 1.0,
            fill_opacity: 0.7,
        }
    }

    fn sar_site(fill_color: &str) -> Self {
        Self {
            radius: 10,
            fill_color: fill_color.to_string(),
            color: "#fff".to_string(),
            weight: 3,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    /// Illustrative point with an event label and no imagery
    Example { event: String },
    /// Clicking opens the imagery panel
    SarSite { location: MarkerLocation },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub style: MarkerStyle,
    #[serde(flatten)]
    pub kind: MarkerKind,
}

impl Marker {
    fn example(id: &str, name: &str, lat: f64, lon: f64, event: &str) -> Self {
        Marker {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lon,
            style: MarkerStyle::example(event),
            kind: MarkerKind::Example {
                event: event.to_string(),
            },
        }
    }

    fn sar_site(id: &str, fill_color: &str, location: MarkerLocation) -> Self {
        Marker {
            id: id.to_string(),
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            style: MarkerStyle::sar_site(fill_color),
            kind: MarkerKind::SarSite { location },
        }
    }

    pub fn location(&self) -> Option<&MarkerLocation> {
        match &self.kind {
            MarkerKind::SarSite { location } => Some(location),
            MarkerKind::Example { .. } => None,
        }
    }

    /// Popup text, one entry per line; the first line is the bold title.
    pub fn popup_lines(&self) -> Vec<String> {
        let coords = format!("Coordenadas: {:.4}, {:.4}", self.lat, self.lon);
        match &self.kind {
            MarkerKind::Example { event } => {
                vec![self.name.clone(), format!("Evento: {}", event), coords]
            }
            MarkerKind::SarSite { .. } => vec![
                self.name.clone(),
                coords,
                "Click para ver imágenes SAR".to_string(),
            ],
        }
    }
}

/// Fixed set of markers created at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    markers: Arc<Vec<Marker>>,
}

impl Catalog {
    pub fn new(markers: Vec<Marker>) -> Self {
        Catalog {
            markers: Arc::new(markers),
        }
    }

    pub fn builtin() -> Self {
        let mut markers = vec![
            Marker::example("nueva-york", "Nueva York", 40.7128, -74.0060, "urbano"),
            Marker::example("los-angeles", "Los Ángeles", 34.0522, -118.2437, "incendio"),
            Marker::example("londres", "Londres", 51.5074, -0.1278, "urbano"),
            Marker::example("tokio", "Tokio", 35.6762, 139.6503, "terremoto"),
            Marker::example("sao-paulo", "São Paulo", -23.5505, -46.6333, "inundacion"),
            Marker::example("sydney", "Sydney", -33.8688, 151.2093, "incendio"),
            Marker::example("ciudad-de-mexico", "Ciudad de México", 19.4326, -99.1332, "terremoto"),
            Marker::example("nueva-delhi", "Nueva Delhi", 28.6139, 77.2090, "urbano"),
        ];

        markers.push(Marker::sar_site(
            "turis",
            "#ff6b6b",
            MarkerLocation {
                lat: 39.3897,
                lon: -0.6850,
                name: "Turís, Valencia".to_string(),
                image_path: "sar_simulado.png".to_string(),
                date: "2025-10-01".to_string(),
                satellite_name: "Sentinel-1".to_string(),
            },
        ));
        markers.push(Marker::sar_site(
            "la-palma",
            "#ff8800",
            MarkerLocation {
                lat: 28.5719,
                lon: -17.8449,
                name: "Volcán de La Palma, Canarias".to_string(),
                image_path: "la_palma_volcan_slide_sar_rgb.png".to_string(),
                date: "2021-10-15".to_string(),
                satellite_name: "Sentinel-1".to_string(),
            },
        ));

        Catalog::new(markers)
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn find(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}
