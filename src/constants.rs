// Shared constant tables for the viewer

/// Initial global view: (lat, lon, zoom)
pub const INITIAL_VIEW: (f64, f64, u8) = (20.0, 0.0, 2);
pub const MAX_ZOOM: u8 = 19;

/// Zone id -> (center lat, center lon, zoom)
pub const ZONE_TABLE: [(&str, f64, f64, u8); 6] = [
    ("norte-america", 45.0, -100.0, 4),
    ("sur-america", -15.0, -60.0, 4),
    ("europa", 50.0, 10.0, 4),
    ("asia", 35.0, 105.0, 4),
    ("africa", 0.0, 20.0, 4),
    ("oceania", -25.0, 135.0, 4),
];

/// Event type -> marker fill color
pub const EVENT_COLOR_TABLE: [(&str, &str); 6] = [
    ("incendio", "#ff4444"),
    ("inundacion", "#4444ff"),
    ("terremoto", "#ff8800"),
    ("huracan", "#8844ff"),
    ("deforestacion", "#44ff44"),
    ("urbano", "#00d4ff"),
];
pub const DEFAULT_EVENT_COLOR: &str = "#ffffff";

// Filter form defaults
pub const DEFAULT_RESOLUTION: &str = "high";
pub const DEFAULT_TIME_RANGE: &str = "7d";

// Timers
pub const NOTIFICATION_DISMISS_MS: u64 = 3000;
pub const SIMULATED_LOOKUP_MS: u64 = 1000;

/// Ground resolution shown for every simulated SAR image
pub const SAR_IMAGE_RESOLUTION: &str = "5m";

// Base tile layer (dark theme)
pub const TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const TILE_SUBDOMAINS: &str = "abcd";
pub const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

// Notification texts
pub const MSG_SEARCHING: &str = "Buscando imágenes SAR...";
pub const MSG_FILTERS_APPLIED: &str = "Filtros aplicados. Buscando imágenes SAR...";
pub const MSG_FILTERS_RESET: &str = "Filtros restablecidos";
pub const MSG_DOWNLOADING: &str = "Descargando imagen SAR...";
