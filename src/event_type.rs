use crate::constants::{DEFAULT_EVENT_COLOR, EVENT_COLOR_TABLE};

/// Color for a known event type label
pub fn event_color(event_type: &str) -> Option<&'static str> {
    EVENT_COLOR_TABLE
        .iter()
        .find(|(label, _)| *label == event_type)
        .map(|(_, color)| *color)
}

/// Same as [`event_color`] but total: unmatched labels are drawn white.
pub fn event_color_or_default(event_type: &str) -> &'static str {
    event_color(event_type).unwrap_or(DEFAULT_EVENT_COLOR)
}
