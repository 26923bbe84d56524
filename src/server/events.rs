use serde::{Deserialize, Serialize};

use crate::panel::PanelState;
use crate::time_range::DateRange;
use crate::viewport::Viewport;

// SSE Event types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerEvent {
    pub event_type: String,
    pub data: ViewerData,
}

impl ViewerEvent {
    pub fn new(event_type: &str, data: ViewerData) -> Self {
        Self {
            event_type: event_type.to_string(),
            data,
        }
    }

    pub fn view_changed(view: Viewport) -> Self {
        Self::new(
            "view_changed",
            ViewerData {
                view: Some(view),
                ..Default::default()
            },
        )
    }

    pub fn dates_changed(dates: DateRange) -> Self {
        Self::new(
            "dates_changed",
            ViewerData {
                dates: Some(dates),
                ..Default::default()
            },
        )
    }

    pub fn panel_changed(panel: PanelState) -> Self {
        Self::new(
            "panel_changed",
            ViewerData {
                panel: Some(panel),
                ..Default::default()
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_after_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<Viewport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none", skip_deserializing)]
    pub panel: Option<PanelState>,
}
