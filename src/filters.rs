use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MSG_FILTERS_APPLIED, MSG_FILTERS_RESET};
use crate::time_range::{DateRange, TimeRange};
use crate::viewport::{resolve_zone, ViewportChange};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    High,
    Medium,
    Low,
}

/// Values of the filter form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selector value, empty when no zone is chosen
    pub zone: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    /// Empty means every event type
    pub event_type: String,
    pub resolution: Resolution,
    pub time_range: TimeRange,
}

/// Snapshot of the form taken when the user applies filters. A cleared or
/// half-typed date picker arrives as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub zone: String,
    #[serde(deserialize_with = "picker_date")]
    pub date_start: Option<NaiveDate>,
    #[serde(deserialize_with = "picker_date")]
    pub date_end: Option<NaiveDate>,
    pub event_type: String,
    pub resolution: Resolution,
}

// Date inputs post `YYYY-MM-DD` or an empty string
fn picker_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| tracing::debug!("Ignoring date picker value {:?}: {}", value, e))
            .ok()
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub query: FilterQuery,
    pub message: &'static str,
}

impl FilterState {
    pub fn new(today: NaiveDate) -> Self {
        let dates = DateRange::default_for(today);
        Self {
            zone: String::new(),
            date_start: dates.start,
            date_end: dates.end,
            event_type: String::new(),
            resolution: Resolution::default(),
            time_range: TimeRange::default(),
        }
    }

    pub fn dates(&self) -> DateRange {
        DateRange {
            start: self.date_start,
            end: self.date_end,
        }
    }

    pub fn change_zone(&mut self, token: &str) -> ViewportChange {
        self.zone = token.to_string();
        resolve_zone(token)
    }

    /// Stores the selector value. Relative ranges rewrite both dates; `Custom`
    /// keeps whatever the pickers hold.
    pub fn change_time_range(&mut self, range: TimeRange, today: NaiveDate) -> Option<DateRange> {
        self.time_range = range;
        let dates = range.resolve(today)?;
        self.date_start = dates.start;
        self.date_end = dates.end;
        Some(dates)
    }

    /// Takes the submitted form values. Dates are edited freely, so the
    /// range selector is not consulted here. An empty picker keeps the
    /// previous date.
    pub fn apply(&mut self, query: FilterQuery) -> FilterOutcome {
        self.zone = query.zone.clone();
        if let Some(start) = query.date_start {
            self.date_start = start;
        }
        if let Some(end) = query.date_end {
            self.date_end = end;
        }
        self.event_type = query.event_type.clone();
        self.resolution = query.resolution;

        tracing::info!(
            zone = %query.zone,
            date_start = ?query.date_start,
            date_end = ?query.date_end,
            event_type = %query.event_type,
            resolution = ?query.resolution,
            "🔎 Applying filters"
        );

        FilterOutcome {
            query,
            message: MSG_FILTERS_APPLIED,
        }
    }

    /// Restores every control to its startup value.
    pub fn reset(&mut self, today: NaiveDate) -> &'static str {
        *self = FilterState::new(today);
        MSG_FILTERS_RESET
    }
}
