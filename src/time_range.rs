use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative range selector. `Custom` leaves the date pickers alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Last24Hours,
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    pub fn token(self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "24h",
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::Custom => "custom",
        }
    }

    pub fn offset_days(self) -> Option<u64> {
        match self {
            TimeRange::Last24Hours => Some(1),
            TimeRange::Last7Days => Some(7),
            TimeRange::Last30Days => Some(30),
            TimeRange::Custom => None,
        }
    }

    /// Absolute window ending on `anchor`; `None` for `Custom`.
    pub fn resolve(self, anchor: NaiveDate) -> Option<DateRange> {
        let days = self.offset_days()?;
        // Fall back to the anchor itself at the bottom of chrono's range
        let start = anchor.checked_sub_days(Days::new(days)).unwrap_or(anchor);
        Some(DateRange { start, end: anchor })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range token: {0:?}")]
pub struct UnknownTimeRange(pub String);

impl FromStr for TimeRange {
    type Err = UnknownTimeRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimeRange::Last24Hours),
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            "custom" => Ok(TimeRange::Custom),
            other => Err(UnknownTimeRange(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Window shown at startup and after a reset: the last seven days.
    pub fn default_for(today: NaiveDate) -> Self {
        TimeRange::Last7Days
            .resolve(today)
            .unwrap_or(DateRange {
                start: today,
                end: today,
            })
    }
}

/// Local calendar date, no timezone handling
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
