//! SAR Viewer: a local map viewer for browsing SAR imagery.
//!
//! The binary serves an embedded Leaflet page. Zone, date-range and event-type
//! logic, the marker catalog and the imagery panel all live here; the page
//! only renders what the API returns.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod event_type;
pub mod filters;
pub mod imagery;
pub mod notify;
pub mod panel;
pub mod server;
pub mod settings;
pub mod time_range;
pub mod utils;
pub mod viewer;
pub mod viewport;
