//! Imagery retrieval.
//!
//! The panel only ever talks to an [`ImageryProvider`]. The bundled
//! [`SimulatedImagery`] stands in for a remote SAR archive: it waits a fixed
//! delay and returns the static image already associated with the location.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::catalog::MarkerLocation;
use crate::constants::{SAR_IMAGE_RESOLUTION, SIMULATED_LOOKUP_MS};

/// One image entry shown in the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imagery {
    pub image_path: String,
    pub date: String,
    pub resolution: String,
    pub satellite: String,
}

impl Imagery {
    /// File name offered by the download action
    pub fn download_name(&self) -> &str {
        self.image_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.image_path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageryError {
    #[error("no imagery available for {0}")]
    NotAvailable(String),
    #[error("imagery backend failed: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ImageryProvider: Send + Sync {
    async fn fetch_imagery(&self, location: &MarkerLocation) -> Result<Imagery, ImageryError>;
}

/// Fixed-delay provider backed by the static files referenced in the catalog
#[derive(Debug, Clone)]
pub struct SimulatedImagery {
    delay: Duration,
}

impl SimulatedImagery {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedImagery {
    fn default() -> Self {
        Self::new(Duration::from_millis(SIMULATED_LOOKUP_MS))
    }
}

#[async_trait]
impl ImageryProvider for SimulatedImagery {
    async fn fetch_imagery(&self, location: &MarkerLocation) -> Result<Imagery, ImageryError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if location.image_path.is_empty() {
            return Err(ImageryError::NotAvailable(location.name.clone()));
        }

        tracing::debug!(
            "🛰️  Simulated imagery for {} -> {}",
            location.name,
            location.image_path
        );

        Ok(Imagery {
            image_path: location.image_path.clone(),
            date: location.date.clone(),
            resolution: SAR_IMAGE_RESOLUTION.to_string(),
            satellite: location.satellite_name.clone(),
        })
    }
}
