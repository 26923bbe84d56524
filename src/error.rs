use axum::http::StatusCode;

use crate::imagery::ImageryError;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("unknown marker: {0}")]
    UnknownMarker(String),
    #[error("marker {0} has no SAR imagery")]
    NoImagery(String),
    #[error(transparent)]
    Imagery(#[from] ImageryError),
}

impl ViewerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewerError::UnknownMarker(_) => StatusCode::NOT_FOUND,
            ViewerError::NoImagery(_) | ViewerError::Imagery(ImageryError::NotAvailable(_)) => {
                StatusCode::CONFLICT
            }
            ViewerError::Imagery(ImageryError::Backend(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
