use serde::Serialize;

use crate::catalog::MarkerLocation;
use crate::imagery::Imagery;

/// Contents rendered by the open detail panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelContent {
    pub title: String,
    pub coordinates: String,
    pub image: PanelImage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelImage {
    pub src: String,
    pub download_url: String,
    pub download_name: String,
    pub date: String,
    pub resolution: String,
    pub satellite: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "content", rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open(PanelContent),
}

impl PanelState {
    /// Replaces whatever is shown, open or not.
    pub fn open(&mut self, location: &MarkerLocation, imagery: &Imagery) -> PanelContent {
        let content = PanelContent {
            title: location.name.clone(),
            coordinates: format!("Lat: {:.4}, Lon: {:.4}", location.lat, location.lon),
            image: PanelImage {
                src: format!("/imagery/{}", imagery.image_path),
                download_url: format!("/api/download/{}", imagery.image_path),
                download_name: imagery.download_name().to_string(),
                date: imagery.date.clone(),
                resolution: imagery.resolution.clone(),
                satellite: imagery.satellite.clone(),
            },
        };
        *self = PanelState::Open(content.clone());
        content
    }

    pub fn close(&mut self) {
        *self = PanelState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open(_))
    }

    pub fn content(&self) -> Option<&PanelContent> {
        match self {
            PanelState::Open(content) => Some(content),
            PanelState::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn site(id: &str) -> (MarkerLocation, Imagery) {
        let location = Catalog::builtin()
            .find(id)
            .and_then(|m| m.location().cloned())
            .unwrap();
        let imagery = Imagery {
            image_path: location.image_path.clone(),
            date: location.date.clone(),
            resolution: "5m".to_string(),
            satellite: location.satellite_name.clone(),
        };
        (location, imagery)
    }

    #[test]
    fn open_then_close_clears_content() {
        let (location, imagery) = site("turis");
        let mut panel = PanelState::default();
        panel.open(&location, &imagery);
        assert!(panel.is_open());
        assert_eq!(
            panel.content().unwrap().coordinates,
            "Lat: 39.3897, Lon: -0.6850"
        );

        panel.close();
        assert!(!panel.is_open());
        assert_eq!(panel.content(), None);
    }

    #[test]
    fn second_open_replaces_first() {
        let (turis, turis_img) = site("turis");
        let (palma, palma_img) = site("la-palma");
        let mut panel = PanelState::default();
        panel.open(&turis, &turis_img);
        panel.open(&palma, &palma_img);

        let content = panel.content().unwrap();
        assert_eq!(content.title, "Volcán de La Palma, Canarias");
        assert_eq!(content.image.src, "/imagery/la_palma_volcan_slide_sar_rgb.png");
        assert_eq!(content.image.date, "2021-10-15");
        assert_eq!(content.image.download_name, "la_palma_volcan_slide_sar_rgb.png");
    }

    #[test]
    fn closing_a_closed_panel_is_harmless() {
        let mut panel = PanelState::Closed;
        panel.close();
        assert_eq!(panel, PanelState::Closed);
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(PanelState::Closed).unwrap();
        assert_eq!(json["state"], "closed");
    }
}
