use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use super::events::ViewerEvent;
use crate::catalog::Catalog;
use crate::imagery::{ImageryProvider, SimulatedImagery};
use crate::notify::Notifier;
use crate::settings::Settings;
use crate::time_range::today;
use crate::viewer::Viewer;

// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub viewer: Arc<Mutex<Viewer>>,
    pub imagery: Arc<dyn ImageryProvider>,
    pub settings: Arc<Settings>,
    pub event_sender: broadcast::Sender<ViewerEvent>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let provider = SimulatedImagery::new(settings.lookup_delay());
        Self::with_provider(settings, Arc::new(provider))
    }

    pub fn with_provider(settings: Settings, imagery: Arc<dyn ImageryProvider>) -> Self {
        let (event_sender, _event_receiver) = broadcast::channel(100);
        let notifier = Notifier::new(event_sender.clone(), settings.notification_dismiss());
        let viewer = Viewer::new(Catalog::builtin(), notifier, today());

        Self {
            viewer: Arc::new(Mutex::new(viewer)),
            imagery,
            settings: Arc::new(settings),
            event_sender,
        }
    }
}
