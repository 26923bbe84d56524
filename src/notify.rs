use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::server::events::{ViewerData, ViewerEvent};

/// Publishes transient notifications to every connected page.
///
/// Each notification is dismissed by a detached timer; nothing cancels it.
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<ViewerEvent>,
    dismiss_after: Duration,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new(sender: broadcast::Sender<ViewerEvent>, dismiss_after: Duration) -> Self {
        Self {
            sender,
            dismiss_after,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn notify(&self, message: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::info!("🔔 {}", message);

        // No receivers is fine: nobody has the page open
        let _ = self.sender.send(ViewerEvent::new(
            "notification",
            ViewerData {
                notification_id: Some(id),
                message: Some(message.to_string()),
                dismiss_after_ms: Some(self.dismiss_after.as_millis() as u64),
                ..Default::default()
            },
        ));

        let sender = self.sender.clone();
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            let _ = sender.send(ViewerEvent::new(
                "notification_dismissed",
                ViewerData {
                    notification_id: Some(id),
                    ..Default::default()
                },
            ));
        });

        id
    }

    /// Broadcasts a non-notification event as-is.
    pub fn publish(&self, event: ViewerEvent) {
        let _ = self.sender.send(event);
    }
}
