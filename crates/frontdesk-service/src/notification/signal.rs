//! Creation signals for downstream channels.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use frontdesk_entity::notification::Notification;

/// Emitted once per persisted notification, after its transaction commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationCreated {
    /// The full persisted record.
    pub notification: Notification,
}

/// Broadcast channel of [`NotificationCreated`] signals.
///
/// Having no subscriber is normal; signals are then dropped.
#[derive(Debug, Clone)]
pub struct NotificationSignals {
    sender: broadcast::Sender<NotificationCreated>,
}

impl NotificationSignals {
    /// Creates a channel buffering up to `buffer_size` signals per receiver.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size.max(1));
        Self { sender }
    }

    /// Subscribe to future signals.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationCreated> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Emit one signal. Returns how many subscribers received it.
    pub fn emit(&self, notification: Notification) -> usize {
        let id = notification.id;
        match self.sender.send(NotificationCreated { notification }) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!(notification_id = %id, "No subscribers for notification signal");
                0
            }
        }
    }
}

impl Default for NotificationSignals {
    fn default() -> Self {
        Self::new(256)
    }
}
