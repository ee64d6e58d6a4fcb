//! Notification domain entities.

pub mod entity_type;
pub mod event_type;
pub mod model;

pub use entity_type::EntityType;
pub use event_type::EventType;
pub use model::{DedupKey, Notification, NotificationContent, NotificationContext};
