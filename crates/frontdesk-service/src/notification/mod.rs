//! Notification fan-out, deduplication, deep links, and read state.

pub mod dedup;
pub mod deep_link;
pub mod recipients;
pub mod request;
pub mod service;
pub mod signal;

pub use dedup::NotificationDeduplicator;
pub use deep_link::{DeepLinkResolver, SYSTEM_ALERTS_PATH};
pub use recipients::Recipients;
pub use request::NotificationRequest;
pub use service::{NotificationPage, NotificationService};
pub use signal::{NotificationCreated, NotificationSignals};
