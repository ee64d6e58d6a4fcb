//! # frontdesk-service
//!
//! The notification core of Frontdesk. [`NotificationService`] is the only
//! place notifications are created (fan-out with no-self filtering and
//! deduplication) and the only mutator of their read state. The
//! [`events`] module translates typed domain events into fan-out calls.
//!
//! Services follow constructor injection: storage is provided at
//! construction time via `Arc` references.

pub mod context;
pub mod events;
pub mod notification;

pub use context::RequestContext;
pub use events::{EventHandler, EventRegistry};
pub use notification::{
    DeepLinkResolver, NotificationDeduplicator, NotificationPage, NotificationRequest,
    NotificationService, NotificationSignals, Recipients,
};
