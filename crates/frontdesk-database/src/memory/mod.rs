//! In-process storage backend.

pub mod directory;
pub mod notification;

pub use directory::MemoryDirectory;
pub use notification::{MemoryNotificationStore, MemoryNotificationTransaction};
