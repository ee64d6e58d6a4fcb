//! PostgreSQL storage backend.

pub mod directory;
pub mod notification;

pub use directory::PgDirectory;
pub use notification::{PgNotificationStore, PgNotificationTransaction};
