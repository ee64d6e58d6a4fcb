//! # frontdesk-database
//!
//! Storage for Frontdesk notifications. The [`store`] module defines the
//! traits the fan-out engine persists through; [`postgres`] implements
//! them with sqlx and [`memory`] keeps everything in process for tests and
//! single-node embedding. [`StoreManager`] picks the backend from
//! configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod provider;
pub mod store;

pub use connection::DatabasePool;
pub use provider::StoreManager;
pub use store::{Directory, NotificationFilter, NotificationStore, NotificationTransaction};
