//! # frontdesk-entity
//!
//! Domain entity models for Frontdesk. Stored entities derive
//! `sqlx::FromRow`; source entities (tasks, meetings, chat messages,
//! video rooms) are owned by other systems and only carry the fields the
//! notification engine reads.

pub mod event;
pub mod notification;
pub mod source;
pub mod tenant;
pub mod user;
