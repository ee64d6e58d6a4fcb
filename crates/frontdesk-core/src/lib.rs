//! # frontdesk-core
//!
//! Core crate for Frontdesk, the multi-tenant in-app notification engine.
//! Contains configuration schemas, typed identifiers, pagination types,
//! the public identifier codec, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Frontdesk crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use codec::IdCodec;
pub use error::AppError;
pub use result::AppResult;
