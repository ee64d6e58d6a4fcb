//! Tenant (hotel) entity.

pub mod model;

pub use model::Tenant;
