//! `smartstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod currency;
pub mod entity;
pub mod error;
pub mod id;

pub use currency::Currency;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
