//! # hydrate-entity
//!
//! Domain entity models for Hydrate. Every struct in this crate represents
//! a stored record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod analytics;
pub mod hydration;
pub mod notification;
