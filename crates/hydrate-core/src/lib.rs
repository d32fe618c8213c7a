//! # hydrate-core
//!
//! Core crate for Hydrate. Contains configuration schemas, transport
//! traits for the external collaborators (push, SMS, text generation),
//! the message types those traits exchange, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Hydrate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
