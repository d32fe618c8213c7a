//! # hydrate-api
//!
//! HTTP API layer for Hydrate built on Axum.
//!
//! Exposes the reminder orchestrator, a manual batch drain, and a health
//! check, with error mapping from `AppError` to status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
