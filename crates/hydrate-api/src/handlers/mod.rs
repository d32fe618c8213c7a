//! Route handlers.

pub mod health;
pub mod reminder;
pub mod worker;
