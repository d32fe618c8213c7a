//! End-to-end tests over in-memory stores and recording transports.

mod batch_runner;
mod helpers;
mod reminder_flow;
