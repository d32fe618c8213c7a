//! Scheduled delivery of queued reminders for Hydrate.
//!
//! This crate provides:
//! - A batch runner that drains due records with bounded concurrency
//! - A cron scheduler that triggers the runner and skips overlapping runs
//! - The handler seam and the reminder handler that sends each record

pub mod executor;
pub mod jobs;
pub mod runner;
pub mod scheduler;

pub use executor::{DeliveryJobError, NotificationHandler};
pub use jobs::ReminderJobHandler;
pub use runner::{BatchReport, BatchRunner};
pub use scheduler::CronScheduler;
