//! Core traits defined in `hydrate-core` and implemented by other crates.

pub mod transport;

pub use transport::{PushTransport, SmsTransport, TextGenerator};
