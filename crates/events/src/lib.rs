//! Tracker event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TrackerEvent`]: the event envelope pushed to presentation clients
//!   whenever session state changes.

pub mod bus;

pub use bus::{EventBus, TrackerEvent};
