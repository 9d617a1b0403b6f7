//! Delivery of tracker events to presentation clients.

mod forwarder;

pub use forwarder::EventForwarder;
