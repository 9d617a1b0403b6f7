//! WebSocket push channel for dashboard clients.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{attach_client, ws_handler};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
