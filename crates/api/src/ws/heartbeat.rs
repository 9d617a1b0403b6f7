use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

/// Spawn the keep-alive task for dashboard clients.
///
/// Every `period` each client receives a Ping frame; connections whose
/// outbound channel has closed are pruned on the same pass. The first pass
/// runs immediately. Abort the returned handle on shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let live = ws_manager.ping_all().await;
            tracing::trace!(live, "Dashboard heartbeat");
        }
    })
}
