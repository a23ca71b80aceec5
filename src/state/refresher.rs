use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic slate reload — every 5 minutes. The feed is a static document
/// that gets republished, so a reload is a full replace, not a merge.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut slate_interval = interval(Duration::from_secs(300));
        // Skip the immediate first tick so startup loading isn't double-triggered.
        slate_interval.tick().await;

        loop {
            slate_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::LoadSlate)
                .await;
        }
    }
}
