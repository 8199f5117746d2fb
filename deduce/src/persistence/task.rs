use super::SnapshotStore;
use crate::error::{DeduceError, DeduceResult};
use crate::session::SessionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Background writer that snapshots the session table on a fixed interval.
pub struct SnapshotTask {
    manager: Arc<SessionManager>,
    store: SnapshotStore,
    period: Duration,
}

impl SnapshotTask {
    pub fn new(manager: Arc<SessionManager>, store: SnapshotStore, period: Duration) -> Self {
        Self {
            manager,
            store,
            period,
        }
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "[Snapshot] Writing {} every {:?}",
                self.store.path().display(),
                self.period
            );
            let mut tick = interval(self.period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            tick.tick().await;
            loop {
                tick.tick().await;
                if let Err(e) = self.flush().await {
                    error!("[Snapshot] Periodic write failed: {}", e);
                }
            }
        })
    }

    /// Copies the table, then writes it off the async runtime.
    pub async fn flush(&self) -> DeduceResult<()> {
        let sessions = self.manager.snapshot();
        let count = sessions.len();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.save(&sessions))
            .await
            .map_err(|e| DeduceError::Snapshot(format!("snapshot writer panicked: {}", e)))??;
        debug!(
            "[Snapshot] Wrote {} sessions to {}",
            count,
            self.store.path().display()
        );
        Ok(())
    }
}
