//! Flat JSON snapshots of the session table.
//!
//! A snapshot is a JSON array of `{id, limit, lines}` entries. It is loaded once
//! at startup, rewritten on a fixed interval and flushed one last time on
//! shutdown. Engines are not serialized: restore replays each session's lines
//! into a fresh engine.

pub mod file;
pub mod task;

pub use file::SnapshotStore;
pub use task::SnapshotTask;

use crate::session::SessionManager;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    /// Kept signed so a bad entry fails its own restore instead of the whole file.
    pub limit: i64,
    pub lines: Vec<String>,
}

/// Loads the snapshot file into `manager`. Never fails: an unreadable file
/// or a bad entry is logged and skipped. Returns the number of sessions
/// restored.
pub fn restore(manager: &SessionManager, store: &SnapshotStore) -> usize {
    let entries = match store.load() {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "[Snapshot] Could not load {}: {}; starting empty",
                store.path().display(),
                e
            );
            return 0;
        }
    };

    let mut restored = 0;
    for entry in &entries {
        match manager.restore_session(entry) {
            Ok(_) => restored += 1,
            Err(e) => warn!("[Snapshot] Skipping session {}: {}", entry.id, e),
        }
    }
    info!(
        "[Snapshot] Restored {} of {} sessions from {}",
        restored,
        entries.len(),
        store.path().display()
    );
    restored
}
