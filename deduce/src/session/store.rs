//! Session state and the process-wide session table.

use crate::engine::DeductionEngine;
use crate::error::{DeduceError, DeduceResult};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use uuid::Uuid;

/// One isolated search: a size limit, an engine that only this session
/// touches, and the display form of every rule the engine has accepted.
pub struct Session {
    id: Uuid,
    limit: usize,
    engine: Box<dyn DeductionEngine>,
    /// Insertion-ordered; membership is what dedup relies on.
    known_lines: IndexSet<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("limit", &self.limit)
            .field("known_lines", &self.known_lines)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(id: Uuid, limit: usize, engine: Box<dyn DeductionEngine>) -> Self {
        Self {
            id,
            limit,
            engine,
            known_lines: IndexSet::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of known lines.
    pub fn size(&self) -> usize {
        self.known_lines.len()
    }

    pub fn lines(&self) -> Vec<String> {
        self.known_lines.iter().cloned().collect()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.known_lines.contains(line)
    }

    pub(crate) fn engine_mut(&mut self) -> &mut dyn DeductionEngine {
        self.engine.as_mut()
    }

    /// Returns false when the line was already known.
    pub(crate) fn insert_line(&mut self, line: String) -> bool {
        self.known_lines.insert(line)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            limit: self.limit,
            size: self.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub limit: usize,
    pub size: usize,
}

/// Thread-safe session handle
pub type SharedSession = Arc<Mutex<Session>>;

/// Locks one session. A panic in another holder does not make the session
/// unusable: lines are inserted one at a time, so the state is never torn.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session table.
///
/// The table lock is held only long enough to look up, insert or remove a
/// handle. Work on a session happens under that session's own mutex, so
/// different sessions proceed independently.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<IndexMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session under its own id. Fails if the id is taken.
    pub fn insert(&self, session: Session) -> DeduceResult<SharedSession> {
        let id = session.id();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.contains_key(&id) {
            return Err(DeduceError::InvalidArgument(format!(
                "session {} already exists",
                id
            )));
        }
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, shared.clone());
        Ok(shared)
    }

    pub fn get(&self, id: &Uuid) -> DeduceResult<SharedSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| DeduceError::not_found(id))
    }

    pub fn remove(&self, id: &Uuid) -> DeduceResult<SharedSession> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(id)
            .ok_or_else(|| DeduceError::not_found(id))
    }

    /// Handles to every session, in creation order.
    pub fn all(&self) -> Vec<SharedSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
