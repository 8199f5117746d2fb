use super::store::{lock_session, Session, SessionStore, SessionSummary};
use crate::engine::{EngineFactory, ForwardEngineFactory};
use crate::error::{DeduceError, DeduceResult};
use crate::persistence::SessionSnapshot;
use notation::{canonical_rule, to_display, to_internal};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Validates a raw JSON limit the way clients send it.
///
/// Integral numbers pass through (a float such as `3.0` counts as integral);
/// anything else is an invalid argument. Positivity is checked by
/// [`SessionManager::create_session`].
pub fn parse_limit(value: &Value) -> DeduceResult<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(DeduceError::InvalidArgument(format!(
            "limit must be an integer, got {}",
            value
        ))),
    }
}

fn checked_limit(limit: i64) -> DeduceResult<usize> {
    if limit <= 0 {
        return Err(DeduceError::InvalidArgument(format!(
            "limit must be positive, got {}",
            limit
        )));
    }
    usize::try_from(limit)
        .map_err(|_| DeduceError::InvalidArgument(format!("limit {} is too large", limit)))
}

/// Entry point for every session operation.
pub struct SessionManager {
    store: SessionStore,
    engines: Arc<dyn EngineFactory>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Arc::new(ForwardEngineFactory))
    }
}

impl SessionManager {
    pub fn new(engines: Arc<dyn EngineFactory>) -> Self {
        Self {
            store: SessionStore::new(),
            engines,
        }
    }

    pub fn create_session(&self, limit: i64) -> DeduceResult<Uuid> {
        let limit = checked_limit(limit)?;
        let id = Uuid::new_v4();
        self.store.insert(self.new_session(id, limit))?;
        info!("[SessionManager] Created session {} (limit {})", id, limit);
        Ok(id)
    }

    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store
            .all()
            .iter()
            .map(|session| lock_session(session).summary())
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    pub fn delete_session(&self, id: &Uuid) -> DeduceResult<()> {
        self.store.remove(id)?;
        info!("[SessionManager] Deleted session {}", id);
        Ok(())
    }

    /// Offers each line to the session's engine and returns the display form
    /// of the ones it accepted, in input order. Malformed, duplicate and
    /// oversized lines are skipped; only an engine failure aborts the batch.
    pub fn add_lines<S: AsRef<str>>(&self, id: &Uuid, lines: &[S]) -> DeduceResult<Vec<String>> {
        let shared = self.store.get(id)?;
        let mut session = lock_session(&shared);
        let mut accepted = Vec::new();
        for line in lines {
            if let Some(display) = admit_line(&mut session, line.as_ref())? {
                accepted.push(display);
            }
        }
        debug!(
            "[SessionManager] Session {}: accepted {} of {} lines",
            id,
            accepted.len(),
            lines.len()
        );
        Ok(accepted)
    }

    pub fn get_lines(&self, id: &Uuid) -> DeduceResult<Vec<String>> {
        let shared = self.store.get(id)?;
        let lines = lock_session(&shared).lines();
        Ok(lines)
    }

    /// Runs exactly one engine pass and returns the newly derived lines.
    pub fn run_search(&self, id: &Uuid) -> DeduceResult<Vec<String>> {
        let shared = self.store.get(id)?;
        let mut session = lock_session(&shared);

        let mut candidates = Vec::new();
        session
            .engine_mut()
            .execute(&mut |candidate| candidates.push(candidate.to_string()))?;

        let mut derived = Vec::new();
        for candidate in candidates {
            match to_display(&candidate) {
                Ok(display) => {
                    if session.insert_line(display.clone()) {
                        derived.push(display);
                    }
                }
                Err(e) => warn!(
                    "[SessionManager] Session {}: engine produced unreadable rule: {}",
                    id, e
                ),
            }
        }
        debug!(
            "[SessionManager] Session {}: search derived {} lines",
            id,
            derived.len()
        );
        Ok(derived)
    }

    /// Repeats [`run_search`](Self::run_search) until a pass derives nothing
    /// or `max_passes` passes have run. Returns everything derived.
    pub fn derive_to_fixed_point(&self, id: &Uuid, max_passes: usize) -> DeduceResult<Vec<String>> {
        let mut derived = Vec::new();
        for pass in 0..max_passes {
            let found = self.run_search(id)?;
            if found.is_empty() {
                debug!(
                    "[SessionManager] Session {}: fixed point after {} passes",
                    id, pass
                );
                return Ok(derived);
            }
            derived.extend(found);
        }
        warn!(
            "[SessionManager] Session {}: stopped after {} passes without reaching a fixed point",
            id, max_passes
        );
        Ok(derived)
    }

    /// Rebuilds a session from a snapshot entry under its original id. Lines
    /// are fed to a fresh engine without searching.
    pub fn restore_session(&self, snapshot: &SessionSnapshot) -> DeduceResult<Uuid> {
        let limit = checked_limit(snapshot.limit)?;
        let mut session = self.new_session(snapshot.id, limit);
        for line in &snapshot.lines {
            admit_line(&mut session, line)?;
        }
        let restored = session.size();
        self.store.insert(session)?;
        if restored < snapshot.lines.len() {
            warn!(
                "[SessionManager] Session {}: restored {} of {} lines",
                snapshot.id,
                restored,
                snapshot.lines.len()
            );
        }
        Ok(snapshot.id)
    }

    /// Copies every session. Each session is locked only while it is copied.
    pub fn snapshot(&self) -> Vec<SessionSnapshot> {
        self.store
            .all()
            .iter()
            .map(|shared| {
                let session = lock_session(shared);
                SessionSnapshot {
                    id: session.id(),
                    limit: session.limit() as i64,
                    lines: session.lines(),
                }
            })
            .collect()
    }

    fn new_session(&self, id: Uuid, limit: usize) -> Session {
        Session::new(id, limit, self.engines.create(limit, limit))
    }
}

/// Parses one line, offers it to the engine and records the accepted form.
/// Returns the display line when it is new to the session.
fn admit_line(session: &mut Session, line: &str) -> DeduceResult<Option<String>> {
    let rule = match to_internal(line) {
        Ok(rule) => rule,
        Err(e) => {
            debug!(
                "[SessionManager] Session {}: skipping malformed line: {}",
                session.id(),
                e
            );
            return Ok(None);
        }
    };
    if !session.engine_mut().add(&rule)? {
        return Ok(None);
    }
    let display = to_display(&canonical_rule(&rule))?;
    Ok(session.insert_line(display.clone()).then_some(display))
}
