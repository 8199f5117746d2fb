use deduce::{
    DeduceError, DeductionEngine, EngineError, EngineFactory, SessionManager,
};
use notation::Rule;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn modus_ponens_end_to_end() {
    let manager = SessionManager::default();
    let id = manager.create_session(10).unwrap();

    let accepted = manager.add_lines(&id, &["a -> b", "a"]).unwrap();
    assert_eq!(accepted, lines(&["a\n----\nb", "a"]));

    let derived = manager.run_search(&id).unwrap();
    assert_eq!(derived, lines(&["b"]));
    assert_eq!(manager.get_lines(&id).unwrap().len(), 3);

    let summary = &manager.list_sessions()[0];
    assert_eq!((summary.id, summary.limit, summary.size), (id, 10, 3));
}

#[test]
fn adding_the_same_lines_twice_accepts_nothing_new() {
    let manager = SessionManager::default();
    let id = manager.create_session(10).unwrap();
    let batch = ["p ∧ q", "p -> q ∨ r"];

    let first = manager.add_lines(&id, &batch).unwrap();
    assert_eq!(first.len(), 2);
    let before = manager.get_lines(&id).unwrap();

    assert!(manager.add_lines(&id, &batch).unwrap().is_empty());
    assert_eq!(manager.get_lines(&id).unwrap(), before);
}

#[test]
fn different_spellings_of_one_rule_are_deduplicated() {
    let manager = SessionManager::default();
    let id = manager.create_session(10).unwrap();

    let accepted = manager
        .add_lines(
            &id,
            &["a ∧ b -> c", "(a ∧ b)\n-----\nc", "a  ∧  b\n----------\n(c)"],
        )
        .unwrap();
    assert_eq!(accepted, lines(&["a ∧ b\n-----\nc"]));
    assert_eq!(manager.get_lines(&id).unwrap().len(), 1);
}

#[test]
fn limits_are_validated_and_enforced() {
    let manager = SessionManager::default();
    assert!(manager.create_session(0).unwrap_err().is_invalid_argument());
    assert!(manager.create_session(-5).unwrap_err().is_invalid_argument());

    let id = manager.create_session(3).unwrap();
    let accepted = manager.add_lines(&id, &["a ∧ b -> c", "a -> b"]).unwrap();
    assert_eq!(accepted, lines(&["a\n----\nb"]));
}

#[test]
fn search_reaches_a_stable_fixed_point() {
    let manager = SessionManager::default();
    let id = manager.create_session(32).unwrap();
    manager
        .add_lines(&id, &["a -> b", "b -> c", "a, c -> d", "a"])
        .unwrap();

    let derived = manager.derive_to_fixed_point(&id, 100).unwrap();
    let known = manager.get_lines(&id).unwrap();
    for fact in ["b", "c", "d"] {
        assert!(known.contains(&fact.to_string()), "missing {}", fact);
        assert!(derived.contains(&fact.to_string()), "not derived {}", fact);
    }

    assert!(manager.run_search(&id).unwrap().is_empty());
    assert_eq!(manager.get_lines(&id).unwrap(), known);
}

#[test]
fn pass_cap_stops_an_unfinished_search() {
    let manager = SessionManager::default();
    let id = manager.create_session(32).unwrap();
    manager
        .add_lines(&id, &["a -> b", "b -> c", "c -> d", "a"])
        .unwrap();

    let derived = manager.derive_to_fixed_point(&id, 1).unwrap();
    assert_eq!(derived, lines(&["b"]));
}

#[test]
fn unknown_sessions_are_not_found() {
    let manager = SessionManager::default();
    let missing = Uuid::new_v4();
    assert!(manager.get_lines(&missing).unwrap_err().is_not_found());
    assert!(manager.run_search(&missing).unwrap_err().is_not_found());
    assert!(manager.delete_session(&missing).unwrap_err().is_not_found());
    assert!(manager
        .add_lines(&missing, &["a"])
        .unwrap_err()
        .is_not_found());
}

#[test]
fn deleted_sessions_are_gone() {
    let manager = SessionManager::default();
    let keep = manager.create_session(4).unwrap();
    let drop = manager.create_session(4).unwrap();
    manager.delete_session(&drop).unwrap();

    let ids: Vec<Uuid> = manager.list_sessions().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![keep]);
    assert!(manager.get_lines(&drop).unwrap_err().is_not_found());
}

#[test]
fn sessions_do_not_share_state() {
    let manager = SessionManager::default();
    let first = manager.create_session(8).unwrap();
    let second = manager.create_session(8).unwrap();
    manager.add_lines(&first, &["a -> b", "a"]).unwrap();
    manager.add_lines(&second, &["a -> b"]).unwrap();

    assert!(manager.run_search(&second).unwrap().is_empty());
    assert_eq!(manager.run_search(&first).unwrap(), lines(&["b"]));
}

#[test]
fn concurrent_batches_on_one_session_stay_deduplicated() {
    let manager = Arc::new(SessionManager::default());
    let id = manager.create_session(16).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            thread::spawn(move || manager.add_lines(&id, &["x", "y -> x", "y"]).unwrap())
        })
        .collect();
    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap().len()).sum();

    assert_eq!(accepted, 3);
    assert_eq!(manager.get_lines(&id).unwrap().len(), 3);
}

/// Engine that accepts everything, reports scripted candidates and can fail.
struct ScriptedEngine {
    candidates: Vec<String>,
    fail: bool,
}

impl DeductionEngine for ScriptedEngine {
    fn add(&mut self, _rule: &Rule) -> Result<bool, EngineError> {
        if self.fail {
            return Err(EngineError::Internal("engine down".to_string()));
        }
        Ok(true)
    }

    fn execute(&mut self, on_candidate: &mut dyn FnMut(&str)) -> Result<usize, EngineError> {
        if self.fail {
            return Err(EngineError::Internal("engine down".to_string()));
        }
        for candidate in &self.candidates {
            on_candidate(candidate);
        }
        Ok(self.candidates.len())
    }

    fn reset(&mut self) {}

    fn set_size_limit(&mut self, _limit: usize) {}

    fn set_buffer_limit(&mut self, _limit: usize) {}
}

fn scripted(candidates: &[&str], fail: bool) -> Arc<dyn EngineFactory> {
    let candidates = lines(candidates);
    Arc::new(move |_size: usize, _buffer: usize| -> Box<dyn DeductionEngine> {
        Box::new(ScriptedEngine {
            candidates: candidates.clone(),
            fail,
        })
    })
}

#[test]
fn search_renders_candidates_and_skips_unreadable_ones() {
    let manager = SessionManager::new(scripted(&["p, q -> r", "((", "p, q -> r", "s"], false));
    let id = manager.create_session(5).unwrap();

    let derived = manager.run_search(&id).unwrap();
    assert_eq!(derived, lines(&["p\nq\n----\nr", "s"]));
    assert!(manager.run_search(&id).unwrap().is_empty());
}

#[test]
fn engine_failures_fail_the_operation_only() {
    let manager = SessionManager::new(scripted(&[], true));
    let id = manager.create_session(5).unwrap();

    assert!(matches!(
        manager.add_lines(&id, &["a"]).unwrap_err(),
        DeduceError::Engine(_)
    ));
    assert!(matches!(
        manager.run_search(&id).unwrap_err(),
        DeduceError::Engine(_)
    ));
    assert!(manager.get_lines(&id).unwrap().is_empty());
}
