//! Deduction-search engine contract.
//!
//! The session layer never looks inside an engine: it hands over parsed rules,
//! asks for one exploration pass at a time, and receives new results as
//! canonical text. Each session owns its engine exclusively.

pub mod forward;

pub use forward::{ForwardEngine, ForwardEngineFactory};

use notation::Rule;
use thiserror::Error;

/// Failure reported by an engine. Fails the current operation only; the
/// session stays usable.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine rejected input: {0}")]
    Rejected(String),
    #[error("Engine failure: {0}")]
    Internal(String),
}

pub trait DeductionEngine: Send {
    /// Offers a rule. `Ok(true)` iff it was newly accepted: not a structural
    /// duplicate of a known rule and within the size limit.
    fn add(&mut self, rule: &Rule) -> Result<bool, EngineError>;

    /// Runs one bounded exploration pass, calling `on_candidate` once per newly
    /// derived rule (canonical text). Returns how many were reported.
    fn execute(&mut self, on_candidate: &mut dyn FnMut(&str)) -> Result<usize, EngineError>;

    /// Forgets every known rule.
    fn reset(&mut self);

    fn set_size_limit(&mut self, limit: usize);

    fn set_buffer_limit(&mut self, limit: usize);
}

/// Builds a fresh engine per session.
pub trait EngineFactory: Send + Sync {
    fn create(&self, size_limit: usize, buffer_limit: usize) -> Box<dyn DeductionEngine>;
}

impl<F> EngineFactory for F
where
    F: Fn(usize, usize) -> Box<dyn DeductionEngine> + Send + Sync,
{
    fn create(&self, size_limit: usize, buffer_limit: usize) -> Box<dyn DeductionEngine> {
        self(size_limit, buffer_limit)
    }
}
