//! Reference engine: ground premise discharge.
//!
//! Stands in for the external deduction-search engine so the service runs end
//! to end. A pass looks for a rule premise that is literally equal to the
//! conclusion of a known axiom and derives the rule with that premise removed.
//! There is no unification and no variable handling. Every derived rule is
//! strictly smaller than its parent, so repeated passes over a finite rule set
//! reach a fixed point.

use super::{DeductionEngine, EngineError, EngineFactory};
use indexmap::IndexSet;
use notation::{canonical_rule, Rule, Term};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ForwardEngine {
    size_limit: usize,
    buffer_limit: usize,
    rules: IndexSet<Rule>,
}

impl ForwardEngine {
    pub fn new(size_limit: usize, buffer_limit: usize) -> Self {
        Self {
            size_limit,
            buffer_limit,
            rules: IndexSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn facts(&self) -> HashSet<&Term> {
        self.rules
            .iter()
            .filter(|rule| rule.is_axiom())
            .map(|rule| &rule.conclusion)
            .collect()
    }

    fn within_limit(&self, rule: &Rule) -> bool {
        rule.size() <= self.size_limit
    }
}

impl DeductionEngine for ForwardEngine {
    fn add(&mut self, rule: &Rule) -> Result<bool, EngineError> {
        if !self.within_limit(rule) {
            return Ok(false);
        }
        Ok(self.rules.insert(rule.normalized()))
    }

    fn execute(&mut self, on_candidate: &mut dyn FnMut(&str)) -> Result<usize, EngineError> {
        let mut buffer: IndexSet<Rule> = IndexSet::new();
        {
            let facts = self.facts();
            'rules: for rule in self.rules.iter().filter(|rule| !rule.is_axiom()) {
                for (i, premise) in rule.premises.iter().enumerate() {
                    if buffer.len() >= self.buffer_limit {
                        break 'rules;
                    }
                    if !facts.contains(premise) {
                        continue;
                    }
                    let mut premises = rule.premises.clone();
                    premises.remove(i);
                    let candidate = Rule::new(premises, rule.conclusion.clone());
                    if self.within_limit(&candidate) && !self.rules.contains(&candidate) {
                        buffer.insert(candidate);
                    }
                }
            }
        }

        let derived = buffer.len();
        for candidate in buffer {
            on_candidate(&canonical_rule(&candidate));
            self.rules.insert(candidate);
        }
        Ok(derived)
    }

    fn reset(&mut self) {
        self.rules.clear();
    }

    fn set_size_limit(&mut self, limit: usize) {
        self.size_limit = limit;
    }

    fn set_buffer_limit(&mut self, limit: usize) {
        self.buffer_limit = limit;
    }
}

/// Creates a [`ForwardEngine`] per session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEngineFactory;

impl EngineFactory for ForwardEngineFactory {
    fn create(&self, size_limit: usize, buffer_limit: usize) -> Box<dyn DeductionEngine> {
        Box::new(ForwardEngine::new(size_limit, buffer_limit))
    }
}
