//! Rule AST
//!
//! A rule pool is a list of rules; a rule is a list of premise terms followed by
//! one conclusion term. Both notations parse into, and render from, these types.

use serde::{Deserialize, Serialize};

/// A node of a rule term.
///
/// `Parenthesized` is grouping only. The parsers collapse it away, so it only
/// shows up in trees built by hand; [`Term::normalized`] strips it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Symbol(String),
    Parenthesized(Box<Term>),
    Subscript { base: Box<Term>, indices: Vec<Term> },
    Application { func: Box<Term>, args: Vec<Term> },
    Unary { op: String, operand: Box<Term> },
    Binary {
        op: String,
        left: Box<Term>,
        right: Box<Term>,
    },
}

impl Term {
    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    pub fn parenthesized(inner: Term) -> Self {
        Term::Parenthesized(Box::new(inner))
    }

    pub fn subscript(base: Term, indices: Vec<Term>) -> Self {
        Term::Subscript {
            base: Box::new(base),
            indices,
        }
    }

    pub fn application(func: Term, args: Vec<Term>) -> Self {
        Term::Application {
            func: Box::new(func),
            args,
        }
    }

    pub fn unary(op: impl Into<String>, operand: Term) -> Self {
        Term::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: impl Into<String>, left: Term, right: Term) -> Self {
        Term::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Direct sub-terms, left to right.
    pub fn children(&self) -> Vec<&Term> {
        match self {
            Term::Symbol(_) => Vec::new(),
            Term::Parenthesized(inner) => vec![inner.as_ref()],
            Term::Subscript { base, indices } => {
                let mut out = Vec::with_capacity(indices.len() + 1);
                out.push(base.as_ref());
                out.extend(indices.iter());
                out
            }
            Term::Application { func, args } => {
                let mut out = Vec::with_capacity(args.len() + 1);
                out.push(func.as_ref());
                out.extend(args.iter());
                out
            }
            Term::Unary { operand, .. } => vec![operand.as_ref()],
            Term::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Term)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of nodes in the tree. Grouping nodes are not counted.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |term| {
            if !matches!(term, Term::Parenthesized(_)) {
                count += 1;
            }
        });
        count
    }

    /// The same tree with every `Parenthesized` node removed.
    pub fn normalized(&self) -> Term {
        match self {
            Term::Symbol(name) => Term::Symbol(name.clone()),
            Term::Parenthesized(inner) => inner.normalized(),
            Term::Subscript { base, indices } => Term::Subscript {
                base: Box::new(base.normalized()),
                indices: indices.iter().map(Term::normalized).collect(),
            },
            Term::Application { func, args } => Term::Application {
                func: Box::new(func.normalized()),
                args: args.iter().map(Term::normalized).collect(),
            },
            Term::Unary { op, operand } => Term::Unary {
                op: op.clone(),
                operand: Box::new(operand.normalized()),
            },
            Term::Binary { op, left, right } => Term::Binary {
                op: op.clone(),
                left: Box::new(left.normalized()),
                right: Box::new(right.normalized()),
            },
        }
    }

    pub fn is_normalized(&self) -> bool {
        let mut grouped = false;
        self.walk(&mut |term| grouped |= matches!(term, Term::Parenthesized(_)));
        !grouped
    }
}

/// Premises and a conclusion. A rule without premises is an axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub premises: Vec<Term>,
    pub conclusion: Term,
}

impl Rule {
    pub fn new(premises: Vec<Term>, conclusion: Term) -> Self {
        Self {
            premises,
            conclusion,
        }
    }

    pub fn axiom(conclusion: Term) -> Self {
        Self::new(Vec::new(), conclusion)
    }

    /// Builds a rule from terms in source order: every term but the last is a
    /// premise. Returns `None` for an empty list.
    pub fn from_terms(mut terms: Vec<Term>) -> Option<Self> {
        let conclusion = terms.pop()?;
        Some(Self::new(terms, conclusion))
    }

    pub fn is_axiom(&self) -> bool {
        self.premises.is_empty()
    }

    /// Premises followed by the conclusion.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.premises.iter().chain(std::iter::once(&self.conclusion))
    }

    pub fn size(&self) -> usize {
        self.terms().map(Term::size).sum()
    }

    pub fn normalized(&self) -> Rule {
        Rule {
            premises: self.premises.iter().map(Term::normalized).collect(),
            conclusion: self.conclusion.normalized(),
        }
    }
}

/// Rules in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePool {
    pub rules: Vec<Rule>,
}

impl RulePool {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl IntoIterator for RulePool {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl FromIterator<Rule> for RulePool {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
