//! Canonical notation: one rule per line, `p1, p2 -> c`, every operator
//! application wrapped in parentheses.

use super::errors::ParseError;
use super::terms::{build_term, build_terms};
use super::{parse_line, Rule};
use crate::ast::{self, RulePool};

/// Parses one rule per non-blank line.
pub fn parse_canonical(text: &str) -> Result<RulePool, ParseError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_canonical_line)
        .collect::<Result<Vec<_>, _>>()
        .map(RulePool::new)
}

/// Parses text that must hold exactly one canonical rule.
pub fn parse_canonical_rule(text: &str) -> Result<ast::Rule, ParseError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    match (lines.next(), lines.next()) {
        (Some(line), None) => parse_canonical_line(line),
        (None, _) => Err(ParseError::new(text, "no rule found")),
        (Some(_), Some(_)) => Err(ParseError::new(
            text,
            "canonical rules occupy a single line",
        )),
    }
}

fn parse_canonical_line(line: &str) -> Result<ast::Rule, ParseError> {
    let pair = parse_line(Rule::canonical_rule, line)?;
    let mut premises = Vec::new();
    let mut conclusion = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::canonical_list => premises = build_terms(inner.into_inner())?,
            Rule::canonical_term => conclusion = Some(build_term(inner)?),
            _ => {}
        }
    }
    conclusion
        .map(|c| ast::Rule::new(premises, c))
        .ok_or_else(|| ParseError::new(line, "missing conclusion"))
}
