//! Builds [`Term`] values from pest pairs of either notation.
//!
//! Both grammars share one builder: the pair kinds differ, but every kind maps
//! onto the same six term variants. Grouping parentheses collapse here.

use super::errors::ParseError;
use super::Rule;
use crate::ast::Term;
use pest::iterators::{Pair, Pairs};

pub(super) fn build_term(pair: Pair<Rule>) -> Result<Term, ParseError> {
    let fragment = pair.as_str();
    match pair.as_rule() {
        Rule::symbol => Ok(Term::Symbol(fragment.to_string())),
        Rule::display_term | Rule::canonical_inner => {
            let mut inner = pair.into_inner();
            let left = build_term(next_pair(&mut inner, fragment, "operand")?)?;
            match inner.next() {
                None => Ok(left),
                Some(op) => {
                    let right = build_term(next_pair(&mut inner, fragment, "right operand")?)?;
                    Ok(Term::binary(op.as_str(), left, right))
                }
            }
        }
        Rule::prefix_term | Rule::display_group | Rule::canonical_group => {
            let mut inner = pair.into_inner();
            build_term(next_pair(&mut inner, fragment, "term")?)
        }
        Rule::unary_term | Rule::canonical_unary => {
            let mut inner = pair.into_inner();
            let op = next_pair(&mut inner, fragment, "operator")?;
            let operand = build_term(next_pair(&mut inner, fragment, "operand")?)?;
            Ok(Term::unary(op.as_str(), operand))
        }
        Rule::postfix_term | Rule::canonical_term => {
            let mut inner = pair.into_inner();
            let mut term = build_term(next_pair(&mut inner, fragment, "term")?)?;
            for suffix in inner {
                term = match suffix.as_rule() {
                    Rule::display_index | Rule::canonical_index => {
                        Term::subscript(term, build_terms(suffix.into_inner())?)
                    }
                    Rule::display_args | Rule::canonical_args => {
                        Term::application(term, build_terms(suffix.into_inner())?)
                    }
                    other => return Err(unexpected(suffix.as_str(), other)),
                };
            }
            Ok(term)
        }
        other => Err(unexpected(fragment, other)),
    }
}

/// Builds every term pair of a comma-separated list.
pub(super) fn build_terms(pairs: Pairs<Rule>) -> Result<Vec<Term>, ParseError> {
    pairs.map(build_term).collect()
}

fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    fragment: &str,
    what: &str,
) -> Result<Pair<'i, Rule>, ParseError> {
    pairs
        .next()
        .ok_or_else(|| ParseError::new(fragment, format!("missing {}", what)))
}

fn unexpected(fragment: &str, rule: Rule) -> ParseError {
    ParseError::new(fragment, format!("unexpected {:?}", rule))
}
