//! Conversions between client text, engine text and the AST.
//!
//! Clients speak display notation; the deduction engine stores and reports
//! rules in canonical notation. Re-rendering an accepted rule through its
//! canonical form before producing display text is what makes two spellings
//! of the same rule end up byte-identical.

use crate::ast::Rule;
use crate::parser::{parse_canonical_rule, parse_display_rule, ParseError};
use crate::render::{canonical_rule, display_rule};

/// Display text → AST, ready to hand to an engine.
pub fn to_internal(display_text: &str) -> Result<Rule, ParseError> {
    parse_display_rule(display_text)
}

/// Canonical (engine) text → display text.
pub fn to_display(canonical_text: &str) -> Result<String, ParseError> {
    parse_canonical_rule(canonical_text).map(|rule| display_rule(&rule))
}

/// Display text → canonical (engine) text.
pub fn to_canonical(display_text: &str) -> Result<String, ParseError> {
    parse_display_rule(display_text).map(|rule| canonical_rule(&rule))
}

/// Canonical (engine) text → AST.
pub fn from_canonical(canonical_text: &str) -> Result<Rule, ParseError> {
    parse_canonical_rule(canonical_text)
}
