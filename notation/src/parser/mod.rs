use pest::iterators::Pair;
use pest::Parser;

// Declare submodules
pub mod canonical;
pub mod display;
pub mod errors;
mod terms;

pub use canonical::{parse_canonical, parse_canonical_rule};
pub use display::{parse_display, parse_display_rule};
pub use errors::ParseError;

// Define the parser struct using the grammar file
#[derive(pest_derive::Parser)]
#[grammar = "notation.pest"] // Path relative to src/
pub struct NotationParser;

/// Runs one grammar entry point over a single line and returns its top pair.
fn parse_line(rule: Rule, line: &str) -> Result<Pair<'_, Rule>, ParseError> {
    let mut pairs =
        NotationParser::parse(rule, line).map_err(|e| ParseError::from_pest(line, e))?;
    pairs
        .next()
        .ok_or_else(|| ParseError::new(line, "empty input"))
}
