use super::Rule;
use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

/// Malformed rule text in either notation.
///
/// `fragment` is the offending piece of input: the line that failed to parse,
/// or the whole rule block when the block structure itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} in `{fragment}`")]
pub struct ParseError {
    pub fragment: String,
    pub message: String,
}

impl ParseError {
    pub fn new(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    pub(super) fn from_pest(fragment: &str, error: PestError<Rule>) -> Self {
        let column = match error.line_col {
            LineColLocation::Pos((_, col)) => col,
            LineColLocation::Span((_, col), _) => col,
        };
        Self::new(
            fragment,
            format!("{} at column {}", error.variant.message(), column),
        )
    }
}
