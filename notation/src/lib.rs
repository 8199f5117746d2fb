//! Natural-deduction rule notation.
//!
//! Two text notations share one AST:
//!
//! - **display**: the multi-line layout clients read and write, premises over
//!   a dash separator over the conclusion;
//! - **canonical**: the single-line `p1, p2 -> c` form deduction engines use.
//!
//! [`parser`] turns either notation into [`Rule`]s, [`render`] turns rules back
//! into text, and [`translate`] holds the conversions the session layer uses.

pub mod ast;
pub mod parser;
pub mod render;
pub mod translate;

pub use ast::{Rule, RulePool, Term};
pub use parser::{
    parse_canonical, parse_canonical_rule, parse_display, parse_display_rule, ParseError,
};
pub use render::{
    canonical_rule, canonical_term, display_rule, display_term, render_canonical,
    render_display,
};
pub use translate::{from_canonical, to_canonical, to_display, to_internal};
