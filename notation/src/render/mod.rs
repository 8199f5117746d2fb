//! Renderers: total, deterministic folds over the AST. Equal trees always
//! render to identical text.

pub mod canonical;
pub mod display;

pub use canonical::{canonical_rule, canonical_term, render_canonical};
pub use display::{display_rule, display_term, render_display};
