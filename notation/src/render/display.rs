//! Renders rules in display notation.
//!
//! Binary operators are written infix with one space on each side and never
//! chain: a binary operand of a binary term is parenthesized. Prefix operators
//! sit directly on their operand, with a space only when the operand itself
//! starts with an operator.

use crate::ast::{Rule, RulePool, Term};

/// Shortest separator line, even for very short premises.
pub const MIN_SEPARATOR_WIDTH: usize = 4;

pub fn render_display(pool: &RulePool) -> String {
    pool.iter()
        .map(display_rule)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Premise lines, a dash separator as wide as the widest premise, and the
/// conclusion. An axiom is its conclusion alone.
pub fn display_rule(rule: &Rule) -> String {
    let conclusion = display_term(&rule.conclusion);
    if rule.is_axiom() {
        return conclusion;
    }

    let mut lines: Vec<String> = rule.premises.iter().map(display_term).collect();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_SEPARATOR_WIDTH);
    lines.push("-".repeat(width));
    lines.push(conclusion);
    lines.join("\n")
}

pub fn display_term(term: &Term) -> String {
    let mut out = String::new();
    write_term(term, &mut out);
    out
}

fn write_term(term: &Term, out: &mut String) {
    match term {
        Term::Symbol(name) => out.push_str(name),
        Term::Parenthesized(inner) => write_grouped(inner, out),
        Term::Subscript { base, indices } => {
            write_head(base, out);
            out.push('[');
            write_list(indices, out);
            out.push(']');
        }
        Term::Application { func, args } => {
            write_head(func, out);
            out.push('(');
            write_list(args, out);
            out.push(')');
        }
        Term::Unary { op, operand } => {
            out.push_str(op);
            match operand.as_ref() {
                Term::Binary { .. } => write_grouped(operand, out),
                Term::Unary { .. } => {
                    out.push(' ');
                    write_term(operand, out);
                }
                _ => write_term(operand, out),
            }
        }
        Term::Binary { op, left, right } => {
            write_operand(left, out);
            out.push(' ');
            out.push_str(op);
            out.push(' ');
            write_operand(right, out);
        }
    }
}

/// The base of a subscript or the function of an application.
fn write_head(term: &Term, out: &mut String) {
    match term {
        Term::Unary { .. } | Term::Binary { .. } => write_grouped(term, out),
        _ => write_term(term, out),
    }
}

fn write_operand(term: &Term, out: &mut String) {
    match term {
        Term::Binary { .. } => write_grouped(term, out),
        _ => write_term(term, out),
    }
}

fn write_grouped(term: &Term, out: &mut String) {
    out.push('(');
    write_term(term, out);
    out.push(')');
}

fn write_list(terms: &[Term], out: &mut String) {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_term(term, out);
    }
}
