//! Display notation: the multi-line natural-deduction layout.
//!
//! ```text
//! a
//! a → b
//! -----
//! b
//! ```
//!
//! A block of non-blank lines is one rule; blocks are separated by blank lines.
//! Inside a block, the premises sit above a line made only of dashes and the
//! conclusion sits below it. A block with a single line is either an axiom or
//! the one-line form `p1, p2 -> c`. A block that starts with the dash line is
//! also read as an axiom.

use super::errors::ParseError;
use super::terms::{build_term, build_terms};
use super::{parse_line, Rule};
use crate::ast::{self, RulePool, Term};

/// Parses a pool of rules separated by blank lines.
pub fn parse_display(text: &str) -> Result<RulePool, ParseError> {
    blocks(text)
        .iter()
        .map(|block| parse_block(block))
        .collect::<Result<Vec<_>, _>>()
        .map(RulePool::new)
}

/// Parses text that must contain exactly one rule.
pub fn parse_display_rule(text: &str) -> Result<ast::Rule, ParseError> {
    let blocks = blocks(text);
    match blocks.as_slice() {
        [block] => parse_block(block),
        [] => Err(ParseError::new(text, "no rule found")),
        _ => Err(ParseError::new(
            text,
            format!("expected a single rule, found {}", blocks.len()),
        )),
    }
}

/// Parses one line holding a single term.
pub fn parse_display_term(line: &str) -> Result<Term, ParseError> {
    let pair = parse_line(Rule::display_line, line.trim())?;
    let fragment = pair.as_str();
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::display_term)
        .ok_or_else(|| ParseError::new(fragment, "missing term"))
        .and_then(build_term)
}

fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-')
}

fn parse_block(lines: &[&str]) -> Result<ast::Rule, ParseError> {
    let separators: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_separator(line))
        .map(|(i, _)| i)
        .collect();

    match separators.as_slice() {
        [] => match lines {
            [line] => parse_inline(line),
            _ => Err(ParseError::new(
                lines.join("\n"),
                "premises without a separator line",
            )),
        },
        [at] => {
            let conclusion = match &lines[at + 1..] {
                [line] => parse_display_term(line)?,
                [] => return Err(ParseError::new(lines.join("\n"), "missing conclusion")),
                _ => {
                    return Err(ParseError::new(
                        lines.join("\n"),
                        "more than one conclusion line",
                    ))
                }
            };
            let premises = lines[..*at]
                .iter()
                .map(|line| parse_display_term(line))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ast::Rule::new(premises, conclusion))
        }
        _ => Err(ParseError::new(
            lines.join("\n"),
            "more than one separator line",
        )),
    }
}

fn parse_inline(line: &str) -> Result<ast::Rule, ParseError> {
    let pair = parse_line(Rule::display_inline, line)?;
    let mut premises = Vec::new();
    let mut conclusion = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::display_list => premises = build_terms(inner.into_inner())?,
            Rule::display_term => conclusion = Some(build_term(inner)?),
            _ => {}
        }
    }
    conclusion
        .map(|c| ast::Rule::new(premises, c))
        .ok_or_else(|| ParseError::new(line, "missing conclusion"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Term {
        Term::symbol(name)
    }

    #[test]
    fn parses_premises_separator_and_conclusion() {
        let rule = parse_display_rule("a\na → b\n-----\nb").unwrap();
        assert_eq!(
            rule,
            ast::Rule::new(
                vec![sym("a"), Term::binary("→", sym("a"), sym("b"))],
                sym("b")
            )
        );
    }

    #[test]
    fn single_line_is_an_axiom() {
        let rule = parse_display_rule("f(x)[i]").unwrap();
        assert!(rule.is_axiom());
        assert_eq!(
            rule.conclusion,
            Term::subscript(Term::application(sym("f"), vec![sym("x")]), vec![sym("i")])
        );
    }

    #[test]
    fn dash_prefixed_axiom_is_accepted() {
        let rule = parse_display_rule("----\n¬p").unwrap();
        assert_eq!(rule, ast::Rule::axiom(Term::unary("¬", sym("p"))));
    }

    #[test]
    fn inline_arrow_form_has_premises() {
        let rule = parse_display_rule("a, b -> c").unwrap();
        assert_eq!(rule, ast::Rule::new(vec![sym("a"), sym("b")], sym("c")));
    }

    #[test]
    fn grouping_parentheses_collapse() {
        let spaced = parse_display_rule("((a))   ∧ ( b )").unwrap();
        let plain = parse_display_rule("a ∧ b").unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        let rule = parse_display_rule("¬a ∧ b").unwrap();
        assert_eq!(
            rule.conclusion,
            Term::binary("∧", Term::unary("¬", sym("a")), sym("b"))
        );
    }

    #[test]
    fn separate_unary_operators_nest() {
        let nested = parse_display_rule("¬ ¬a").unwrap();
        assert_eq!(
            nested.conclusion,
            Term::unary("¬", Term::unary("¬", sym("a")))
        );
        let fused = parse_display_rule("¬¬a").unwrap();
        assert_eq!(fused.conclusion, Term::unary("¬¬", sym("a")));
    }

    #[test]
    fn operator_chains_need_grouping() {
        let err = parse_display_rule("a ∧ b ∧ c").unwrap_err();
        assert_eq!(err.fragment, "a ∧ b ∧ c");
        assert!(parse_display_rule("(a ∧ b) ∧ c").is_ok());
    }

    #[test]
    fn arrow_is_not_an_operator_but_longer_tokens_are() {
        let rule = parse_display_rule("a <-> b").unwrap();
        assert_eq!(rule.conclusion, Term::binary("<->", sym("a"), sym("b")));
        assert!(parse_display_rule("(a -> b)").is_err());
    }

    #[test]
    fn pool_blocks_are_separated_by_blank_lines() {
        let pool = parse_display("a\n----\nb\n\n  \nc\n\nx, y -> z\n").unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.rules[1].is_axiom());
        assert_eq!(pool.rules[2].premises.len(), 2);
    }

    #[test]
    fn block_errors_carry_the_block() {
        let err = parse_display_rule("a\nb").unwrap_err();
        assert_eq!(err.fragment, "a\nb");

        let err = parse_display_rule("a\n----\nb\n----\nc").unwrap_err();
        assert!(err.message.contains("separator"));

        let err = parse_display_rule("a\n----").unwrap_err();
        assert!(err.message.contains("conclusion"));
    }

    #[test]
    fn line_errors_carry_the_line() {
        let err = parse_display_rule("a\nf(\n----\nb").unwrap_err();
        assert_eq!(err.fragment, "f(");
    }

    #[test]
    fn empty_argument_lists_are_rejected() {
        assert!(parse_display_rule("f()").is_err());
        assert!(parse_display_rule("x[]").is_err());
    }

    #[test]
    fn more_than_one_rule_is_rejected_for_single_rule_input() {
        assert!(parse_display_rule("a\n\nb").is_err());
        assert!(parse_display_rule("   \n").is_err());
    }
}
