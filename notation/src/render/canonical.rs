//! Renders rules in canonical notation.

use crate::ast::{Rule, RulePool, Term};

pub const ARROW: &str = "->";

pub fn render_canonical(pool: &RulePool) -> String {
    pool.iter()
        .map(canonical_rule)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `p1, p2 -> c`, or just `c` for an axiom.
pub fn canonical_rule(rule: &Rule) -> String {
    let conclusion = canonical_term(&rule.conclusion);
    if rule.is_axiom() {
        return conclusion;
    }
    let premises: Vec<String> = rule.premises.iter().map(canonical_term).collect();
    format!("{} {} {}", premises.join(", "), ARROW, conclusion)
}

pub fn canonical_term(term: &Term) -> String {
    match term {
        Term::Symbol(name) => name.clone(),
        Term::Parenthesized(inner) => format!("({})", canonical_term(inner)),
        Term::Subscript { base, indices } => {
            format!("{}[{}]", canonical_term(base), canonical_list(indices))
        }
        Term::Application { func, args } => {
            format!("{}({})", canonical_term(func), canonical_list(args))
        }
        Term::Unary { op, operand } => format!("({} {})", op, canonical_term(operand)),
        Term::Binary { op, left, right } => format!(
            "({} {} {})",
            canonical_term(left),
            op,
            canonical_term(right)
        ),
    }
}

fn canonical_list(terms: &[Term]) -> String {
    terms
        .iter()
        .map(canonical_term)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Term {
        Term::symbol(name)
    }

    #[test]
    fn renders_every_variant() {
        let term = Term::binary(
            "=",
            Term::application(sym("f"), vec![sym("x"), sym("y")]),
            Term::unary("-", Term::subscript(sym("v"), vec![sym("i"), sym("j")])),
        );
        assert_eq!(canonical_term(&term), "(f(x, y) = (- v[i, j]))");
    }

    #[test]
    fn rules_use_the_arrow() {
        let rule = Rule::new(vec![sym("a"), sym("b")], sym("c"));
        assert_eq!(canonical_rule(&rule), "a, b -> c");
        assert_eq!(canonical_rule(&Rule::axiom(sym("c"))), "c");
    }

    #[test]
    fn pool_is_one_rule_per_line() {
        let pool = RulePool::new(vec![
            Rule::new(vec![sym("a")], sym("b")),
            Rule::axiom(sym("a")),
        ]);
        assert_eq!(render_canonical(&pool), "a -> b\na");
    }
}
