use crate::particle::{self, Exclusions, Particle};
use crate::script;
use crate::tokenizer::Token;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two or more particles added or subtracted, such as `2x+7`. Subtraction is stored as a
/// negative term: the `-` between two terms and the sign of the term after it are the same
/// thing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expression {
    /// The terms of the sum, in rendering order. Always at least two.
    pub terms: Vec<Particle>,

    /// Whether the sum as a whole is positive. Only a bracketed sum can be negative; the sign
    /// of an unbracketed sum lives on its first term.
    pub sign: bool,

    /// The power the sum is raised to, at least 1.
    pub exponent: u32,
}

impl Expression {
    /// Builds a sum from a list of terms, preserving an enclosing sign and exponent. Nested
    /// unpowered sums are spliced into their parent (distributing a negative sign over their
    /// terms), a single term collapses to itself, and an empty sum is the numeral 0.
    pub fn build(terms: Vec<Particle>, sign: bool, exponent: u32) -> Particle {
        let mut flattened = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Particle::Expression(e) if e.exponent == 1 => {
                    for mut inner in e.terms {
                        if !e.sign {
                            let flipped = !inner.sign();
                            inner.set_sign(flipped);
                        }
                        flattened.push(inner);
                    }
                },
                other => flattened.push(other),
            }
        }

        match flattened.len() {
            0 => {
                let mut zero = Particle::Number(crate::particle::Number::zero());
                zero.fold_enclosing(sign, exponent);
                zero
            },
            1 => {
                let mut term = flattened.pop().unwrap();
                term.fold_enclosing(sign, exponent);
                term
            },
            _ => Particle::Expression(Expression { terms: flattened, sign, exponent }),
        }
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Expression> {
        let splits = particle::expression_splits(tokens);
        if splits.is_empty() {
            return None;
        }

        let mut terms = Vec::with_capacity(splits.len() + 1);
        let mut start = 0;
        for end in splits.into_iter().chain([tokens.len()]) {
            // each chunk after the first starts with its operator, which doubles as the
            // term's sign
            let term = particle::parse_tokens(&tokens[start..end], Exclusions::EXPRESSION).ok()?;
            terms.push(term);
            start = end;
        }

        Some(Expression { terms, sign: true, exponent: 1 })
    }

    /// Writes the bare sum, without the expression's own sign, exponent or brackets.
    pub(crate) fn fmt_terms(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", if term.sign() { '+' } else { '-' })?;
            } else if !term.sign() {
                write!(f, "-")?;
            }
            term.fmt_magnitude(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign && self.exponent == 1 {
            return self.fmt_terms(f);
        }
        if !self.sign {
            write!(f, "-")?;
        }
        write!(f, "(")?;
        self.fmt_terms(f)?;
        write!(f, ")")?;
        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::particle::{Number, Term, Variable};

    fn parse_expression(source: &str) -> Expression {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Expression(e) => e,
            other => panic!("expected an expression, got {other:?}"),
        }
    }

    fn variable(letter: char) -> Particle {
        Particle::Variable(Variable::new(letter))
    }

    fn number(digits: &str) -> Particle {
        Particle::Number(Number::whole(digits))
    }

    #[test]
    fn subtraction_is_a_negative_term() {
        let expression = parse_expression("x-4");
        assert_eq!(
            expression.terms,
            vec![variable('x'), number("4").with_sign(false)],
        );
        assert_eq!(expression.to_string(), "x-4");
    }

    #[test]
    fn runs_are_flat() {
        let expression = parse_expression("5x+7-3x");
        assert_eq!(expression.terms.len(), 3);
        assert_eq!(
            expression.terms[2],
            Particle::Term(Term {
                factors: vec![number("3"), variable('x')],
                sign: false,
                exponent: 1,
            }),
        );
    }

    #[test]
    fn sign_after_an_operator_belongs_to_the_operand() {
        let expression = parse_expression("x+-4");
        assert_eq!(
            expression.terms,
            vec![variable('x'), number("4").with_sign(false)],
        );
    }

    #[test]
    fn negated_bracketed_sum() {
        let parsed = particle::parse("-(x+4)", Exclusions::NONE).unwrap();
        let Particle::Expression(e) = &parsed else { panic!("expected an expression") };
        assert!(!e.sign);
        assert_eq!(parsed.to_string(), "-(x+4)");
    }

    #[test]
    fn build_splices_nested_sums() {
        let inner = Expression {
            terms: vec![variable('y'), number("1")],
            sign: false,
            exponent: 1,
        };
        let built = Expression::build(
            vec![variable('x'), Particle::Expression(inner)],
            true,
            1,
        );
        let Particle::Expression(e) = built else { panic!("expected an expression") };
        assert_eq!(
            e.terms,
            vec![
                variable('x'),
                variable('y').with_sign(false),
                number("1").with_sign(false),
            ],
        );
    }

    #[test]
    fn build_collapses_degenerate_sums() {
        assert_eq!(Expression::build(Vec::new(), true, 1), number("0"));
        assert_eq!(
            Expression::build(vec![variable('x')], false, 1),
            variable('x').with_sign(false),
        );
    }

    #[test]
    fn powered_sum_renders_bracketed() {
        let expression = parse_expression("(x+4)²");
        assert_eq!(expression.exponent, 2);
        assert_eq!(expression.to_string(), "(x+4)²");
    }
}
