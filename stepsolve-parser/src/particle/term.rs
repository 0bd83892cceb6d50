use crate::particle::{self, Exclusions, Particle};
use crate::script;
use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two or more particles multiplied by juxtaposition, such as `2xy`. A term holds at most one
/// numeral, kept in front; repeated numerals are multiplication written out, which is a job for
/// a rewrite, not the parser.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The factors of the term, in rendering order. Always at least two.
    pub factors: Vec<Particle>,

    /// Whether the term is positive.
    pub sign: bool,

    /// The power the term is raised to, at least 1.
    pub exponent: u32,
}

impl Term {
    /// Builds a product from a list of factors, preserving an enclosing sign and exponent.
    /// Nested unpowered products are spliced into their parent (their signs collecting onto the
    /// enclosing sign), a single factor collapses to itself with the sign and exponent folded
    /// in, and an empty product is the numeral 1.
    pub fn build(factors: Vec<Particle>, mut sign: bool, exponent: u32) -> Particle {
        let mut factors = {
            let mut flattened = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor {
                    Particle::Term(t) if t.exponent == 1 => {
                        if !t.sign {
                            sign = !sign;
                        }
                        flattened.extend(t.factors);
                    },
                    other => flattened.push(other),
                }
            }
            flattened
        };
        match factors.len() {
            0 => {
                let mut one = Particle::Number(crate::particle::Number::one());
                one.fold_enclosing(sign, exponent);
                one
            },
            1 => {
                let mut factor = factors.pop().unwrap();
                factor.fold_enclosing(sign, exponent);
                factor
            },
            _ => {
                normalize_number_position(&mut factors);
                Particle::Term(Term { factors, sign, exponent })
            },
        }
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Term> {
        let mut rest = tokens;
        let mut factors = Vec::new();

        'scan: while !rest.is_empty() {
            // juxtaposed factors never begin with an operator
            if matches!(rest[0].kind, TokenKind::Plus | TokenKind::Minus) {
                return None;
            }
            for len in (1..=rest.len()).rev() {
                let excluded = Exclusions::TERM | Exclusions::EXPRESSION;
                if let Ok(factor) = particle::parse_tokens(&rest[..len], excluded) {
                    factors.push(factor);
                    rest = &rest[len..];
                    continue 'scan;
                }
            }
            return None;
        }

        if factors.len() < 2 {
            return None;
        }
        let numerals = factors
            .iter()
            .filter(|factor| matches!(factor, Particle::Number(_)))
            .count();
        if numerals > 1 {
            return None;
        }
        normalize_number_position(&mut factors);

        Some(Term { factors, sign: true, exponent: 1 })
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.factors.len() - 1;
        for (i, factor) in self.factors.iter().enumerate() {
            if needs_parentheses(factor, i == 0, i == last) {
                write!(f, "({factor})")?;
            } else {
                write!(f, "{factor}")?;
            }
        }
        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

/// A term's single numeral renders first, where it cannot be misread as part of a neighboring
/// factor's numeral.
fn normalize_number_position(factors: &mut Vec<Particle>) {
    let position = factors
        .iter()
        .position(|factor| matches!(factor, Particle::Number(_)));
    if let Some(position) = position {
        if position > 0 {
            let numeral = factors.remove(position);
            factors.insert(0, numeral);
        }
    }
}

/// Decides whether a factor must be parenthesized to render unambiguously inside a term.
fn needs_parentheses(factor: &Particle, first: bool, last: bool) -> bool {
    if !factor.sign() {
        return true;
    }
    let base = match factor {
        // nested products and divisions are not self-delimiting
        Particle::Term(_) | Particle::Fraction(_) | Particle::MixedNumber(_) => true,
        // a bare sum must always be bracketed; a powered one carries its own brackets
        Particle::Expression(e) => e.exponent == 1,
        // an unclosed radical would swallow everything after it when reparsed
        Particle::Root(_) if !last => true,
        Particle::Number(_) if !first => true,
        _ => false,
    };
    // a final factor ending in a superscript would be misread as an exponent on the whole term
    base || (last && ends_with_superscript(factor))
}

fn ends_with_superscript(factor: &Particle) -> bool {
    factor
        .to_string()
        .chars()
        .last()
        .is_some_and(script::is_superscript_digit)
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.sign {
            write!(f, "-")?;
        }
        self.fmt_body(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::particle::{Number, Variable};

    fn parse_term(source: &str) -> Term {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Term(t) => t,
            other => panic!("expected a term, got {other:?}"),
        }
    }

    fn variable(letter: char) -> Particle {
        Particle::Variable(Variable::new(letter))
    }

    #[test]
    fn coefficient_comes_first() {
        let term = parse_term("x(3)");
        assert_eq!(
            term.factors,
            vec![Particle::Number(Number::whole("3")), variable('x')],
        );
        assert_eq!(term.to_string(), "3x");
    }

    #[test]
    fn two_numerals_do_not_form_a_term() {
        assert!(!particle::is_parsable("2(3)", Exclusions::NONE));
    }

    #[test]
    fn squared_factor_is_parenthesized() {
        let term = Term {
            factors: vec![
                Particle::Number(Number::whole("2")),
                variable('x').with_exponent(2),
            ],
            sign: true,
            exponent: 1,
        };
        assert_eq!(term.to_string(), "2(x²)");
    }

    #[test]
    fn squared_term_keeps_its_own_exponent() {
        let term = Term {
            factors: vec![Particle::Number(Number::whole("2")), variable('x')],
            sign: true,
            exponent: 2,
        };
        assert_eq!(term.to_string(), "2x²");
        assert_eq!(
            particle::parse("2x²", Exclusions::NONE).unwrap(),
            Particle::Term(term),
        );
    }

    #[test]
    fn negative_factor_is_parenthesized() {
        let term = Term {
            factors: vec![variable('x'), variable('y').with_sign(false)],
            sign: true,
            exponent: 1,
        };
        assert_eq!(term.to_string(), "x(-y)");
        assert_eq!(
            particle::parse("x(-y)", Exclusions::NONE).unwrap(),
            Particle::Term(term),
        );
    }

    #[test]
    fn build_collapses_a_single_factor() {
        assert_eq!(
            Term::build(vec![variable('x')], false, 2),
            variable('x').with_sign(false).with_exponent(2),
        );
        assert_eq!(
            Term::build(Vec::new(), true, 1),
            Particle::Number(Number::one()),
        );
    }

    #[test]
    fn adjacent_bracketed_sums() {
        let term = parse_term("(x+4)(x+6)");
        assert_eq!(term.factors.len(), 2);
        assert_eq!(term.to_string(), "(x+4)(x+6)");
    }
}
