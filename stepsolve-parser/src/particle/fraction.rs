use crate::particle::{self, Exclusions, Particle};
use crate::script;
use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fraction, split at the first `/` found at bracket depth zero. Both halves are rendered in
/// parentheses so a fraction can always be told apart from the division it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fraction {
    pub top: Box<Particle>,

    pub bottom: Box<Particle>,

    /// Whether the fraction is positive.
    pub sign: bool,

    /// The power the fraction is raised to, at least 1.
    pub exponent: u32,
}

impl Fraction {
    pub fn new(top: Particle, bottom: Particle) -> Fraction {
        Fraction {
            top: Box::new(top),
            bottom: Box::new(bottom),
            sign: true,
            exponent: 1,
        }
    }

    /// Returns true if the top and bottom are both plain numerals.
    pub fn is_constant(&self) -> bool {
        matches!(&*self.top, Particle::Number(_)) && matches!(&*self.bottom, Particle::Number(_))
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Fraction> {
        let depths = particle::token_depths(tokens);
        let slash = tokens
            .iter()
            .enumerate()
            .position(|(i, token)| token.kind == TokenKind::Slash && depths[i] == 0)?;

        let top = particle::parse_tokens(&tokens[..slash], Exclusions::EXPRESSION).ok()?;
        let bottom = particle::parse_tokens(&tokens[slash + 1..], Exclusions::EXPRESSION).ok()?;
        Some(Fraction::new(top, bottom))
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})/({})", self.top, self.bottom)?;
        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

impl fmt::Display for Fraction {
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
    use crate::particle::{Number, Term, Variable};

    fn parse_fraction(source: &str) -> Fraction {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Fraction(fr) => fr,
            other => panic!("expected a fraction, got {other:?}"),
        }
    }

    #[test]
    fn constant_fraction() {
        let fraction = parse_fraction("(2)/(3)");
        assert!(fraction.is_constant());
        assert_eq!(fraction.to_string(), "(2)/(3)");
    }

    #[test]
    fn parentheses_are_optional_when_parsing() {
        assert_eq!(parse_fraction("2/3"), parse_fraction("(2)/(3)"));
    }

    #[test]
    fn algebraic_bottom() {
        let fraction = parse_fraction("(2)/(2x)");
        assert_eq!(
            *fraction.bottom,
            Particle::Term(Term {
                factors: vec![
                    Particle::Number(Number::whole("2")),
                    Particle::Variable(Variable::new('x')),
                ],
                sign: true,
                exponent: 1,
            }),
        );
    }

    #[test]
    fn negative_fraction_keeps_sign_outside() {
        let fraction = parse_fraction("-(2)/(3)");
        assert!(!fraction.sign);
        assert!(fraction.top.sign() && fraction.bottom.sign());
        assert_eq!(fraction.to_string(), "-(2)/(3)");
    }

    #[test]
    fn slash_inside_brackets_is_not_a_split() {
        let fraction = parse_fraction("((1)/(2))/(3)");
        assert!(fraction.top.as_fraction().is_some());
    }

    #[test]
    fn missing_side_is_rejected() {
        assert!(!particle::is_parsable("2/", Exclusions::NONE));
        assert!(!particle::is_parsable("/2", Exclusions::NONE));
    }
}
