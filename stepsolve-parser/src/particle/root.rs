use crate::particle::{self, Exclusions, Particle};
use crate::script;
use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A root of some degree, written with an optional subscript degree before the radical sign:
/// `√2`, `₃√x`. A caret closes the radical early, so `√2^x` is the term `(√2)x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Root {
    /// The degree of the root, at least 2. Square roots omit the subscript when rendered.
    pub degree: u32,

    /// The particle under the radical.
    pub radicand: Box<Particle>,

    /// Whether the root is positive.
    pub sign: bool,

    /// The power the root is raised to, at least 1.
    pub exponent: u32,
}

impl Root {
    pub fn sqrt(radicand: Particle) -> Root {
        Root { degree: 2, radicand: Box::new(radicand), sign: true, exponent: 1 }
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Root> {
        let mut rest = tokens;
        let degree = if rest.first()?.kind == TokenKind::Subscript {
            let degree = script::subscript_to_u32(rest[0].lexeme)?;
            if degree < 2 {
                return None;
            }
            rest = &rest[1..];
            degree
        } else {
            2
        };

        if rest.first()?.kind != TokenKind::Radical {
            return None;
        }
        if rest.len() < 2 {
            return None;
        }

        let radicand = match particle::radical_pairs(rest)[0] {
            // a caret closing this radical anywhere but the very end means these tokens
            // extend past the root
            Some(caret) if caret == rest.len() - 1 => {
                let inner = &rest[1..caret];
                if inner.is_empty() {
                    return None;
                }
                particle::parse_tokens(inner, Exclusions::NONE).ok()?
            },
            Some(_) => return None,
            // an unclosed radical is greedy, but its radicand is a single particle, never a
            // bare sum
            None => particle::parse_tokens(&rest[1..], Exclusions::EXPRESSION).ok()?,
        };

        Some(Root { degree, radicand: Box::new(radicand), sign: true, exponent: 1 })
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.degree != 2 {
            script::write_subscript(f, self.degree)?;
        }
        write!(f, "√")?;

        let bare = match &*self.radicand {
            Particle::Variable(v) => v.sign && v.exponent == 1,
            Particle::Number(n) => {
                n.sign && n.exponent == 1 && n.sci_exponent.is_none()
            },
            _ => false,
        };
        if bare {
            write!(f, "{}", self.radicand)?;
        } else {
            write!(f, "({})", self.radicand)?;
        }

        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

impl fmt::Display for Root {
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

    fn parse_root(source: &str) -> Root {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Root(r) => r,
            other => panic!("expected a root, got {other:?}"),
        }
    }

    #[test]
    fn square_root_of_a_number() {
        let root = parse_root("√2");
        assert_eq!(root, Root::sqrt(Particle::Number(Number::whole("2"))));
        assert_eq!(root.to_string(), "√2");
    }

    #[test]
    fn cube_root_keeps_its_degree() {
        let root = parse_root("₃√(x+1)");
        assert_eq!(root.degree, 3);
        assert_eq!(root.to_string(), "₃√(x+1)");
    }

    #[test]
    fn degree_below_two_is_rejected() {
        assert!(!particle::is_parsable("₁√2", Exclusions::NONE));
    }

    #[test]
    fn caret_closes_the_radical() {
        let parsed = particle::parse("√2^x", Exclusions::NONE).unwrap();
        let Particle::Term(term) = parsed else { panic!("expected a term") };
        assert_eq!(term.factors.len(), 2);
        assert_eq!(
            term.factors[1],
            Particle::Variable(Variable::new('x')),
        );
    }

    #[test]
    fn unclosed_radical_is_greedy() {
        let root = parse_root("√2x");
        assert!(root.radicand.as_term().is_some());
    }

    #[test]
    fn radical_stops_at_a_sum() {
        // the radicand may not be a bare sum, so the whole input is a sum instead
        let parsed = particle::parse("√2+x", Exclusions::NONE).unwrap();
        assert!(matches!(parsed, Particle::Expression(_)));
    }
}
