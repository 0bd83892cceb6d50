use crate::error::kind;
use crate::particle::{self, Exclusions, Particle};
use crate::tokenizer::{self, TokenKind};
use std::fmt;
use stepsolve_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two particles joined by `=`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    pub left: Particle,
    pub right: Particle,
}

impl Equation {
    pub fn new(left: Particle, right: Particle) -> Equation {
        Equation { left, right }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.left, self.right)
    }
}

/// A parsed input: either an equation or a lone particle to simplify.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algebra {
    Equation(Equation),
    Particle(Particle),
}

impl Algebra {
    pub fn as_equation(&self) -> Option<&Equation> {
        match self {
            Algebra::Equation(equation) => Some(equation),
            Algebra::Particle(_) => None,
        }
    }
}

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algebra::Equation(equation) => equation.fmt(f),
            Algebra::Particle(particle) => particle.fmt(f),
        }
    }
}

/// Parses a whole input line: an equation when the source contains one `=`, a lone particle when
/// it contains none. More than one `=` is malformed.
pub fn parse_algebra(source: &str) -> Result<Algebra, Error> {
    let tokens = tokenizer::tokenize_complete(source)?;
    if tokens.is_empty() {
        return Err(Error::new(vec![0..source.len()], kind::EmptyInput));
    }

    let mut equals = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.kind == TokenKind::Equals);
    let Some((first, _)) = equals.next() else {
        let particle = particle::parse_tokens(&tokens, Exclusions::NONE)?;
        return Ok(Algebra::Particle(particle));
    };
    if let Some((_, second)) = equals.next() {
        return Err(Error::new(vec![second.span.clone()], kind::MultipleEquals));
    }

    let (left, right) = (&tokens[..first], &tokens[first + 1..]);
    if left.is_empty() || right.is_empty() {
        return Err(Error::new(
            vec![tokens[first].span.clone()],
            kind::EmptyOperand,
        ));
    }

    Ok(Algebra::Equation(Equation::new(
        particle::parse_tokens(left, Exclusions::NONE)?,
        particle::parse_tokens(right, Exclusions::NONE)?,
    )))
}
