use crate::particle::{Fraction, Particle};
use crate::script;
use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(test)]
use crate::particle::{self, Exclusions};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A whole numeral juxtaposed with a constant fraction, such as `1(2)/(3)`. At least one of the
/// two parts is always present.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MixedNumber {
    /// The whole part's digits.
    pub whole: Option<String>,

    /// The fractional part. Its top and bottom are plain positive whole numerals.
    pub fraction: Option<Fraction>,

    /// Whether the mixed number is positive.
    pub sign: bool,

    /// The power the mixed number is raised to, at least 1.
    pub exponent: u32,
}

impl MixedNumber {
    pub fn new(whole: impl Into<String>, fraction: Fraction) -> MixedNumber {
        MixedNumber {
            whole: Some(whole.into()),
            fraction: Some(fraction),
            sign: true,
            exponent: 1,
        }
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<MixedNumber> {
        // a fraction-only match belongs to the fraction variant; this recognizer requires the
        // whole part
        let digits = tokens
            .iter()
            .take_while(|token| token.kind == TokenKind::Digits)
            .count();
        if digits == 0 || digits == tokens.len() {
            return None;
        }
        let whole: String = tokens[..digits].iter().map(|token| token.lexeme).collect();
        if whole.len() > 1 && whole.starts_with('0') {
            return None;
        }

        let fraction = Fraction::recognize(&tokens[digits..])?;
        if !plain_whole_numeral(&fraction.top) || !plain_whole_numeral(&fraction.bottom) {
            return None;
        }

        Some(MixedNumber::new(whole, fraction))
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(whole) = &self.whole {
            write!(f, "{whole}")?;
        }
        if let Some(fraction) = &self.fraction {
            fraction.fmt_body(f)?;
        }
        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

/// Returns true if the particle is a bare positive whole numeral with no exponent.
fn plain_whole_numeral(particle: &Particle) -> bool {
    match particle {
        Particle::Number(n) => {
            n.sign && n.exponent == 1 && n.decimal.is_none() && n.sci_exponent.is_none()
        },
        _ => false,
    }
}

impl fmt::Display for MixedNumber {
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
    use crate::particle::Number;

    fn parse_mixed(source: &str) -> MixedNumber {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::MixedNumber(m) => m,
            other => panic!("expected a mixed number, got {other:?}"),
        }
    }

    #[test]
    fn whole_and_fraction() {
        let mixed = parse_mixed("1(2)/(3)");
        assert_eq!(mixed.whole.as_deref(), Some("1"));
        assert_eq!(mixed.to_string(), "1(2)/(3)");
    }

    #[test]
    fn negative_mixed_number() {
        let mixed = parse_mixed("-1(2)/(3)");
        assert!(!mixed.sign);
        assert_eq!(mixed.to_string(), "-1(2)/(3)");
    }

    #[test]
    fn algebraic_fraction_does_not_mix() {
        // a numeral against a non-constant fraction is multiplication, not a mixed number
        let parsed = particle::parse("1(x)/(3)", Exclusions::NONE).unwrap();
        assert!(matches!(parsed, Particle::Term(_)));
    }

    #[test]
    fn fraction_alone_is_a_fraction() {
        let parsed = particle::parse("(2)/(3)", Exclusions::NONE).unwrap();
        assert_eq!(
            parsed.as_fraction(),
            Some(&Fraction::new(
                Particle::Number(Number::whole("2")),
                Particle::Number(Number::whole("3")),
            )),
        );
    }
}
