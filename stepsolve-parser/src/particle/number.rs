use crate::script;
use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decimal numeral, stored as its digit strings so that no precision is lost and trailing
/// zeros survive a round trip through the parser.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Number {
    /// The digits before the decimal point. Never empty, and only `"0"` may start with a zero.
    pub whole: String,

    /// The digits after the decimal point, if any. Never empty when present.
    pub decimal: Option<String>,

    /// The power of ten of a scientific-notation numeral, written `×10` followed by a
    /// superscript. May be negative; a number carrying one may not also carry an exponent
    /// above 1.
    pub sci_exponent: Option<i32>,

    /// Whether the number is positive.
    pub sign: bool,

    /// The power the number is raised to, at least 1.
    pub exponent: u32,
}

impl Number {
    /// A plain whole number from its digit string. The caller is responsible for the digits
    /// being canonical (no leading zeros).
    pub fn whole(digits: impl Into<String>) -> Number {
        Number {
            whole: digits.into(),
            decimal: None,
            sci_exponent: None,
            sign: true,
            exponent: 1,
        }
    }

    pub fn zero() -> Number {
        Number::whole("0")
    }

    pub fn one() -> Number {
        Number::whole("1")
    }

    /// Returns true if every digit of the numeral is zero.
    pub fn is_zero(&self) -> bool {
        self.whole.bytes().all(|b| b == b'0')
            && self.decimal.as_deref().map_or(true, |d| d.bytes().all(|b| b == b'0'))
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Number> {
        let (whole, mut rest) = digit_run(tokens)?;
        if whole.len() > 1 && whole.starts_with('0') {
            return None;
        }

        let decimal = if rest.first().map(|t| t.kind) == Some(TokenKind::Dot) {
            let (digits, after) = digit_run(&rest[1..])?;
            rest = after;
            Some(digits)
        } else {
            None
        };

        let sci_exponent = if rest.first().map(|t| t.kind) == Some(TokenKind::Times10) {
            match rest.get(1) {
                Some(token) if token.kind == TokenKind::Superscript => {
                    rest = &rest[2..];
                    Some(script::superscript_to_i32(token.lexeme)?)
                },
                _ => return None,
            }
        } else {
            None
        };

        if !rest.is_empty() {
            return None;
        }
        Some(Number { whole, decimal, sci_exponent, sign: true, exponent: 1 })
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.whole)?;
        if let Some(decimal) = &self.decimal {
            write!(f, ".{decimal}")?;
        }
        if let Some(sci) = self.sci_exponent {
            write!(f, "×10")?;
            script::write_superscript(f, sci as i64)?;
        }
        if self.exponent > 1 {
            script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

/// Concatenates a leading run of digit tokens. The tokenizer skips whitespace and commas between
/// them, so `1,024` arrives as two digit tokens that belong to one numeral.
fn digit_run<'a>(tokens: &'a [Token<'a>]) -> Option<(String, &'a [Token<'a>])> {
    let count = tokens
        .iter()
        .take_while(|token| token.kind == TokenKind::Digits)
        .count();
    if count == 0 {
        return None;
    }
    let digits = tokens[..count].iter().map(|token| token.lexeme).collect();
    Some((digits, &tokens[count..]))
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.sign {
            write!(f, "-")?;
        }
        self.fmt_body(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::particle::{self, Exclusions, Particle};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_number(source: &str) -> Number {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn grouping_commas_are_ignored() {
        assert_eq!(parse_number("1,024"), Number::whole("1024"));
    }

    #[test]
    fn trailing_decimal_zeros_survive() {
        let number = parse_number("2.50");
        assert_eq!(number.decimal.as_deref(), Some("50"));
        assert_eq!(number.to_string(), "2.50");
    }

    #[test]
    fn scientific_notation() {
        let number = parse_number("3×10⁴");
        assert_eq!(number.sci_exponent, Some(4));
        assert_eq!(number.to_string(), "3×10⁴");

        let negative = parse_number("1.5×10⁻³");
        assert_eq!(negative.sci_exponent, Some(-3));
    }

    #[test]
    fn scientific_numeral_may_not_take_an_exponent() {
        assert!(!particle::is_parsable("(3×10⁴)²", Exclusions::NONE));
    }

    #[test]
    fn malformed_numerals() {
        assert!(!particle::is_parsable("007", Exclusions::NONE));
        assert!(!particle::is_parsable("5.", Exclusions::NONE));
        assert!(!particle::is_parsable(".5", Exclusions::NONE));
        assert!(!particle::is_parsable("3×10", Exclusions::NONE));
    }

    #[test]
    fn zero_detection() {
        assert!(parse_number("0").is_zero());
        assert!(parse_number("0.00").is_zero());
        assert!(!parse_number("0.01").is_zero());
    }
}
