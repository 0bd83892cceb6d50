//! Exact numeral arithmetic and rounding.
//!
//! Parsed numerals are digit strings; all arithmetic here converts them to [`rug::Rational`],
//! computes exactly, and converts back. Results only lose precision where a [`RoundingRule`]
//! says they should, or where a division would otherwise not terminate as a decimal.

use crate::error::kind;
use rug::ops::Pow;
use rug::{Integer, Rational};
use stepsolve_error::Error;
use stepsolve_parser::particle::Number;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When an arithmetic result should be rounded, and to how many decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingRule {
    /// Round every result.
    Always,

    /// Round when either operand is in scientific notation or has a decimal part.
    ScientificAndDecimal,

    /// Round only when either operand is in scientific notation.
    Scientific,

    /// Round every result to a fixed number of decimal places.
    SignificantDecimals(u32),
}

impl RoundingRule {
    /// The number of decimal places to round a result of combining `a` and `b` to, or `None`
    /// when this rule leaves the result exact. The canned policies round to the less precise
    /// operand's decimal count, but never fewer than one place: rounding `(1)/(3)` to the zero
    /// decimals of its integer operands would turn a nonzero value into 0.
    pub(crate) fn decimals(self, a: &Number, b: &Number) -> Option<u32> {
        let operand_decimals = || significant_decimals(a).min(significant_decimals(b)).max(1);
        match self {
            RoundingRule::Always => Some(operand_decimals()),
            RoundingRule::ScientificAndDecimal => {
                let triggered = [a, b]
                    .iter()
                    .any(|n| n.sci_exponent.is_some() || n.decimal.is_some());
                triggered.then(operand_decimals)
            },
            RoundingRule::Scientific => {
                let triggered = [a, b].iter().any(|n| n.sci_exponent.is_some());
                triggered.then(operand_decimals)
            },
            RoundingRule::SignificantDecimals(count) => Some(count),
        }
    }
}

/// The number of decimal places a numeral is written with.
pub fn significant_decimals(n: &Number) -> u32 {
    n.decimal.as_deref().map_or(0, |d| d.len() as u32)
}

/// The exact value of a numeral, scientific notation applied. The numeral's own exponent is not
/// part of its value; callers only do arithmetic on unpowered numerals.
pub fn to_rational(n: &Number) -> Rational {
    let mut digits = Integer::new();
    for b in n.whole.bytes().chain(n.decimal.iter().flat_map(|d| d.bytes())) {
        digits *= 10;
        digits += u32::from(b - b'0');
    }

    let scale = significant_decimals(n);
    let mut value = Rational::from((digits, Integer::from(10).pow(scale)));
    if let Some(sci) = n.sci_exponent {
        value *= Rational::from(Integer::from(10)).pow(sci);
    }
    if !n.sign {
        value = -value;
    }
    value
}

/// Converts an exact value back to a numeral. With `decimals` present the value is rounded to
/// that many decimal places (ties away from zero) and keeps them all, trailing zeros included;
/// without it the value must be representable as a finite decimal.
pub fn from_rational(value: Rational, decimals: Option<u32>) -> Number {
    let sign = value.cmp0() != std::cmp::Ordering::Less;
    let magnitude = value.abs();

    let scale = decimals.unwrap_or_else(|| decimal_places(&magnitude));
    let scaled = (magnitude * Integer::from(10).pow(scale)).round().into_numer_denom().0;

    let mut digits = scaled.to_string();
    if (digits.len() as u32) <= scale {
        let padding = scale as usize + 1 - digits.len();
        digits.insert_str(0, &"0".repeat(padding));
    }
    let decimal = if scale > 0 {
        Some(digits.split_off(digits.len() - scale as usize))
    } else {
        None
    };

    let zero = scaled == 0u32;
    Number {
        whole: digits,
        decimal,
        sci_exponent: None,
        // -0 is not a numeral
        sign: sign || zero,
        exponent: 1,
    }
}

/// Returns true if the value can be written as a finite decimal.
pub fn is_terminating(value: &Rational) -> bool {
    let mut denominator = value.denom().clone();
    denominator.remove_factor_mut(&Integer::from(2));
    denominator.remove_factor_mut(&Integer::from(5));
    denominator == 1u32
}

/// The fewest decimal places that write the value exactly. The value must be terminating.
fn decimal_places(value: &Rational) -> u32 {
    let mut denominator = value.denom().clone();
    let twos = denominator.remove_factor_mut(&Integer::from(2));
    let fives = denominator.remove_factor_mut(&Integer::from(5));
    debug_assert!(denominator == 1u32);
    twos.max(fives)
}

/// The numeral's value as an integer, when it has one.
pub fn as_integer(n: &Number) -> Option<Integer> {
    let value = to_rational(n);
    if value.is_integer() {
        Some(value.into_numer_denom().0)
    } else {
        None
    }
}

pub fn is_one(n: &Number) -> bool {
    to_rational(n) == 1u32
}

/// Adds two numerals exactly, then rounds per the rule.
pub fn add(a: &Number, b: &Number, rule: RoundingRule) -> Number {
    from_rational_exact(to_rational(a) + to_rational(b), rule.decimals(a, b))
}

/// Multiplies two numerals exactly, then rounds per the rule.
pub fn multiply(a: &Number, b: &Number, rule: RoundingRule) -> Number {
    from_rational_exact(to_rational(a) * to_rational(b), rule.decimals(a, b))
}

/// Divides two numerals exactly, then rounds per the rule. When the rule does not ask for
/// rounding but the quotient does not terminate, the quotient is rounded to the less precise
/// operand's decimal count anyway so the result stays a finite decimal.
pub fn divide(a: &Number, b: &Number, rule: RoundingRule) -> Result<Number, Error> {
    let divisor = to_rational(b);
    if divisor.cmp0() == std::cmp::Ordering::Equal {
        return Err(Error::new(vec![0..0], kind::DivisionByZero));
    }

    let quotient = to_rational(a) / divisor;
    let decimals = rule.decimals(a, b).or_else(|| {
        if is_terminating(&quotient) {
            None
        } else {
            Some(significant_decimals(a).min(significant_decimals(b)).max(1))
        }
    });
    Ok(from_rational_exact(quotient, decimals))
}

/// Like [`from_rational`], but a requested rounding that happens to be exact drops its trailing
/// zeros, so `1.5 + 1.5` is `3`, not `3.0`.
fn from_rational_exact(value: Rational, decimals: Option<u32>) -> Number {
    match decimals {
        Some(count) => {
            let rounded = from_rational(value, Some(count));
            let exact = to_rational(&rounded);
            if is_terminating(&exact) && decimal_places(&exact) < count {
                from_rational(exact, None)
            } else {
                rounded
            }
        },
        None => from_rational(value, None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::{self, Exclusions, Particle};

    fn number(source: &str) -> Number {
        match particle::parse(source, Exclusions::NONE).unwrap() {
            Particle::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn integer_addition_is_exact() {
        assert_eq!(
            add(&number("2"), &number("2"), RoundingRule::Scientific),
            number("4"),
        );
    }

    #[test]
    fn decimal_division_terminates() {
        let quotient = divide(&number("1"), &number("8"), RoundingRule::Scientific).unwrap();
        assert_eq!(quotient, number("0.125"));
    }

    #[test]
    fn non_terminating_division_falls_back_to_rounding() {
        let quotient = divide(&number("1.0"), &number("3.0"), RoundingRule::Scientific).unwrap();
        assert_eq!(quotient, number("0.3"));
    }

    #[test]
    fn division_by_zero_is_fatal() {
        assert!(divide(&number("4"), &number("0"), RoundingRule::Scientific).is_err());
    }

    #[test]
    fn rounding_never_collapses_a_nonzero_quotient() {
        // integer operands have zero decimal places, but rounding (1)/(3) to zero places
        // would produce 0 for a nonzero value
        let quotient = divide(&number("1"), &number("3"), RoundingRule::Always).unwrap();
        assert_eq!(quotient, number("0.3"));
        let quotient = divide(&number("2"), &number("3"), RoundingRule::SignificantDecimals(2))
            .unwrap();
        assert_eq!(quotient, number("0.67"));
    }

    #[test]
    fn always_rounds_to_the_less_precise_operand() {
        assert_eq!(
            multiply(&number("2.25"), &number("2.2"), RoundingRule::Always),
            number("5"),
        );
        assert_eq!(
            multiply(&number("2.25"), &number("2.2"), RoundingRule::Scientific),
            number("4.95"),
        );
    }

    #[test]
    fn exact_rounding_drops_trailing_zeros() {
        assert_eq!(
            add(&number("1.5"), &number("1.5"), RoundingRule::Always),
            number("3"),
        );
    }

    #[test]
    fn scientific_notation_has_a_plain_value() {
        assert_eq!(to_rational(&number("3×10⁴")), Rational::from(30_000));
        assert_eq!(to_rational(&number("-1.5×10⁻¹")), Rational::from((-3, 20)));
    }

    #[test]
    fn negative_values_round_trip() {
        let n = from_rational(Rational::from((-5, 4)), None);
        assert_eq!(n.to_string(), "-1.25");
    }

    #[test]
    fn integer_queries() {
        assert_eq!(as_integer(&number("12")), Some(Integer::from(12)));
        assert_eq!(as_integer(&number("1.5")), None);
        assert!(is_one(&number("1")));
        assert!(!is_one(&number("-1")));
    }
}
