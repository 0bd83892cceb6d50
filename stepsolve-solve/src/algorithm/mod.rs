//! The rewrite rules and the capability interface the solver drives them through.
//!
//! Each rule implements [`Algorithm`]: [`smarts`](Algorithm::smarts) scores how applicable and
//! worthwhile the rule is on a whole value right now (0 means inapplicable), and
//! [`execute`](Algorithm::execute) performs the rewrite and explains it. `execute` may only be
//! called when `smarts` is positive; calling it otherwise is a bug in the caller, not a
//! recoverable condition.
//!
//! Rules find their pattern anywhere in the value through a [`Tree`], rewrite the deepest match,
//! and replay the change to the root, so a rule written against one `Fraction` works identically
//! on a fraction nested inside an equation side.

pub mod cancel_factors;
pub mod change_sides;
pub mod combine_like_terms;
pub mod distribute;
pub mod divide;
pub mod divide_both_sides;
pub mod factor;
pub mod invert_and_multiply;
pub mod multiply;
pub mod multiply_both_sides;
pub mod to_mixed_number;

use crate::arithmetic::{self, RoundingRule};
use crate::step::{Snippet, Step};
use rug::Rational;
use std::collections::VecDeque;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Number, Particle, Term};

pub use cancel_factors::CancelFactors;
pub use change_sides::ChangeSides;
pub use combine_like_terms::CombineLikeTerms;
pub use distribute::Distribute;
pub use divide::Divide;
pub use divide_both_sides::DivideBothSides;
pub use factor::Factor;
pub use invert_and_multiply::InvertAndMultiply;
pub use multiply::Multiply;
pub use multiply_both_sides::MultiplyBothSides;
pub use to_mixed_number::ToMixedNumber;

/// What the caller wants done with the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Isolate the variable of an equation. Includes everything [`Mode::Simplify`] does.
    Solve,

    /// Reduce an equation or expression without moving anything across the `=`.
    Simplify,
}

/// A rewrite rule.
pub trait Algorithm {
    /// How applicable and worthwhile this rule is on the given value, 0 (inapplicable) to 9.
    fn smarts(&self, algebra: &Algebra) -> u8;

    /// Performs the rewrite. Only valid when [`smarts`](Algorithm::smarts) is positive.
    fn execute(&self, algebra: &Algebra) -> Result<Step, Error>;
}

/// Builds the rule list for a mode, in a fixed registration order. The three rules that move
/// work across the `=` only solve; everything else also simplifies.
pub fn registry(mode: Mode, rounding: RoundingRule) -> Vec<Box<dyn Algorithm>> {
    let mut rules: Vec<Box<dyn Algorithm>> = vec![
        Box::new(CombineLikeTerms),
        Box::new(Distribute),
        Box::new(Factor),
        Box::new(CancelFactors),
        Box::new(Divide::new(rounding)),
        Box::new(Multiply::new(rounding)),
        Box::new(InvertAndMultiply),
        Box::new(ToMixedNumber),
    ];
    if mode == Mode::Solve {
        rules.push(Box::new(ChangeSides));
        rules.push(Box::new(DivideBothSides));
        rules.push(Box::new(MultiplyBothSides));
    }
    rules
}

pub(crate) fn text(text: impl Into<String>) -> Snippet {
    Snippet::Text(text.into())
}

pub(crate) fn math(particle: &Particle) -> Snippet {
    Snippet::Math(particle.clone())
}

/// Returns true if any variable appears anywhere in the particle.
pub(crate) fn contains_variable(particle: &Particle) -> bool {
    if matches!(particle, Particle::Variable(_)) {
        return true;
    }
    particle.children().into_iter().any(contains_variable)
}

/// Multiplies a list of factors into one particle, merging numerals into a single leading
/// coefficient and same-letter variables into one power. Nested unpowered products are
/// flattened; signs collect onto the result.
pub(crate) fn product_of(factors: Vec<Particle>) -> Particle {
    let mut sign = true;
    let mut coefficient: Option<Number> = None;
    let mut rest: Vec<Particle> = Vec::new();

    let mut queue: VecDeque<Particle> = factors.into();
    while let Some(factor) = queue.pop_front() {
        match factor {
            Particle::Term(t) if t.exponent == 1 => {
                if !t.sign {
                    sign = !sign;
                }
                for (i, inner) in t.factors.into_iter().enumerate() {
                    queue.insert(i, inner);
                }
            },
            Particle::Number(mut n) if n.exponent == 1 => {
                if !n.sign {
                    sign = !sign;
                    n.sign = true;
                }
                coefficient = Some(match coefficient {
                    Some(c) => arithmetic::multiply(&c, &n, RoundingRule::Scientific),
                    None => n,
                });
            },
            Particle::Variable(mut v) => {
                if !v.sign {
                    sign = !sign;
                    v.sign = true;
                }
                let existing = rest.iter_mut().find_map(|p| match p {
                    Particle::Variable(e) if e.letter == v.letter => Some(e),
                    _ => None,
                });
                match existing {
                    Some(e) => e.exponent += v.exponent,
                    None => rest.push(Particle::Variable(v)),
                }
            },
            other => {
                let positive = if other.sign() {
                    other
                } else {
                    sign = !sign;
                    other.with_sign(true)
                };
                rest.push(positive);
            },
        }
    }

    if let Some(c) = coefficient {
        if c.is_zero() {
            return Particle::Number(Number::zero());
        }
        // a coefficient of 1 only earns its place when there is nothing else
        if !arithmetic::is_one(&c) || rest.is_empty() {
            rest.insert(0, Particle::Number(c));
        }
    }
    Term::build(rest, sign, 1)
}

/// The exact numeric value of a constant particle: a numeral, a constant fraction, or a mixed
/// number. `None` for anything algebraic, powered, or with a zero denominator.
pub(crate) fn constant_value(particle: &Particle) -> Option<Rational> {
    if particle.exponent() != 1 {
        return None;
    }
    let magnitude = match particle {
        Particle::Number(n) => arithmetic::to_rational(&Number { sign: true, ..n.clone() }),
        Particle::Fraction(fr) if fr.is_constant() => {
            let top = fr.top.as_number()?;
            let bottom = fr.bottom.as_number()?;
            let divisor = arithmetic::to_rational(bottom);
            if divisor.cmp0() == std::cmp::Ordering::Equal {
                return None;
            }
            arithmetic::to_rational(top) / divisor
        },
        Particle::MixedNumber(m) => {
            let mut value = Rational::new();
            if let Some(whole) = &m.whole {
                value += arithmetic::to_rational(&Number::whole(whole.clone()));
            }
            if let Some(fr) = &m.fraction {
                let top = fr.top.as_number()?;
                let bottom = fr.bottom.as_number()?;
                let divisor = arithmetic::to_rational(bottom);
                if divisor.cmp0() == std::cmp::Ordering::Equal {
                    return None;
                }
                value += arithmetic::to_rational(top) / divisor;
            }
            value
        },
        _ => return None,
    };
    Some(if particle.sign() { magnitude } else { -magnitude })
}

/// The simplest particle with the given exact value: a numeral when the value is a finite
/// decimal, otherwise a fraction in lowest terms.
pub(crate) fn rational_to_particle(value: Rational) -> Particle {
    if arithmetic::is_terminating(&value) {
        return Particle::Number(arithmetic::from_rational(value, None));
    }
    let sign = value.cmp0() != std::cmp::Ordering::Less;
    let (numerator, denominator) = value.abs().into_numer_denom();
    let fraction = stepsolve_parser::particle::Fraction::new(
        Particle::Number(Number::whole(numerator.to_string())),
        Particle::Number(Number::whole(denominator.to_string())),
    );
    Particle::Fraction(fraction).with_sign(sign)
}

/// Splits a summand into its numeric coefficient and its variable part ("like part"). Two
/// summands with equal variable parts are like terms; `None` marks a plain numeral.
pub(crate) fn split_coefficient(term: &Particle) -> (Rational, Option<Particle>) {
    match term {
        Particle::Number(n) if n.exponent == 1 => (arithmetic::to_rational(n), None),
        Particle::Term(t) if t.exponent == 1 => {
            let mut coefficient = Rational::from(if t.sign { 1 } else { -1 });
            let mut parts = Vec::new();
            for factor in &t.factors {
                match factor {
                    Particle::Number(n) if n.exponent == 1 => {
                        coefficient *= arithmetic::to_rational(n);
                    },
                    other => {
                        if !other.sign() {
                            coefficient = -coefficient;
                        }
                        parts.push(other.with_sign(true));
                    },
                }
            }
            (coefficient, Some(Term::build(parts, true, 1)))
        },
        other => {
            let coefficient = Rational::from(if other.sign() { 1 } else { -1 });
            (coefficient, Some(other.with_sign(true)))
        },
    }
}

/// The inverse of [`split_coefficient`]: rebuilds a summand from a coefficient and a variable
/// part. A zero coefficient means the summand vanished.
pub(crate) fn term_from(coefficient: Rational, part: Option<Particle>) -> Option<Particle> {
    if coefficient.cmp0() == std::cmp::Ordering::Equal {
        return None;
    }
    let sign = coefficient.cmp0() == std::cmp::Ordering::Greater;
    let magnitude = arithmetic::from_rational(coefficient.abs(), None);

    let summand = match part {
        None => Particle::Number(magnitude).with_sign(sign),
        Some(p) if arithmetic::is_one(&magnitude) => p.with_sign(sign),
        Some(Particle::Term(t)) if t.exponent == 1 => {
            let mut factors = vec![Particle::Number(magnitude)];
            factors.extend(t.factors);
            Term::build(factors, sign == t.sign, 1)
        },
        Some(p) => Term::build(vec![Particle::Number(magnitude), p], sign, 1),
    };
    Some(summand)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::{self, Exclusions};

    fn parse(source: &str) -> Particle {
        particle::parse(source, Exclusions::NONE).unwrap()
    }

    #[test]
    fn product_merges_numerals_and_powers() {
        let product = product_of(vec![parse("2x"), parse("3"), parse("x")]);
        assert_eq!(product.to_string(), "6(x²)");
    }

    #[test]
    fn product_collects_signs() {
        assert_eq!(product_of(vec![parse("-x"), parse("-y")]).to_string(), "xy");
        assert_eq!(product_of(vec![parse("-x"), parse("y")]).to_string(), "-xy");
    }

    #[test]
    fn product_drops_a_coefficient_of_one() {
        assert_eq!(product_of(vec![parse("1"), parse("x")]).to_string(), "x");
        assert_eq!(product_of(vec![parse("1")]).to_string(), "1");
        assert_eq!(product_of(vec![parse("0"), parse("x")]).to_string(), "0");
    }

    #[test]
    fn coefficient_round_trip() {
        let (coefficient, part) = split_coefficient(&parse("-3x"));
        assert_eq!(coefficient, Rational::from(-3));
        let rebuilt = term_from(coefficient, part).unwrap();
        assert_eq!(rebuilt.to_string(), "-3x");
    }

    #[test]
    fn constants_have_no_variable_part() {
        let (coefficient, part) = split_coefficient(&parse("7"));
        assert_eq!(coefficient, Rational::from(7));
        assert_eq!(part, None);
    }

    #[test]
    fn variable_detection_sees_through_structure() {
        assert!(contains_variable(&parse("(2)/(2x)")));
        assert!(!contains_variable(&parse("(2)/(3)")));
    }
}
