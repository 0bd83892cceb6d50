//! `(7)/(3) = 2(1)/(3)`: a top-heavy fraction in lowest terms is written as a whole part and
//! a proper remainder.

use crate::algorithm::{math, text, Algorithm};
use crate::arithmetic;
use crate::step::Step;
use crate::tree::Tree;
use rug::Integer;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Fraction, MixedNumber, Number, Particle};

pub struct ToMixedNumber;

/// The magnitudes of a fraction worth rewriting: integer top and bottom, top-heavy, a bottom
/// of at least 2, not evenly divisible, and already in lowest terms (reduction comes first).
fn magnitudes(fraction: &Fraction) -> Option<(Integer, Integer)> {
    if fraction.exponent != 1 || fraction.top.exponent() != 1 || fraction.bottom.exponent() != 1 {
        return None;
    }
    let top = arithmetic::as_integer(fraction.top.as_number()?)?.abs();
    let bottom = arithmetic::as_integer(fraction.bottom.as_number()?)?.abs();
    let ready = bottom >= 2u32
        && top > bottom
        && !top.is_divisible(&bottom)
        && top.clone().gcd(&bottom) == 1u32;
    ready.then_some((top, bottom))
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| {
        matches!(particle, Particle::Fraction(fr) if magnitudes(fr).is_some())
    })
}

impl Algorithm for ToMixedNumber {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        if target(&Tree::new(algebra)).is_some() {
            5
        } else {
            0
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("no top-heavy fraction to rewrite");
        };
        let Particle::Fraction(fr) = tree.particle(id) else {
            unreachable!("rewriting only applies to a fraction");
        };
        let Some((top, bottom)) = magnitudes(fr) else {
            unreachable!("target is known to be top-heavy");
        };

        let sign = fr.sign == (fr.top.sign() == fr.bottom.sign());
        let (quotient, remainder) = top.div_rem(bottom.clone());
        let proper = Fraction::new(
            Particle::Number(Number::whole(remainder.to_string())),
            Particle::Number(Number::whole(bottom.to_string())),
        );
        let mixed = Particle::MixedNumber(MixedNumber::new(quotient.to_string(), proper))
            .with_sign(sign);

        let explanation = vec![
            text("Pull the whole part out of "),
            math(tree.particle(id)),
            text(" to get "),
            math(&mixed),
            text("."),
        ];
        Ok(Step::new(vec![tree.consider_replacement(id, mixed)], explanation, 2))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn apply(source: &str) -> String {
        let algebra = parse_algebra(source).unwrap();
        assert!(ToMixedNumber.smarts(&algebra) > 0, "rule should apply to {source}");
        ToMixedNumber
            .execute(&algebra)
            .unwrap()
            .result()
            .to_string()
    }

    #[test]
    fn a_top_heavy_fraction_splits() {
        assert_eq!(apply("(7)/(3)"), "2(1)/(3)");
    }

    #[test]
    fn the_sign_stays_out_front() {
        assert_eq!(apply("-(7)/(3)"), "-2(1)/(3)");
        assert_eq!(apply("(-7)/(3)"), "-2(1)/(3)");
    }

    #[test]
    fn proper_fractions_are_left_alone() {
        assert_eq!(ToMixedNumber.smarts(&parse_algebra("(2)/(3)").unwrap()), 0);
    }

    #[test]
    fn reducible_fractions_wait_for_cancellation() {
        assert_eq!(ToMixedNumber.smarts(&parse_algebra("(10)/(4)").unwrap()), 0);
    }

    #[test]
    fn even_divisions_wait_for_the_division() {
        assert_eq!(ToMixedNumber.smarts(&parse_algebra("(6)/(3)").unwrap()), 0);
    }

    #[test]
    fn a_unit_bottom_is_not_a_mixed_number() {
        assert_eq!(ToMixedNumber.smarts(&parse_algebra("(7)/(1)").unwrap()), 0);
    }
}
