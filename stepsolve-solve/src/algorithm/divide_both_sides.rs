//! `2x=4` becomes `x=(4)/(2)`: dividing both sides by the unknown's coefficient leaves the
//! unknown alone, and the division itself is a later step.

use crate::algorithm::{contains_variable, math, rational_to_particle, split_coefficient, text, Algorithm};
use crate::step::Step;
use rug::Rational;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Equation, Fraction, Particle};

pub struct DivideBothSides;

/// The unknown-bearing side's coefficient and bare part, with the opposite side, when the
/// coefficient is worth dividing away. Left side checked first.
fn plan(equation: &Equation) -> Option<(Rational, Particle, &Particle, bool)> {
    for (own, other, leftward) in
        [(&equation.left, &equation.right, true), (&equation.right, &equation.left, false)]
    {
        if contains_variable(other) {
            continue;
        }
        let (coefficient, Some(part)) = split_coefficient(own) else {
            continue;
        };
        if !contains_variable(&part) || coefficient == 1u32 || coefficient == 0u32 {
            continue;
        }
        return Some((coefficient, part, other, leftward));
    }
    None
}

impl Algorithm for DivideBothSides {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match algebra.as_equation().and_then(plan) {
            Some(_) => 9,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let Some((coefficient, part, other, leftward)) = algebra.as_equation().and_then(plan)
        else {
            unreachable!("no coefficient to divide away");
        };

        let divisor = rational_to_particle(coefficient);
        let quotient = Particle::Fraction(Fraction::new(other.clone(), divisor.clone()));
        let equation = if leftward {
            Equation::new(part.clone(), quotient)
        } else {
            Equation::new(quotient, part.clone())
        };

        let explanation = vec![
            text("Divide both sides by "),
            math(&divisor),
            text(" to leave "),
            math(&part),
            text(" alone."),
        ];
        Ok(Step::new(vec![Algebra::Equation(equation)], explanation, 2))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn apply(source: &str) -> String {
        let algebra = parse_algebra(source).unwrap();
        assert!(DivideBothSides.smarts(&algebra) > 0, "rule should apply to {source}");
        DivideBothSides.execute(&algebra).unwrap().result().to_string()
    }

    #[test]
    fn the_coefficient_becomes_a_divisor() {
        assert_eq!(apply("2x=4"), "x=(4)/(2)");
    }

    #[test]
    fn the_unknown_may_sit_on_the_right() {
        assert_eq!(apply("4=2x"), "(4)/(2)=x");
    }

    #[test]
    fn a_negated_unknown_divides_by_minus_one() {
        assert_eq!(apply("-x=1"), "x=(1)/(-1)");
    }

    #[test]
    fn a_bare_unknown_needs_no_division() {
        assert_eq!(DivideBothSides.smarts(&parse_algebra("x=4").unwrap()), 0);
    }

    #[test]
    fn unknowns_on_both_sides_wait_to_be_gathered() {
        assert_eq!(DivideBothSides.smarts(&parse_algebra("2x=3x").unwrap()), 0);
    }

    #[test]
    fn a_mixed_side_waits_for_its_constants_to_move() {
        assert_eq!(DivideBothSides.smarts(&parse_algebra("2x+1=4").unwrap()), 0);
    }
}
