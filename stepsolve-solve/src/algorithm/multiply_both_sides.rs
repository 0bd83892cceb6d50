//! `(x)/(3)=4` becomes `x=4(3)`: multiplying both sides by a constant bottom clears the
//! fraction the unknown is trapped in.

use crate::algorithm::{contains_variable, math, product_of, text, Algorithm};
use crate::step::Step;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Equation, Fraction, Particle};

pub struct MultiplyBothSides;

/// An unpowered fraction whose top carries the unknown and whose bottom is constant.
fn clearable(side: &Particle) -> Option<&Fraction> {
    match side {
        Particle::Fraction(fr)
            if fr.exponent == 1
                && contains_variable(&fr.top)
                && !contains_variable(&fr.bottom) =>
        {
            Some(fr)
        },
        _ => None,
    }
}

fn plan(equation: &Equation) -> Option<(&Fraction, &Particle, bool)> {
    if let Some(fr) = clearable(&equation.left) {
        return Some((fr, &equation.right, true));
    }
    if let Some(fr) = clearable(&equation.right) {
        return Some((fr, &equation.left, false));
    }
    None
}

impl Algorithm for MultiplyBothSides {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match algebra.as_equation().and_then(plan) {
            Some(_) => 8,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let Some((fraction, other, leftward)) = algebra.as_equation().and_then(plan) else {
            unreachable!("no fraction to clear");
        };

        let freed_sign = fraction.top.sign() == fraction.sign;
        let freed = fraction.top.with_sign(freed_sign);
        let multiplied = product_of(vec![other.clone(), (*fraction.bottom).clone()]);
        let equation = if leftward {
            Equation::new(freed.clone(), multiplied)
        } else {
            Equation::new(multiplied, freed.clone())
        };

        let explanation = vec![
            text("Multiply both sides by "),
            math(&fraction.bottom),
            text(" to free "),
            math(&freed),
            text("."),
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
        assert!(MultiplyBothSides.smarts(&algebra) > 0, "rule should apply to {source}");
        MultiplyBothSides.execute(&algebra).unwrap().result().to_string()
    }

    #[test]
    fn the_bottom_crosses_over() {
        assert_eq!(apply("(x)/(3)=4"), "x=12");
    }

    #[test]
    fn the_fraction_may_sit_on_the_right() {
        assert_eq!(apply("4=(x)/(3)"), "12=x");
    }

    #[test]
    fn an_algebraic_bottom_stays_put() {
        assert_eq!(MultiplyBothSides.smarts(&parse_algebra("(3)/(x)=4").unwrap()), 0);
    }

    #[test]
    fn the_fraction_sign_rides_along_on_the_top() {
        assert_eq!(apply("-(x)/(3)=4"), "-x=12");
    }

    #[test]
    fn an_algebraic_multiplier_builds_a_product() {
        assert_eq!(apply("(x)/(3)=y"), "x=3y");
    }
}
