//! `x+2=4` becomes `x=4-2`: summands hop across the equals sign with their signs flipped,
//! gathering the unknowns on one side and the constants on the other.

use crate::algorithm::{contains_variable, math, text, Algorithm};
use crate::step::Step;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Equation, Expression, Particle};

pub struct ChangeSides;

fn summands(side: &Particle) -> Vec<Particle> {
    match side {
        Particle::Expression(e) if e.sign && e.exponent == 1 => e.terms.clone(),
        other => vec![other.clone()],
    }
}

fn negated(summand: &Particle) -> Particle {
    summand.with_sign(!summand.sign())
}

/// The move the rule would make, if any: the summands leaving a side and the rebuilt equation.
fn plan(equation: &Equation) -> Option<(Vec<Particle>, Equation)> {
    // textually identical sides are an identity; moving anything across would only churn
    if equation.left.to_string() == equation.right.to_string() {
        return None;
    }
    let left = summands(&equation.left);
    let right = summands(&equation.right);

    // unknowns on both sides gather on the left first, or moving constants off a mixed side
    // would just be undone by moving them back
    let (movers, remainder): (Vec<_>, Vec<_>) =
        right.iter().cloned().partition(contains_variable);
    if !movers.is_empty() && left.iter().any(contains_variable) {
        let mut gathered = left;
        gathered.extend(movers.iter().map(negated));
        let equation = Equation::new(
            Expression::build(gathered, true, 1),
            Expression::build(remainder, true, 1),
        );
        return Some((movers, equation));
    }

    // then a side mixing unknowns and constants sheds its constants, left side preferred
    for (own, other, leftward) in [(&left, &right, true), (&right, &left, false)] {
        let (keep, movers): (Vec<_>, Vec<_>) =
            own.iter().cloned().partition(contains_variable);
        if keep.is_empty() || movers.is_empty() {
            continue;
        }
        let mut landing = other.clone();
        landing.extend(movers.iter().map(negated));
        let kept = Expression::build(keep, true, 1);
        let landed = Expression::build(landing, true, 1);
        let equation = if leftward {
            Equation::new(kept, landed)
        } else {
            Equation::new(landed, kept)
        };
        return Some((movers, equation));
    }
    None
}

impl Algorithm for ChangeSides {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match algebra.as_equation().and_then(plan) {
            Some(_) => 7,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let Some((movers, equation)) = algebra.as_equation().and_then(plan) else {
            unreachable!("no summand to move across");
        };

        let mut explanation = vec![text("Move ")];
        for (i, mover) in movers.iter().enumerate() {
            if i > 0 {
                explanation.push(text(" and "));
            }
            explanation.push(math(mover));
        }
        explanation.push(text(if movers.len() == 1 {
            " to the other side, flipping its sign."
        } else {
            " to the other side, flipping their signs."
        }));

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
        assert!(ChangeSides.smarts(&algebra) > 0, "rule should apply to {source}");
        ChangeSides.execute(&algebra).unwrap().result().to_string()
    }

    #[test]
    fn constants_leave_the_variable_side() {
        assert_eq!(apply("x+2=4"), "x=4-2");
    }

    #[test]
    fn a_negative_constant_comes_back_positive() {
        assert_eq!(apply("x-2=4"), "x=4+2");
    }

    #[test]
    fn the_right_side_sheds_constants_too() {
        assert_eq!(apply("4=x+2"), "4-2=x");
    }

    #[test]
    fn unknowns_gather_on_the_left() {
        assert_eq!(apply("2x=3x+1"), "2x-3x=1");
        assert_eq!(apply("2x-1=3x"), "2x-1-3x=0");
    }

    #[test]
    fn a_solved_equation_is_left_alone() {
        assert_eq!(ChangeSides.smarts(&parse_algebra("4=x").unwrap()), 0);
        assert_eq!(ChangeSides.smarts(&parse_algebra("2+2=x").unwrap()), 0);
    }

    #[test]
    fn an_identity_is_left_alone() {
        assert_eq!(ChangeSides.smarts(&parse_algebra("x=x").unwrap()), 0);
        assert_eq!(ChangeSides.smarts(&parse_algebra("2x+1=2x+1").unwrap()), 0);
    }

    #[test]
    fn a_lone_particle_has_no_sides() {
        assert_eq!(ChangeSides.smarts(&parse_algebra("x+2").unwrap()), 0);
    }
}
