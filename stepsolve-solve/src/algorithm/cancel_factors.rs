//! `(2)/(2x) = (1)/(x)`: factors shared by the top and bottom of a fraction are struck, numeric
//! coefficients are reduced by their greatest common divisor, and a bottom of 1 (or a top of 0)
//! collapses the fraction entirely.

use crate::algorithm::{math, text, Algorithm};
use crate::arithmetic;
use crate::step::{Snippet, Step};
use crate::tree::Tree;
use rug::Integer;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Fraction, Number, Particle, Term};

pub struct CancelFactors;

/// One side of a fraction as a product: its sign, its integer coefficient (when it has one),
/// and its remaining factors.
struct Side {
    sign: bool,
    coefficient: Option<Integer>,
    factors: Vec<Particle>,
}

impl Side {
    fn of(particle: &Particle) -> Side {
        let (sign, list) = match particle {
            Particle::Term(t) if t.exponent == 1 => (t.sign, t.factors.clone()),
            other => (other.sign(), vec![other.with_sign(true)]),
        };

        let mut side = Side { sign, coefficient: None, factors: Vec::new() };
        for factor in list {
            let numeral = match &factor {
                Particle::Number(n)
                    if n.exponent == 1 && n.decimal.is_none() && n.sci_exponent.is_none() =>
                {
                    arithmetic::as_integer(n).map(|value| (n.sign, value.abs()))
                },
                _ => None,
            };
            match numeral {
                Some((sign, value)) => {
                    side.sign = side.sign == sign;
                    side.coefficient = Some(value);
                },
                None => side.factors.push(factor),
            }
        }
        side
    }

    fn rebuild(self) -> Particle {
        let mut factors = self.factors;
        if let Some(coefficient) = self.coefficient {
            // a coefficient of 1 only matters when it is the whole side
            if coefficient != 1u32 || factors.is_empty() {
                factors.insert(0, Particle::Number(Number::whole(coefficient.to_string())));
            }
        }
        Term::build(factors, self.sign, 1)
    }
}

/// A matching pair of structural factors, by equal base (everything but the exponent).
fn shared_structural(top: &Side, bottom: &Side) -> Option<(usize, usize)> {
    for (i, a) in top.factors.iter().enumerate() {
        for (j, b) in bottom.factors.iter().enumerate() {
            if a.with_exponent(1) == b.with_exponent(1) {
                return Some((i, j));
            }
        }
    }
    None
}

fn numeric_gcd(top: &Side, bottom: &Side) -> Option<Integer> {
    let (a, b) = (top.coefficient.as_ref()?, bottom.coefficient.as_ref()?);
    let g = a.clone().gcd(b);
    (g > 1u32).then_some(g)
}

/// Returns true if reducing would leave a bottom of 1 or a top of 0, collapsing the fraction.
fn collapses(top: &Side, bottom: &Side) -> bool {
    if top.coefficient.as_ref().is_some_and(|c| *c == 0u32) {
        return true;
    }
    if !bottom.factors.is_empty() {
        return false;
    }
    match (&top.coefficient, &bottom.coefficient) {
        (_, Some(b)) => {
            let reduced = match &top.coefficient {
                Some(a) => b.clone() / a.clone().gcd(b),
                None => b.clone(),
            };
            reduced == 1u32
        },
        (_, None) => false,
    }
}

fn applicable(fraction: &Fraction) -> bool {
    let (top, bottom) = (Side::of(&fraction.top), Side::of(&fraction.bottom));
    shared_structural(&top, &bottom).is_some()
        || numeric_gcd(&top, &bottom).is_some()
        || collapses(&top, &bottom)
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| {
        matches!(particle, Particle::Fraction(fr) if fr.exponent == 1 && applicable(fr))
    })
}

impl Algorithm for CancelFactors {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else { return 0 };
        let Particle::Fraction(fr) = tree.particle(id) else { return 0 };
        let (top, bottom) = (Side::of(&fr.top), Side::of(&fr.bottom));
        // striking the fraction itself is worth more than thinning it
        if collapses(&top, &bottom) { 8 } else { 6 }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("no factors to cancel");
        };
        let Particle::Fraction(fr) = tree.particle(id) else {
            unreachable!("cancellation only applies to a fraction");
        };
        let sign = fr.sign;

        let mut top = Side::of(&fr.top);
        let mut bottom = Side::of(&fr.bottom);
        let mut stages = Vec::new();
        let mut explanation: Vec<Snippet> = Vec::new();

        // first stage: strike structural factors shared by both sides
        let mut struck = false;
        while let Some((i, j)) = shared_structural(&top, &bottom) {
            struck = true;
            explanation.extend([
                if explanation.is_empty() {
                    text("Cancel ")
                } else {
                    text(" and ")
                },
                math(&top.factors[i].with_exponent(1)),
            ]);
            let cancelled = top.factors[i].exponent().min(bottom.factors[j].exponent());
            reduce_exponent(&mut top.factors, i, cancelled);
            reduce_exponent(&mut bottom.factors, j, cancelled);
        }
        if struck {
            explanation.push(text(" from the top and bottom of the fraction."));
            let fraction = Particle::Fraction(Fraction::new(
                top.clone_rebuild(),
                bottom.clone_rebuild(),
            ))
            .with_sign(sign);
            stages.push(tree.consider_replacement(id, fraction));
        }

        // second stage: reduce the numerals, and collapse a spent fraction
        let mut reduced = false;
        if let Some(g) = numeric_gcd(&top, &bottom) {
            reduced = true;
            if let (Some(a), Some(b)) = (top.coefficient.take(), bottom.coefficient.take()) {
                top.coefficient = Some(a / &g);
                bottom.coefficient = Some(b / &g);
            }
            if !explanation.is_empty() {
                explanation.push(text(" "));
            }
            explanation.extend([
                text("Divide the top and bottom by "),
                math(&Particle::Number(Number::whole(g.to_string()))),
                text("."),
            ]);
        }

        let top_zero = top.coefficient.as_ref().is_some_and(|c| *c == 0u32);
        let bottom_one = bottom.factors.is_empty()
            && bottom.coefficient.as_ref().map_or(true, |c| *c == 1u32);
        if top_zero || bottom_one || reduced {
            let result = if top_zero {
                if !explanation.is_empty() {
                    explanation.push(text(" "));
                }
                explanation.push(text("A top of 0 makes the whole fraction 0."));
                Particle::Number(Number::zero())
            } else if bottom_one {
                if !explanation.is_empty() {
                    explanation.push(text(" "));
                }
                explanation.push(text("A bottom of 1 leaves just the top."));
                let inner = top.rebuild();
                let combined = (inner.sign() == sign) == bottom.sign;
                inner.with_sign(combined)
            } else {
                Particle::Fraction(Fraction::new(top.rebuild(), bottom.rebuild()))
                    .with_sign(sign)
            };
            stages.push(tree.consider_replacement(id, result));
        }

        Ok(Step::new(stages, explanation, 2))
    }
}

fn reduce_exponent(factors: &mut Vec<Particle>, index: usize, by: u32) {
    let exponent = factors[index].exponent();
    if exponent > by {
        factors[index] = factors[index].with_exponent(exponent - by);
    } else {
        factors.remove(index);
    }
}

impl Side {
    fn clone_rebuild(&self) -> Particle {
        Side {
            sign: self.sign,
            coefficient: self.coefficient.clone(),
            factors: self.factors.clone(),
        }
        .rebuild()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn apply(source: &str) -> Vec<String> {
        let algebra = parse_algebra(source).unwrap();
        assert!(CancelFactors.smarts(&algebra) > 0, "rule should apply to {source}");
        CancelFactors
            .execute(&algebra)
            .unwrap()
            .stages
            .iter()
            .map(|stage| stage.to_string())
            .collect()
    }

    #[test]
    fn numeric_coefficients_reduce() {
        assert_eq!(apply("(2)/(2x)"), vec!["(1)/(x)"]);
    }

    #[test]
    fn a_bottom_of_one_collapses() {
        assert_eq!(apply("(4)/(1)"), vec!["4"]);
    }

    #[test]
    fn a_negative_bottom_keeps_its_sign_through_a_collapse() {
        assert_eq!(apply("(1)/(-1)"), vec!["-1"]);
    }

    #[test]
    fn a_top_of_zero_collapses() {
        assert_eq!(apply("(0)/(7x)"), vec!["0"]);
    }

    #[test]
    fn shared_variables_strike_in_their_own_stage() {
        assert_eq!(apply("(2x)/(4x)"), vec!["(2)/(4)", "(1)/(2)"]);
    }

    #[test]
    fn powers_cancel_partially() {
        assert_eq!(apply("(x³)/(x)"), vec!["(x²)/(1)", "x²"]);
    }

    #[test]
    fn collapse_scores_higher_than_thinning() {
        let collapse = parse_algebra("(4)/(1)").unwrap();
        let thin = parse_algebra("(2)/(4)").unwrap();
        assert_eq!(CancelFactors.smarts(&collapse), 8);
        assert_eq!(CancelFactors.smarts(&thin), 6);
    }

    #[test]
    fn a_reduced_fraction_is_left_alone() {
        assert_eq!(CancelFactors.smarts(&parse_algebra("(1)/(3)").unwrap()), 0);
    }
}
