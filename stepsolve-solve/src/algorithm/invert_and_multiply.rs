//! `((1)/(2))/(3) = (1)/(6)`: a fraction stacked inside another fraction is flattened by
//! multiplying by the reciprocal.

use crate::algorithm::{math, product_of, text, Algorithm};
use crate::step::Step;
use crate::tree::Tree;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Fraction, Number, Particle};

pub struct InvertAndMultiply;

/// Reads a particle as a quotient: its own top and bottom when it is an unpowered fraction
/// (the fraction's sign folding into the top), otherwise itself over 1.
fn as_quotient(particle: &Particle) -> (Particle, Particle) {
    match particle {
        Particle::Fraction(fr) if fr.exponent == 1 => {
            let top = if fr.sign {
                (*fr.top).clone()
            } else {
                let flipped = !fr.top.sign();
                fr.top.with_sign(flipped)
            };
            (top, (*fr.bottom).clone())
        },
        other => (other.clone(), Particle::Number(Number::one())),
    }
}

fn stacked(fraction: &Fraction) -> bool {
    let inner = |p: &Particle| matches!(p, Particle::Fraction(fr) if fr.exponent == 1);
    inner(&fraction.top) || inner(&fraction.bottom)
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| matches!(particle, Particle::Fraction(fr) if stacked(fr)))
}

impl Algorithm for InvertAndMultiply {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        if target(&Tree::new(algebra)).is_some() {
            8
        } else {
            0
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("no stacked fraction to flatten");
        };
        let Particle::Fraction(fr) = tree.particle(id) else {
            unreachable!("flattening only applies to a fraction");
        };

        let (a, b) = as_quotient(&fr.top);
        let (c, d) = as_quotient(&fr.bottom);
        let reciprocal = Particle::Fraction(Fraction::new(d.clone(), c.clone()));
        let explanation = vec![
            text("Dividing by "),
            math(&Particle::Fraction(Fraction::new(c.clone(), d.clone()))),
            text(" is multiplying by "),
            math(&reciprocal),
            text("."),
        ];

        let flattened = Particle::Fraction(Fraction::new(product_of(vec![a, d]), product_of(vec![b, c])))
            .with_sign(fr.sign)
            .with_exponent(fr.exponent);
        Ok(Step::new(vec![tree.consider_replacement(id, flattened)], explanation, 3))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn apply(source: &str) -> String {
        let algebra = parse_algebra(source).unwrap();
        assert!(InvertAndMultiply.smarts(&algebra) > 0, "rule should apply to {source}");
        InvertAndMultiply
            .execute(&algebra)
            .unwrap()
            .result()
            .to_string()
    }

    #[test]
    fn a_fraction_on_top_flattens() {
        assert_eq!(apply("((1)/(2))/(3)"), "(1)/(6)");
    }

    #[test]
    fn a_fraction_on_the_bottom_inverts() {
        assert_eq!(apply("(x)/((2)/(3))"), "(3x)/(2)");
    }

    #[test]
    fn both_sides_stacked_flatten_at_once() {
        assert_eq!(apply("((1)/(2))/((3)/(4))"), "(4)/(6)");
    }

    #[test]
    fn the_inner_sign_moves_to_the_top() {
        assert_eq!(apply("((-1)/(2))/(3)"), "(-1)/(6)");
    }

    #[test]
    fn the_outer_sign_survives() {
        assert_eq!(apply("-((1)/(2))/(3)"), "-(1)/(6)");
    }

    #[test]
    fn a_plain_fraction_is_left_alone() {
        assert_eq!(InvertAndMultiply.smarts(&parse_algebra("(1)/(2)").unwrap()), 0);
    }
}
