//! `2(x+4) = 2x+8`: a product with a sum among its factors expands, every combination of
//! one summand per sum multiplied out, in reading order.

use crate::algorithm::{math, product_of, text, Algorithm};
use crate::step::Step;
use crate::tree::Tree;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Expression, Particle, Term};

pub struct Distribute;

/// A sum factor can be expanded when it is unpowered; `(x+4)²` has no product to distribute
/// over until it is written out as a product.
fn expandable(term: &Term) -> bool {
    term.exponent == 1
        && term
            .factors
            .iter()
            .any(|factor| matches!(factor, Particle::Expression(e) if e.exponent == 1))
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| matches!(particle, Particle::Term(t) if expandable(t)))
}

impl Algorithm for Distribute {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match target(&Tree::new(algebra)) {
            Some(_) => 7,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("nothing to distribute");
        };
        let Particle::Term(term) = tree.particle(id) else {
            unreachable!("distribution only applies to a product");
        };

        // one list of alternatives per factor: a sum contributes its summands, anything else
        // contributes itself
        let lists: Vec<Vec<Particle>> = term
            .factors
            .iter()
            .map(|factor| match factor {
                Particle::Expression(e) if e.exponent == 1 => e
                    .terms
                    .iter()
                    .map(|summand| {
                        if e.sign {
                            summand.clone()
                        } else {
                            summand.with_sign(!summand.sign())
                        }
                    })
                    .collect(),
                other => vec![other.clone()],
            })
            .collect();

        let mut combinations: Vec<Vec<Particle>> = vec![Vec::new()];
        for list in &lists {
            combinations = combinations
                .iter()
                .flat_map(|prefix| {
                    list.iter().map(|item| {
                        let mut combination = prefix.clone();
                        combination.push(item.clone());
                        combination
                    })
                })
                .collect();
        }

        let summands = combinations
            .into_iter()
            .map(|combination| {
                let product = product_of(combination);
                if term.sign {
                    product
                } else {
                    product.with_sign(!product.sign())
                }
            })
            .collect::<Vec<_>>();
        let expanded = Expression::build(summands, true, 1);

        let explanation = vec![
            text("Distribute "),
            math(tree.particle(id)),
            text(" into "),
            math(&expanded),
            text("."),
        ];
        let stage = tree.consider_replacement(id, expanded);

        Ok(Step::new(vec![stage], explanation, 4))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn apply(source: &str) -> String {
        let algebra = parse_algebra(source).unwrap();
        assert!(Distribute.smarts(&algebra) > 0, "rule should apply to {source}");
        Distribute.execute(&algebra).unwrap().result().to_string()
    }

    #[test]
    fn coefficient_over_a_sum() {
        assert_eq!(apply("2(x+4)"), "2x+8");
    }

    #[test]
    fn two_sums_expand_in_reading_order() {
        assert_eq!(apply("(x+4)(x+6)"), "x²+6x+4x+24");
    }

    #[test]
    fn subtraction_distributes_its_sign() {
        assert_eq!(apply("2(x-4)"), "2x-8");
    }

    #[test]
    fn a_negated_product_flips_every_summand() {
        assert_eq!(apply("-2(x+4)"), "-2x-8");
    }

    #[test]
    fn powered_sums_are_not_expandable() {
        let algebra = parse_algebra("(x+4)²").unwrap();
        assert_eq!(Distribute.smarts(&algebra), 0);
    }
}
