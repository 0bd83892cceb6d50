//! `(2x+4)/(2) = (2(x+2))/(2)`: a sum on one side of a fraction gives up a common numeric
//! factor, setting a cancellation up.

use crate::algorithm::{math, split_coefficient, term_from, text, Algorithm};
use crate::step::Step;
use crate::tree::Tree;
use rug::{Integer, Rational};
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Expression, Number, Particle, Term};

pub struct Factor;

/// The greatest common divisor of a sum's coefficients, when they are all integers and share
/// more than 1.
fn common_factor(e: &Expression) -> Option<Integer> {
    let mut common = Integer::new();
    for term in &e.terms {
        let (coefficient, _) = split_coefficient(term);
        if !coefficient.is_integer() {
            return None;
        }
        common = common.gcd(&coefficient.into_numer_denom().0);
    }
    (common > 1u32).then_some(common)
}

/// The factor worth pulling out: the part of the sum's common divisor that the other side of
/// the enclosing fraction also carries, so the cancellation that follows can strike it.
fn shared_factor(tree: &Tree, id: usize) -> Option<Integer> {
    let Particle::Expression(e) = tree.particle(id) else {
        return None;
    };
    if e.exponent != 1 {
        return None;
    }

    let parent = tree.parent(id)?;
    let Particle::Fraction(_) = tree.particle(parent) else {
        return None;
    };
    let sibling = tree
        .iter()
        .find(|&(other, _)| other != id && tree.parent(other) == Some(parent))?;

    let common = common_factor(e)?;
    let (sibling_coefficient, _) = split_coefficient(sibling.1);
    if !sibling_coefficient.is_integer() {
        return None;
    }
    let shared = common.gcd(&sibling_coefficient.into_numer_denom().0.abs());
    (shared > 1u32).then_some(shared)
}

fn target(tree: &Tree) -> Option<(usize, Integer)> {
    tree.iter()
        .filter_map(|(id, _)| shared_factor(tree, id).map(|shared| (id, shared)))
        .max_by_key(|&(id, _)| (tree.depth(id), std::cmp::Reverse(id)))
}

impl Algorithm for Factor {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match target(&Tree::new(algebra)) {
            Some(_) => 4,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some((id, shared)) = target(&tree) else {
            unreachable!("no common factor to pull out");
        };
        let Particle::Expression(e) = tree.particle(id) else {
            unreachable!("factoring only applies to a sum");
        };

        let divisor = Rational::from(shared.clone());
        let reduced = e
            .terms
            .iter()
            .filter_map(|term| {
                let (coefficient, part) = split_coefficient(term);
                term_from(coefficient / &divisor, part)
            })
            .collect::<Vec<_>>();

        let common = Particle::Number(Number::whole(shared.to_string()));
        let factored = Term::build(
            vec![common.clone(), Expression::build(reduced, true, 1)],
            e.sign,
            1,
        );

        let explanation = vec![
            text("Pull the common factor "),
            math(&common),
            text(" out of "),
            math(tree.particle(id)),
            text("."),
        ];
        let stage = tree.consider_replacement(id, factored);

        Ok(Step::new(vec![stage], explanation, 3))
    }
}
