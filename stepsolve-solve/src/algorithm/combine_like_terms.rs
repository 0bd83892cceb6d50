//! `5x + 7 - 3x = 2x + 7`: summands with equal variable parts merge into one.

use crate::algorithm::{math, split_coefficient, term_from, text, Algorithm};
use crate::render;
use crate::step::Step;
use crate::tree::Tree;
use rug::Rational;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Expression, Particle};

pub struct CombineLikeTerms;

/// One group of like summands: their shared variable part, the members found, and the sum of
/// their coefficients. Groups keep first-occurrence order so the rewritten sum reads like the
/// original.
struct Group {
    key: String,
    part: Option<Particle>,
    coefficient: Rational,
    members: Vec<Particle>,
}

fn groups_of(e: &Expression) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for term in &e.terms {
        let (coefficient, part) = split_coefficient(term);
        let key = part.as_ref().map(render::cached).unwrap_or_default();
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => {
                group.coefficient += coefficient;
                group.members.push(term.clone());
            },
            None => groups.push(Group {
                key,
                part,
                coefficient,
                members: vec![term.clone()],
            }),
        }
    }
    groups
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| match particle {
        Particle::Expression(e) => groups_of(e).iter().any(|group| group.members.len() > 1),
        _ => false,
    })
}

impl Algorithm for CombineLikeTerms {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        match target(&Tree::new(algebra)) {
            Some(_) => 7,
            None => 0,
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("no like terms to combine");
        };
        let Particle::Expression(e) = tree.particle(id) else {
            unreachable!("like terms only group inside a sum");
        };

        let groups = groups_of(e);
        let mut explanation = Vec::new();
        for group in groups.iter().filter(|group| group.members.len() > 1) {
            if !explanation.is_empty() {
                explanation.push(text(" "));
            }
            explanation.push(text("Combine "));
            for (i, member) in group.members.iter().enumerate() {
                if i > 0 {
                    explanation.push(text(" and "));
                }
                explanation.push(math(member));
            }
            match term_from(group.coefficient.clone(), group.part.clone()) {
                Some(combined) => {
                    explanation.push(text(" into "));
                    explanation.push(math(&combined));
                    explanation.push(text("."));
                },
                None => explanation.push(text(", which cancel out.")),
            }
        }

        let terms = groups
            .into_iter()
            .filter_map(|group| term_from(group.coefficient, group.part))
            .collect::<Vec<_>>();
        let combined = Expression::build(terms, e.sign, e.exponent);
        let stage = tree.consider_replacement(id, combined);

        Ok(Step::new(vec![stage], explanation, 3))
    }
}
