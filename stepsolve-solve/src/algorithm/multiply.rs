//! `2·3x = 6x`: the constant factors of a product are multiplied out, numerals under the
//! active rounding rule and fractions exactly.

use crate::algorithm::{constant_value, math, rational_to_particle, text, Algorithm};
use crate::arithmetic::{self, RoundingRule};
use crate::step::Step;
use crate::tree::Tree;
use rug::Rational;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Number, Particle, Term};

pub struct Multiply {
    pub rounding: RoundingRule,
}

impl Multiply {
    pub fn new(rounding: RoundingRule) -> Multiply {
        Multiply { rounding }
    }
}

fn target(tree: &Tree) -> Option<usize> {
    tree.deepest_match(|particle| {
        matches!(particle, Particle::Term(t) if t.exponent == 1
            && t.factors.iter().filter(|f| constant_value(f).is_some()).count() >= 2)
    })
}

impl Algorithm for Multiply {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        if target(&Tree::new(algebra)).is_some() {
            6
        } else {
            0
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree) else {
            unreachable!("no constant factors to multiply");
        };
        let Particle::Term(term) = tree.particle(id) else {
            unreachable!("multiplication only applies to a product");
        };

        let mut constants = Vec::new();
        let mut others = Vec::new();
        for factor in &term.factors {
            if constant_value(factor).is_some() {
                constants.push(factor.clone());
            } else {
                others.push(factor.clone());
            }
        }

        let mut explanation = vec![text("Multiply ")];
        for (i, factor) in constants.iter().enumerate() {
            if i > 0 {
                explanation.push(text(" by "));
            }
            explanation.push(math(factor));
        }

        // numerals fold pairwise so the rounding rule sees each pair's precision; anything
        // fractional afterwards folds exactly
        let mut folded: Option<Number> = None;
        let mut exact = Rational::from(1);
        for factor in &constants {
            match factor {
                Particle::Number(n) => {
                    folded = Some(match folded {
                        Some(acc) => arithmetic::multiply(&acc, n, self.rounding),
                        None => n.clone(),
                    });
                },
                other => {
                    // constant_value is Some for every collected factor
                    if let Some(value) = constant_value(other) {
                        exact *= value;
                    }
                },
            }
        }
        let product = if exact == 1u32 {
            Particle::Number(folded.unwrap_or_else(Number::one))
        } else {
            let numeral = folded.map_or_else(|| Rational::from(1), |n| arithmetic::to_rational(&n));
            rational_to_particle(numeral * exact)
        };

        let sign = term.sign == product.sign();
        let magnitude = product.with_sign(true);
        let result = if matches!(&magnitude, Particle::Number(n) if n.is_zero()) {
            Particle::Number(Number::zero())
        } else if others.is_empty() {
            magnitude.with_sign(sign)
        } else if matches!(&magnitude, Particle::Number(n) if arithmetic::is_one(n)) {
            Term::build(others, sign, 1)
        } else {
            let mut factors = vec![magnitude];
            factors.extend(others);
            Term::build(factors, sign, 1)
        };

        explanation.extend([text(" to get "), math(&result), text(".")]);
        Ok(Step::new(vec![tree.consider_replacement(id, result)], explanation, 2))
    }
}
