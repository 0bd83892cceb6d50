//! `(1)/(8) = 0.125`: a fraction of two plain numerals is carried out as a division, under the
//! active rounding rule. Division by zero is reported rather than stepped over.

use crate::algorithm::{math, text, Algorithm};
use crate::arithmetic::{self, RoundingRule};
use crate::step::Step;
use crate::tree::Tree;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Fraction, Number, Particle};

pub struct Divide {
    pub rounding: RoundingRule,
}

impl Divide {
    pub fn new(rounding: RoundingRule) -> Divide {
        Divide { rounding }
    }
}

/// The two numerals of a constant fraction, when the division should actually be carried out:
/// the quotient terminates, the rounding rule says to round, or the bottom is zero (so the
/// division can be the one to report it).
fn operands(fraction: &Fraction, rounding: RoundingRule) -> Option<(&Number, &Number)> {
    let (Particle::Number(top), Particle::Number(bottom)) =
        (fraction.top.as_ref(), fraction.bottom.as_ref())
    else {
        return None;
    };
    if top.exponent != 1 || bottom.exponent != 1 {
        return None;
    }
    let ready = bottom.is_zero()
        || rounding.decimals(top, bottom).is_some()
        || arithmetic::is_terminating(&(arithmetic::to_rational(top)
            / arithmetic::to_rational(bottom)));
    ready.then_some((top, bottom))
}

fn target(tree: &Tree, rounding: RoundingRule) -> Option<usize> {
    tree.deepest_match(|particle| {
        matches!(particle, Particle::Fraction(fr) if operands(fr, rounding).is_some())
    })
}

impl Algorithm for Divide {
    fn smarts(&self, algebra: &Algebra) -> u8 {
        if target(&Tree::new(algebra), self.rounding).is_some() {
            9
        } else {
            0
        }
    }

    fn execute(&self, algebra: &Algebra) -> Result<Step, Error> {
        let tree = Tree::new(algebra);
        let Some(id) = target(&tree, self.rounding) else {
            unreachable!("no division to carry out");
        };
        let Particle::Fraction(fr) = tree.particle(id) else {
            unreachable!("division only applies to a fraction");
        };
        let Some((top, bottom)) = operands(fr, self.rounding) else {
            unreachable!("target is known to be a constant fraction");
        };

        let quotient = arithmetic::divide(top, bottom, self.rounding)?;
        let sign = fr.sign == quotient.sign;
        let result = Particle::Number(Number { sign: true, ..quotient })
            .with_sign(sign)
            .with_exponent(fr.exponent);

        let explanation = vec![
            text("Divide "),
            math(&Particle::Number(top.clone())),
            text(" by "),
            math(&Particle::Number(bottom.clone())),
            text(" to get "),
            math(&result),
            text("."),
        ];
        Ok(Step::new(vec![tree.consider_replacement(id, result)], explanation, 1))
    }
}
