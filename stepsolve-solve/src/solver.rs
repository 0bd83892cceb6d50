//! The search loop: every usable rule is tried on every line of work, and the cheapest finished
//! trace wins.
//!
//! Rules disagree about what to do next, and a greedy pick can walk into a dead end, so the
//! solver keeps a frontier of alternative traces instead. Each pass extends every trace by every
//! rule whose [`smarts`](Algorithm::smarts) clears the usability floor; duplicate results are
//! folded away by their rendered text, and a trace nothing can extend settles as a candidate.

use crate::algorithm::{self, Algorithm, Mode};
use crate::arithmetic::RoundingRule;
use crate::error::kind;
use crate::step::Solution;
use std::collections::HashSet;
use stepsolve_error::Error;
use stepsolve_parser::particle::{Algebra, Particle};

/// The least `smarts` a rule must report before the solver will run it.
pub const USABILITY_FLOOR: u8 = 4;

pub struct Solver {
    pub mode: Mode,
    pub rounding: RoundingRule,

    /// How many frontier passes to make before settling for the best trace found so far.
    pub max_iterations: usize,
}

/// A particle that no step needs to touch again: a numeral or a lone variable.
fn terminal(particle: &Particle) -> bool {
    matches!(particle, Particle::Number(_) | Particle::Variable(_))
}

/// Whether a trace ending here is done, as opposed to merely stuck.
fn finished(algebra: &Algebra, mode: Mode) -> bool {
    match algebra {
        Algebra::Equation(eq) => {
            (terminal(&eq.left) && terminal(&eq.right))
                || eq.left.to_string() == eq.right.to_string()
        },
        Algebra::Particle(p) => mode == Mode::Simplify && terminal(p),
    }
}

impl Solver {
    pub fn new(mode: Mode, rounding: RoundingRule) -> Solver {
        Solver { mode, rounding, max_iterations: 25 }
    }

    /// Works the input to its final form, returning the best trace found.
    ///
    /// A trace that dies on an error (a division by zero, say) is abandoned in favor of its
    /// siblings; the error only surfaces when every line of work dies on one.
    pub fn solve(&self, algebra: Algebra) -> Result<Solution, Error> {
        if self.mode == Mode::Solve && algebra.as_equation().is_none() {
            return Err(Error::new(vec![0..0], kind::NothingToSolve));
        }

        let rules = algorithm::registry(self.mode, self.rounding);
        let mut seen = HashSet::new();
        seen.insert(algebra.to_string());
        let mut frontier = vec![Solution::new(algebra)];
        let mut candidates: Vec<Solution> = Vec::new();
        let mut failure: Option<Error> = None;

        for _ in 0..self.max_iterations {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for branch in frontier {
                if finished(&branch.last, self.mode) {
                    candidates.push(branch);
                    continue;
                }
                let mut extended = false;
                let mut died = false;
                for rule in &rules {
                    if rule.smarts(&branch.last) < USABILITY_FLOOR {
                        continue;
                    }
                    match rule.execute(&branch.last) {
                        Ok(step) => {
                            if seen.insert(step.result().to_string()) {
                                let mut grown = branch.clone();
                                grown.add_step(step);
                                next.push(grown);
                                extended = true;
                            }
                        },
                        Err(error) => {
                            died = true;
                            failure = Some(error);
                        },
                    }
                }
                // a trace nothing extends has settled, unless a rule died trying
                if !extended && !died {
                    candidates.push(branch);
                }
            }
            frontier = next;
        }
        candidates.extend(frontier);

        let mode = self.mode;
        candidates
            .into_iter()
            .min_by_key(|trace| {
                (
                    !finished(&trace.last, mode),
                    trace.total_difficulty(),
                    trace.steps.len(),
                    trace.last.to_string(),
                )
            })
            .ok_or_else(|| {
                failure.unwrap_or_else(|| Error::new(vec![0..0], kind::NothingToSolve))
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::parse_algebra;

    fn run(source: &str, mode: Mode) -> Solution {
        let algebra = parse_algebra(source).unwrap();
        Solver::new(mode, RoundingRule::Scientific).solve(algebra).unwrap()
    }

    #[test]
    fn arithmetic_on_one_side_combines() {
        let solution = run("2+2=x", Mode::Solve);
        assert_eq!(solution.last.to_string(), "4=x");
        assert_eq!(solution.steps.len(), 1);
    }

    #[test]
    fn like_terms_simplify_without_crossing_the_equals() {
        let solution = run("5x+7-3x", Mode::Simplify);
        assert_eq!(solution.last.to_string(), "2x+7");
    }

    #[test]
    fn a_linear_equation_solves_end_to_end() {
        let solution = run("2x=4", Mode::Solve);
        assert_eq!(solution.last.to_string(), "x=2");
        assert_eq!(solution.steps.len(), 2);
    }

    #[test]
    fn constants_cross_and_combine() {
        let solution = run("x+2=4", Mode::Solve);
        assert_eq!(solution.last.to_string(), "x=2");
    }

    #[test]
    fn a_fraction_side_multiplies_across() {
        let solution = run("(x)/(3)=4", Mode::Solve);
        assert_eq!(solution.last.to_string(), "x=12");
    }

    #[test]
    fn a_reduced_fraction_settles_where_it_is() {
        let solution = run("(1)/(3)", Mode::Simplify);
        assert_eq!(solution.last.to_string(), "(1)/(3)");
        assert!(solution.steps.is_empty());
    }

    #[test]
    fn solving_needs_an_equation() {
        let algebra = parse_algebra("2x+7").unwrap();
        let result = Solver::new(Mode::Solve, RoundingRule::Scientific).solve(algebra);
        assert!(result.is_err());
    }

    #[test]
    fn a_division_by_zero_surfaces_when_every_trace_dies() {
        let algebra = parse_algebra("(1)/(0)").unwrap();
        let result = Solver::new(Mode::Simplify, RoundingRule::Scientific).solve(algebra);
        assert!(result.is_err());
    }

    #[test]
    fn solved_equations_are_left_untouched() {
        let solution = run("4=x", Mode::Solve);
        assert_eq!(solution.last.to_string(), "4=x");
        assert!(solution.steps.is_empty());
    }

    #[test]
    fn every_rule_scores_zero_on_a_finished_equation() {
        let rules = algorithm::registry(Mode::Solve, RoundingRule::Scientific);
        for source in ["4=x", "x=2", "x=x", "2x+1=2x+1"] {
            let algebra = parse_algebra(source).unwrap();
            for (i, rule) in rules.iter().enumerate() {
                assert_eq!(rule.smarts(&algebra), 0, "rule {i} should skip {source}");
            }
        }
    }

    #[test]
    fn unknowns_on_both_sides_gather_and_solve() {
        let solution = run("2x=3x+1", Mode::Solve);
        assert_eq!(solution.last.to_string(), "x=-1");
    }
}
