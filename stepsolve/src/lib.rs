//! Solves and simplifies algebra step by step, showing its work.
//!
//! The input is plain text in the notation a student would write: `2x+7=(1)/(2)`, with fractions
//! always parenthesized, `√` for roots, and superscript digits for exponents. [`solve`] parses it
//! and works it to its final form, producing a [`Solution`] whose [`Step`]s each carry the whole
//! value after the rewrite and a human-readable explanation of what was done and why.
//!
//! ```
//! use stepsolve::{solve, Mode, RoundingRule};
//!
//! let solution = solve("2x=4", Mode::Solve, RoundingRule::Scientific)?;
//! assert_eq!(solution.last.to_string(), "x=2");
//! for step in &solution.steps {
//!     println!("{step}");
//! }
//! # Ok::<(), stepsolve::Error>(())
//! ```

pub use stepsolve_error::Error;
pub use stepsolve_parser::particle::{Algebra, Equation, Particle};
pub use stepsolve_solve::{Mode, RoundingRule, Snippet, Solution, Step};

use stepsolve_parser::particle::parse_algebra;
use stepsolve_solve::Solver;

/// Parses the input and works it to its final form under the given mode and rounding rule.
pub fn solve(text: &str, mode: Mode, rounding: RoundingRule) -> Result<Solution, Error> {
    let algebra = parse_algebra(text)?;
    Solver::new(mode, rounding).solve(algebra)
}
