//! Step-by-step rewriting for parsed algebra.
//!
//! The parser crate turns text into [`Algebra`](stepsolve_parser::particle::Algebra); this crate
//! works that value toward its final form one visible [`Step`] at a time, the way the work would
//! be written out by hand. Each rewrite rule is an [`Algorithm`](algorithm::Algorithm); the
//! [`Solver`] drives them and keeps the cheapest trace.
//!
//! ```
//! use stepsolve_parser::particle::parse_algebra;
//! use stepsolve_solve::{algorithm::Mode, arithmetic::RoundingRule, Solver};
//!
//! let algebra = parse_algebra("2x=4")?;
//! let solution = Solver::new(Mode::Solve, RoundingRule::Scientific).solve(algebra)?;
//! assert_eq!(solution.last.to_string(), "x=2");
//! # Ok::<(), stepsolve_solve::Error>(())
//! ```

pub mod algorithm;
pub mod arithmetic;
pub mod error;
pub mod render;
pub mod solver;
pub mod step;
pub mod tree;

pub use algorithm::Mode;
pub use arithmetic::RoundingRule;
pub use error::Error;
pub use solver::Solver;
pub use step::{Snippet, Solution, Step};
pub use tree::Tree;
