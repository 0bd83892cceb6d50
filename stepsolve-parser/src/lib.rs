//! A parser for hand-written algebra, producing the values the rewrite engine works over.
//!
//! The input notation is the one a student writes: implied multiplication (`2x`), superscript
//! exponents (`x²`), radical glyphs (`√2`, `₃√x`), mixed numbers (`1(2)/(3)`) and scientific
//! notation (`3×10⁴`). [`particle::parse_algebra`] parses a whole line into an
//! [`Algebra`](particle::Algebra); [`particle::parse`] parses a single
//! [`Particle`](particle::Particle).
//!
//! Rendering is the exact inverse of parsing: for every particle the parser or the rewrite
//! engine can produce, parsing its `Display` output gives the same particle back. The rewrite
//! engine leans on this to compare particles by their rendered text.
//!
//! ```
//! use stepsolve_parser::particle::{self, Exclusions};
//!
//! let particle = particle::parse("2x+7", Exclusions::NONE).unwrap();
//! assert_eq!(particle.to_string(), "2x+7");
//! ```

pub mod error;
pub mod particle;
pub mod tokenizer;

mod script;

pub use error::Error;
