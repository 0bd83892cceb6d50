//! One rewrite's worth of work, and the trace a solve builds out of them.

use crate::render;
use std::fmt;
use stepsolve_parser::particle::{Algebra, Particle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One piece of a step's explanation: literal text or an embedded particle, so a display layer
/// can render the particles in math notation inside the sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Snippet {
    Text(String),
    Math(Particle),
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snippet::Text(text) => write!(f, "{text}"),
            Snippet::Math(particle) => write!(f, "{}", render::cached(particle)),
        }
    }
}

/// One application of a rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The whole value after each stage of the rewrite. Normally one; a cancellation that both
    /// strikes factors and reduces the leftover numerals shows its work in two.
    pub stages: Vec<Algebra>,

    /// The explanation of the rewrite, mixing text and particles.
    pub explanation: Vec<Snippet>,

    /// How hard this step is for a student, 0 (trivial) to 9.
    pub difficulty: u8,
}

impl Step {
    pub fn new(stages: Vec<Algebra>, explanation: Vec<Snippet>, difficulty: u8) -> Step {
        debug_assert!(!stages.is_empty());
        Step { stages, explanation, difficulty }
    }

    /// The value this step leaves behind.
    pub fn result(&self) -> &Algebra {
        self.stages.last().unwrap_or_else(|| unreachable!())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for snippet in &self.explanation {
            snippet.fmt(f)?;
        }
        Ok(())
    }
}

/// A full trace from an original input to its final form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The input as parsed, before any step.
    pub original: Algebra,

    /// The steps applied, in order.
    pub steps: Vec<Step>,

    /// The value after the last step; the original when there are none.
    pub last: Algebra,
}

impl Solution {
    pub fn new(original: Algebra) -> Solution {
        Solution {
            last: original.clone(),
            original,
            steps: Vec::new(),
        }
    }

    /// Appends a step and re-derives the final value from its last stage.
    pub fn add_step(&mut self, step: Step) {
        self.last = step.result().clone();
        self.steps.push(step);
    }

    /// The summed difficulty of every step, the solver's primary ranking key.
    pub fn total_difficulty(&self) -> u32 {
        self.steps.iter().map(|step| u32::from(step.difficulty)).sum()
    }
}
