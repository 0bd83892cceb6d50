//! Error kinds raised while rewriting, beyond the parse errors the parser crate already reports.

pub use stepsolve_error::Error;

pub mod kind {
    use ariadne::Fmt;
    use stepsolve_attrs::ErrorKind;
    use stepsolve_error::{ErrorKind, MATH};

    /// A rewrite divided by a numeral equal to zero. Fatal to the rewrite that triggered it; the
    /// solver abandons that line of work and continues with the others.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "cannot divide by zero",
        labels = ["this denominator is zero"],
        help = format!("a {} with a denominator of zero has no value", "fraction".fg(MATH)),
    )]
    pub struct DivisionByZero;

    /// The input parsed, but is neither an equation nor a lone particle the requested mode can
    /// work on.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "nothing to solve",
        labels = ["this input"],
        help = "solving needs an equation; simplifying needs an equation or an expression",
    )]
    pub struct NothingToSolve;
}
