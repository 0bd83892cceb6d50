//! Error kinds reported while parsing algebraic notation. All of them are fatal to the parse that
//! raised them; the parser never retries after reporting one.

pub use stepsolve_error::Error;

/// The kinds of errors that can occur while parsing.
pub mod kind {
    use ariadne::Fmt;
    use stepsolve_attrs::ErrorKind;
    use stepsolve_error::{ErrorKind, MATH};

    /// A character the tokenizer does not recognize.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unrecognized character",
        labels = ["this character is not part of algebraic notation"],
    )]
    pub struct UnknownCharacter;

    /// The input (or a bracketed group inside it) was empty.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "empty expression",
        labels = [format!("I expected to see an {} here", "expression".fg(MATH))],
    )]
    pub struct EmptyInput;

    /// One side of an equation was empty.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "equation side is empty",
        labels = [format!("there is no {} on one side of this `=`", "expression".fg(MATH))],
    )]
    pub struct EmptyOperand;

    /// The input contained more than one `=`.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "more than one `=` in equation",
        labels = ["this `=` is one too many"],
        help = "an equation has exactly one left side and one right side",
    )]
    pub struct MultipleEquals;

    /// No variant of the grammar could consume the input.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "malformed algebraic notation",
        labels = ["I could not understand this"],
    )]
    pub struct Unparsable;
}
