use crate::tokenizer::{Token, TokenKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A one-letter variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// The variable's letter, in either case. `x` and `X` are distinct variables.
    pub letter: char,

    /// Whether the variable is positive.
    pub sign: bool,

    /// The power the variable is raised to, at least 1.
    pub exponent: u32,
}

impl Variable {
    pub fn new(letter: char) -> Variable {
        Variable { letter, sign: true, exponent: 1 }
    }

    pub(crate) fn recognize(tokens: &[Token]) -> Option<Variable> {
        match tokens {
            [token] if token.kind == TokenKind::Letter => {
                Some(Variable::new(token.lexeme.chars().next()?))
            },
            _ => None,
        }
    }

    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        if self.exponent > 1 {
            crate::script::write_superscript(f, self.exponent as i64)?;
        }
        Ok(())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.sign {
            write!(f, "-")?;
        }
        self.fmt_body(f)
    }
}
