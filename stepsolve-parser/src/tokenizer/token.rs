use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// Whitespace and commas (thousands separators) are skipped at the lexer level; they carry no
/// meaning in algebraic notation.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n,]+")]
pub enum TokenKind {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("=")]
    Equals,

    #[token("/")]
    Slash,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    /// The radical glyph, opening a root. Together with [`TokenKind::Caret`] it forms a bracket
    /// pair for the purposes of depth tracking.
    #[token("√")]
    Radical,

    /// Closes a radical opened by [`TokenKind::Radical`].
    #[token("^")]
    Caret,

    /// The scientific-notation marker. The superscript run that follows it is the power of ten.
    #[token("×10")]
    Times10,

    /// A run of superscript digits, optionally starting with a superscript sign.
    #[regex(r"[⁺⁻]?[⁰¹²³⁴⁵⁶⁷⁸⁹]+")]
    Superscript,

    /// A run of subscript digits, used for the degree of a root.
    #[regex(r"[₀₁₂₃₄₅₆₇₈₉]+")]
    Subscript,

    /// A run of decimal digits.
    #[regex(r"[0-9]+")]
    Digits,

    #[token(".")]
    Dot,

    /// A single letter. Variables are always one letter long, so letters never group.
    #[regex(r"[a-zA-Z]")]
    Letter,
}

impl TokenKind {
    /// Returns true if the token is an opening bracket. The radical glyph is not one: it only
    /// behaves like a bracket when a caret closes it, which the parser resolves separately.
    pub fn is_open_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenSquare | TokenKind::OpenCurly,
        )
    }

    /// Returns true if the token is a closing bracket.
    pub fn is_close_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseSquare | TokenKind::CloseCurly,
        )
    }
}

/// A token produced by the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'source> {
    /// The region of the source that this token was produced from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw text of the token.
    pub lexeme: &'source str,
}
