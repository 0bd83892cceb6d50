//! The closed set of algebraic values and the disambiguating parser that produces them.
//!
//! # Grammar ambiguity
//!
//! Algebraic notation is ambiguous at the substring level: a bare numeral can be a whole number,
//! the coefficient of a term, or one side of a fraction, and nothing but context decides which.
//! [`parse_tokens`] resolves this by trying each variant's recognizer in a fixed precedence order
//! (variable, number, root, fraction, mixed number, term, expression) and letting the first match
//! win. Container recognizers recurse into [`parse_tokens`] for their pieces, so the grammar is
//! mutually recursive.
//!
//! # The `excluded` set
//!
//! Mutual recursion alone would not terminate: a term trying to parse a piece that happens to be
//! its entire input would try to parse a term again, forever. Recognizers therefore thread an
//! [`Exclusions`] bitset through recursive calls naming the variants that must not be retried.
//! The set is reset to empty the moment a layer of brackets is consumed, because bracket removal
//! strictly shrinks the input and therefore is always progress.
//!
//! # Signs and exponents
//!
//! Every particle carries a sign and an integer exponent (both defaulting to positive / 1). The
//! parser extracts a leading sign and a trailing superscript run before trying the recognizers,
//! except when the input splits into a sum at bracket depth zero: in that case the leading sign
//! belongs to the first term of the expression and a trailing superscript belongs to its last
//! term, so both are left in place.

pub mod equation;
pub mod expression;
pub mod fraction;
pub mod mixed_number;
pub mod number;
pub mod root;
pub mod term;
pub mod variable;

use crate::error::kind;
use crate::tokenizer::{self, Token, TokenKind};
use std::fmt;
use std::ops::{BitOr, Range};
use stepsolve_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use equation::{parse_algebra, Algebra, Equation};
pub use expression::Expression;
pub use fraction::Fraction;
pub use mixed_number::MixedNumber;
pub use number::Number;
pub use root::Root;
pub use term::Term;
pub use variable::Variable;

/// A set of [`Particle`] variants that the parser must not try, used to break infinite mutual
/// recursion between the container recognizers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exclusions(u8);

impl Exclusions {
    pub const NONE: Exclusions = Exclusions(0);
    pub const VARIABLE: Exclusions = Exclusions(1);
    pub const NUMBER: Exclusions = Exclusions(1 << 1);
    pub const ROOT: Exclusions = Exclusions(1 << 2);
    pub const FRACTION: Exclusions = Exclusions(1 << 3);
    pub const MIXED_NUMBER: Exclusions = Exclusions(1 << 4);
    pub const TERM: Exclusions = Exclusions(1 << 5);
    pub const EXPRESSION: Exclusions = Exclusions(1 << 6);

    /// Returns true if every variant in `other` is excluded by `self`.
    pub fn contains(self, other: Exclusions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Exclusions {
    type Output = Exclusions;

    fn bitor(self, rhs: Exclusions) -> Exclusions {
        Exclusions(self.0 | rhs.0)
    }
}

/// An algebraic value: one node of the syntax tree produced by the parser.
///
/// The set of variants is closed; every operation over particles matches exhaustively, so adding
/// a variant forces every operation to handle it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Particle {
    /// A one-letter variable, such as `x`.
    Variable(Variable),

    /// A decimal numeral, possibly in scientific notation.
    Number(Number),

    /// A root of some degree, such as `√2` or `₃√(x+1)`.
    Root(Root),

    /// A fraction, such as `(2)/(3x)`.
    Fraction(Fraction),

    /// A whole numeral combined with a constant fraction, such as `1(2)/(3)`.
    MixedNumber(MixedNumber),

    /// Two or more particles multiplied by juxtaposition, such as `2xy`.
    Term(Term),

    /// Two or more particles added or subtracted, such as `2x+7`.
    Expression(Expression),
}

impl Particle {
    /// The sign of this particle. `true` is positive.
    pub fn sign(&self) -> bool {
        match self {
            Particle::Variable(v) => v.sign,
            Particle::Number(n) => n.sign,
            Particle::Root(r) => r.sign,
            Particle::Fraction(fr) => fr.sign,
            Particle::MixedNumber(m) => m.sign,
            Particle::Term(t) => t.sign,
            Particle::Expression(e) => e.sign,
        }
    }

    /// The exponent of this particle, at least 1.
    pub fn exponent(&self) -> u32 {
        match self {
            Particle::Variable(v) => v.exponent,
            Particle::Number(n) => n.exponent,
            Particle::Root(r) => r.exponent,
            Particle::Fraction(fr) => fr.exponent,
            Particle::MixedNumber(m) => m.exponent,
            Particle::Term(t) => t.exponent,
            Particle::Expression(e) => e.exponent,
        }
    }

    /// Returns a copy of this particle with the given sign.
    pub fn with_sign(&self, sign: bool) -> Particle {
        let mut particle = self.clone();
        particle.set_sign(sign);
        particle
    }

    /// Returns a copy of this particle with the given exponent.
    pub fn with_exponent(&self, exponent: u32) -> Particle {
        let mut particle = self.clone();
        particle.set_exponent(exponent);
        particle
    }

    pub(crate) fn set_sign(&mut self, sign: bool) {
        match self {
            Particle::Variable(v) => v.sign = sign,
            Particle::Number(n) => n.sign = sign,
            Particle::Root(r) => r.sign = sign,
            Particle::Fraction(fr) => fr.sign = sign,
            Particle::MixedNumber(m) => m.sign = sign,
            Particle::Term(t) => t.sign = sign,
            Particle::Expression(e) => e.sign = sign,
        }
    }

    pub(crate) fn set_exponent(&mut self, exponent: u32) {
        match self {
            Particle::Variable(v) => v.exponent = exponent,
            Particle::Number(n) => n.exponent = exponent,
            Particle::Root(r) => r.exponent = exponent,
            Particle::Fraction(fr) => fr.exponent = exponent,
            Particle::MixedNumber(m) => m.exponent = exponent,
            Particle::Term(t) => t.exponent = exponent,
            Particle::Expression(e) => e.exponent = exponent,
        }
    }

    /// The particle's direct algebraic children, in rendering order. Variables, numbers and mixed
    /// numbers are leaves.
    pub fn children(&self) -> Vec<&Particle> {
        match self {
            Particle::Variable(_) | Particle::Number(_) | Particle::MixedNumber(_) => Vec::new(),
            Particle::Root(r) => vec![&r.radicand],
            Particle::Fraction(fr) => vec![&fr.top, &fr.bottom],
            Particle::Term(t) => t.factors.iter().collect(),
            Particle::Expression(e) => e.terms.iter().collect(),
        }
    }

    /// Rebuilds this particle with a new list of direct children, preserving its own sign and
    /// exponent. A term or expression left with a single child collapses to that child with the
    /// container's sign and exponent folded in.
    ///
    /// The length of `children` must match the shape of the particle.
    pub fn with_children(&self, mut children: Vec<Particle>) -> Particle {
        match self {
            Particle::Variable(_) | Particle::Number(_) | Particle::MixedNumber(_) => {
                debug_assert!(children.is_empty());
                self.clone()
            },
            Particle::Root(r) => {
                debug_assert_eq!(children.len(), 1);
                Particle::Root(Root {
                    degree: r.degree,
                    radicand: Box::new(children.pop().unwrap()),
                    sign: r.sign,
                    exponent: r.exponent,
                })
            },
            Particle::Fraction(fr) => {
                debug_assert_eq!(children.len(), 2);
                let bottom = children.pop().unwrap();
                let top = children.pop().unwrap();
                Particle::Fraction(Fraction {
                    top: Box::new(top),
                    bottom: Box::new(bottom),
                    sign: fr.sign,
                    exponent: fr.exponent,
                })
            },
            Particle::Term(t) => Term::build(children, t.sign, t.exponent),
            Particle::Expression(e) => Expression::build(children, e.sign, e.exponent),
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Particle::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_fraction(&self) -> Option<&Fraction> {
        match self {
            Particle::Fraction(fr) => Some(fr),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Particle::Term(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Particle::Expression(e) => Some(e),
            _ => None,
        }
    }

    /// Folds an enclosing sign and exponent into this particle: a negative enclosing sign flips
    /// the particle's sign, and the enclosing exponent multiplies its exponent.
    pub(crate) fn fold_enclosing(&mut self, sign: bool, exponent: u32) {
        if !sign {
            let flipped = !self.sign();
            self.set_sign(flipped);
        }
        if exponent != 1 {
            let combined = self.exponent().saturating_mul(exponent);
            self.set_exponent(combined);
        }
    }

    /// Writes this particle without its leading sign. Expressions are parenthesized, since a
    /// bare sum is never a self-delimiting operand.
    pub(crate) fn fmt_magnitude(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Particle::Variable(v) => v.fmt_body(f),
            Particle::Number(n) => n.fmt_body(f),
            Particle::Root(r) => r.fmt_body(f),
            Particle::Fraction(fr) => fr.fmt_body(f),
            Particle::MixedNumber(m) => m.fmt_body(f),
            Particle::Term(t) => t.fmt_body(f),
            Particle::Expression(e) => {
                write!(f, "(")?;
                e.fmt_terms(f)?;
                write!(f, ")")?;
                if e.exponent > 1 {
                    crate::script::write_superscript(f, e.exponent as i64)?;
                }
                Ok(())
            },
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Particle::Variable(v) => v.fmt(f),
            Particle::Number(n) => n.fmt(f),
            Particle::Root(r) => r.fmt(f),
            Particle::Fraction(fr) => fr.fmt(f),
            Particle::MixedNumber(m) => m.fmt(f),
            Particle::Term(t) => t.fmt(f),
            Particle::Expression(e) => e.fmt(f),
        }
    }
}

/// Parses a particle from the given source text, failing if no variant not in `excluded` can
/// consume the entire input.
pub fn parse(source: &str, excluded: Exclusions) -> Result<Particle, Error> {
    let tokens = tokenizer::tokenize_complete(source)?;
    if tokens.is_empty() {
        return Err(Error::new(vec![0..source.len()], kind::EmptyInput));
    }
    parse_tokens(&tokens, excluded)
}

/// Returns true if [`parse`] would succeed on the given source text. The two can never disagree:
/// this is a thin wrapper over [`parse`] itself.
pub fn is_parsable(source: &str, excluded: Exclusions) -> bool {
    parse(source, excluded).is_ok()
}

/// Returns the source span covered by the given tokens.
pub(crate) fn span_of(tokens: &[Token]) -> Range<usize> {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.start..last.span.end,
        _ => 0..0,
    }
}

/// Parses a particle from a token slice. This is the disambiguation core: every recognizer
/// recurses back into this function for its pieces.
pub(crate) fn parse_tokens(tokens: &[Token], excluded: Exclusions) -> Result<Particle, Error> {
    let full_span = span_of(tokens);
    let mut tokens = tokens;
    let mut excluded = excluded;
    let mut sign = true;
    let mut exponent: u32 = 1;
    let mut bracketed = false;

    loop {
        if tokens.is_empty() {
            return Err(Error::new(vec![full_span], kind::EmptyInput));
        }

        // a depth-zero sum: the leading sign and trailing superscript belong to its terms
        if !expression_splits(tokens).is_empty() {
            break;
        }

        if let Some(inner) = strip_brackets(tokens) {
            // brackets open a fresh grammar context
            tokens = inner;
            excluded = Exclusions::NONE;
            bracketed = true;
            continue;
        }

        if matches!(tokens[0].kind, TokenKind::Plus | TokenKind::Minus) {
            if tokens[0].kind == TokenKind::Minus {
                sign = !sign;
            }
            tokens = &tokens[1..];
            continue;
        }

        if let Some((rest, exp)) = strip_exponent(tokens) {
            exponent = exponent.saturating_mul(exp);
            tokens = rest;
            continue;
        }

        break;
    }

    let particle = 'recognized: {
        if !excluded.contains(Exclusions::VARIABLE) {
            if let Some(v) = Variable::recognize(tokens) {
                break 'recognized Particle::Variable(v);
            }
        }
        if !excluded.contains(Exclusions::NUMBER) {
            if let Some(n) = Number::recognize(tokens) {
                break 'recognized Particle::Number(n);
            }
        }
        if !excluded.contains(Exclusions::ROOT) {
            if let Some(r) = Root::recognize(tokens) {
                break 'recognized Particle::Root(r);
            }
        }
        if !excluded.contains(Exclusions::FRACTION) {
            if let Some(fr) = Fraction::recognize(tokens) {
                break 'recognized Particle::Fraction(fr);
            }
        }
        if !excluded.contains(Exclusions::MIXED_NUMBER) {
            if let Some(m) = MixedNumber::recognize(tokens) {
                break 'recognized Particle::MixedNumber(m);
            }
        }
        if !excluded.contains(Exclusions::TERM) {
            if let Some(t) = Term::recognize(tokens) {
                break 'recognized Particle::Term(t);
            }
        }
        if !excluded.contains(Exclusions::EXPRESSION) {
            if let Some(e) = Expression::recognize(tokens) {
                break 'recognized Particle::Expression(e);
            }
        }
        return Err(Error::new(vec![full_span], kind::Unparsable));
    };

    // scientific notation already owns the superscript position of a number
    if exponent != 1 {
        if let Particle::Number(n) = &particle {
            if n.sci_exponent.is_some() {
                return Err(Error::new(vec![full_span], kind::Unparsable));
            }
        }
    }

    let mut particle = particle;
    if bracketed || !matches!(particle, Particle::Expression(_)) {
        particle.set_sign(sign);
        particle.set_exponent(exponent);
    } else {
        // an unbracketed expression was matched against the sign-preserved input, so there is
        // nothing extracted to write back
        debug_assert!(sign && exponent == 1);
    }

    Ok(particle)
}

/// For each `√` token, the index of the `^` that closes it, and vice versa; `None` everywhere
/// else. A caret closes the innermost open radical; a closing bracket implicitly closes every
/// radical opened inside it, leaving those radicals (and stray carets) unpaired.
pub(crate) fn radical_pairs(tokens: &[Token]) -> Vec<Option<usize>> {
    enum Group {
        Bracket,
        Radical(usize),
    }

    let mut pairs = vec![None; tokens.len()];
    let mut stack: Vec<Group> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            kind if kind.is_open_bracket() => stack.push(Group::Bracket),
            kind if kind.is_close_bracket() => {
                while let Some(group) = stack.pop() {
                    if matches!(group, Group::Bracket) {
                        break;
                    }
                }
            },
            TokenKind::Radical => stack.push(Group::Radical(i)),
            TokenKind::Caret => {
                if let Some(Group::Radical(j)) = stack.last() {
                    pairs[*j] = Some(i);
                    pairs[i] = Some(*j);
                    stack.pop();
                }
            },
            _ => {},
        }
    }
    pairs
}

/// The group depth before each token, with one extra entry for the depth after the last. The
/// three bracket kinds always count; a `√…^` pairing counts only when both halves are present,
/// since an unclosed radical cannot enclose anything past its single-particle radicand.
pub(crate) fn token_depths(tokens: &[Token]) -> Vec<i32> {
    let pairs = radical_pairs(tokens);
    let mut depths = Vec::with_capacity(tokens.len() + 1);
    let mut depth = 0i32;
    for (i, token) in tokens.iter().enumerate() {
        depths.push(depth);
        match token.kind {
            kind if kind.is_open_bracket() => depth += 1,
            kind if kind.is_close_bracket() => depth = (depth - 1).max(0),
            TokenKind::Radical | TokenKind::Caret if pairs[i].is_some() => {
                if token.kind == TokenKind::Radical {
                    depth += 1;
                } else {
                    depth -= 1;
                }
            },
            _ => {},
        }
    }
    depths.push(depth);
    depths
}

/// If the tokens are fully enclosed by one pair of brackets, returns the tokens inside them.
///
/// Only the three interchangeable bracket pairs are stripped here; a `√…^` pair is a root,
/// which [`Root::recognize`] handles.
pub(crate) fn strip_brackets<'a, 'source>(
    tokens: &'a [Token<'source>],
) -> Option<&'a [Token<'source>]> {
    if tokens.len() < 2 || !tokens[0].kind.is_open_bracket() {
        return None;
    }
    let last = tokens.last()?;
    if !last.kind.is_close_bracket() {
        return None;
    }

    // the opening bracket's group must extend to the very end
    let depths = token_depths(tokens);
    let inside = &depths[1..tokens.len()];
    if inside.iter().all(|&depth| depth > 0) && depths[tokens.len()] == 0 {
        Some(&tokens[1..tokens.len() - 1])
    } else {
        None
    }
}

/// If the tokens end with a superscript run that is a plain particle exponent, returns the tokens
/// without it and the decoded exponent.
///
/// The run is left in place when it is the power of ten of a scientific-notation numeral (it
/// directly follows `×10`), when it is signed, or when it decodes to zero (no particle may have
/// an exponent below 1).
fn strip_exponent<'a, 'source>(tokens: &'a [Token<'source>]) -> Option<(&'a [Token<'source>], u32)> {
    if tokens.len() < 2 {
        return None;
    }
    let last = tokens.last()?;
    if last.kind != TokenKind::Superscript {
        return None;
    }
    if tokens[tokens.len() - 2].kind == TokenKind::Times10 {
        return None;
    }
    let exponent = crate::script::superscript_to_u32(last.lexeme)?;
    if exponent == 0 {
        return None;
    }
    Some((&tokens[..tokens.len() - 1], exponent))
}

/// Returns the indices of every `+` or `-` token that separates two terms of a sum at bracket
/// depth zero. A sign at the very start, or one directly following another operator, belongs to
/// the operand after it and is not a split point.
pub(crate) fn expression_splits(tokens: &[Token]) -> Vec<usize> {
    let depths = token_depths(tokens);
    tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| {
            if *i == 0
                || depths[*i] != 0
                || !matches!(token.kind, TokenKind::Plus | TokenKind::Minus)
            {
                return false;
            }
            // a sign after another operator belongs to the operand that follows it
            !matches!(
                tokens[*i - 1].kind,
                TokenKind::Plus | TokenKind::Minus | TokenKind::Slash | TokenKind::Times10,
            )
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn variable(letter: char) -> Particle {
        Particle::Variable(Variable { letter, sign: true, exponent: 1 })
    }

    fn number(digits: &str) -> Particle {
        Particle::Number(Number {
            whole: digits.to_string(),
            decimal: None,
            sci_exponent: None,
            sign: true,
            exponent: 1,
        })
    }

    #[test]
    fn bare_variable() {
        assert_eq!(parse("x", Exclusions::NONE).unwrap(), variable('x'));
    }

    #[test]
    fn double_negation_cancels() {
        assert_eq!(parse("-(-x)", Exclusions::NONE).unwrap(), variable('x'));
    }

    #[test]
    fn exponent_of_one_is_default() {
        assert_eq!(
            parse("x¹", Exclusions::NONE).unwrap(),
            parse("x", Exclusions::NONE).unwrap(),
        );
    }

    #[test]
    fn coefficient_and_variable_is_a_term() {
        assert_eq!(
            parse("2x", Exclusions::NONE).unwrap(),
            Particle::Term(Term {
                factors: vec![number("2"), variable('x')],
                sign: true,
                exponent: 1,
            }),
        );
    }

    #[test]
    fn nested_exponents_multiply() {
        assert_eq!(
            parse("(x²)³", Exclusions::NONE).unwrap(),
            variable('x').with_exponent(6),
        );
    }

    #[test]
    fn bracket_kinds_are_interchangeable() {
        assert_eq!(
            parse("[x]", Exclusions::NONE).unwrap(),
            parse("{x}", Exclusions::NONE).unwrap(),
        );
    }

    #[test]
    fn trailing_superscript_of_sum_belongs_to_last_term() {
        let expr = parse("x+4²", Exclusions::NONE).unwrap();
        assert_eq!(
            expr,
            Particle::Expression(Expression {
                terms: vec![variable('x'), number("4").with_exponent(2)],
                sign: true,
                exponent: 1,
            }),
        );
    }

    #[test]
    fn bracketed_sum_owns_its_exponent() {
        let expr = parse("(x+4)²", Exclusions::NONE).unwrap();
        assert_eq!(expr.exponent(), 2);
        assert!(matches!(expr, Particle::Expression(_)));
    }

    #[test]
    fn leading_sign_of_sum_belongs_to_first_term() {
        let expr = parse("-x+4", Exclusions::NONE).unwrap();
        let Particle::Expression(e) = expr else { panic!("expected an expression") };
        assert!(e.sign);
        assert!(!e.terms[0].sign());
    }

    #[test]
    fn excluded_variant_is_skipped() {
        assert!(parse("x", Exclusions::VARIABLE).is_err());
        assert!(is_parsable("x", Exclusions::NONE));
        assert!(!is_parsable("x", Exclusions::VARIABLE));
    }

    #[test]
    fn unparsable_input() {
        assert!(parse("2x+", Exclusions::NONE).is_err());
        assert!(parse("", Exclusions::NONE).is_err());
        assert!(parse("()", Exclusions::NONE).is_err());
    }

    #[test]
    fn round_trip_samples() {
        for source in [
            "x",
            "-x",
            "2x",
            "2x+7",
            "-x+4",
            "3.5",
            "3×10⁴",
            "(2)/(2x)",
            "1(2)/(3)",
            "√2x",
            "₃√(x+1)",
            "2(x+4)",
            "(x+4)(x+6)",
            "x²+6x+4x+24",
            "5x+7-3x",
            "-(x+4)",
        ] {
            let parsed = parse(source, Exclusions::NONE).unwrap();
            let rendered = parsed.to_string();
            let reparsed = parse(&rendered, Exclusions::NONE).unwrap();
            assert_eq!(parsed, reparsed, "round trip failed for {source} (rendered {rendered})");
        }
    }
}
