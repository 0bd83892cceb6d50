pub mod token;

use crate::error::kind;
use logos::{Lexer, Logos};
use stepsolve_error::Error;
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows the
/// parser to backtrack while disambiguating the grammar.
///
/// Any character the tokenizer cannot recognize fails the whole tokenization with an error
/// pointing at that character.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, Error> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => return Err(Error::new(vec![lexer.span()], kind::UnknownCharacter)),
        }
    }

    Ok(tokens.into_boxed_slice())
}
