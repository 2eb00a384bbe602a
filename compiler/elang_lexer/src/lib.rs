//! Lexer for elang using logos.
//!
//! Produces a [`TokenList`] terminated by an end-of-file token. Every token
//! records its byte span and its 1-based line; string literal spans include
//! the quotes. The first unrecognized character or unterminated string ends
//! lexing with a [`LexError`].

mod lex_error;

use logos::Logos;
use tracing::{debug, trace};

use elang_ir::{Span, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[regex("[A-Za-z]+")]
    Word,

    #[regex("[0-9]+")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    String,

    /// Opening quote with no closing quote before the line ends.
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    #[token("==")]
    #[token("::")]
    Punct2,

    #[regex(r"[-+*/%(),<>&|{}!=:]")]
    Punct,
}

/// The part of `source` the lexer sees: everything before the first NUL.
pub fn effective_source(source: &str) -> &str {
    match memchr::memchr(0, source.as_bytes()) {
        Some(end) => &source[..end],
        None => source,
    }
}

/// Lex source code into a `TokenList`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::new(LexErrorKind::SourceTooLarge, Span::DUMMY, 1));
    }
    let source = effective_source(source);

    let mut result = TokenList::with_capacity(source.len() / 4 + 1);
    let mut logos = RawToken::lexer(source);
    let mut line: u32 = 1;

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let kind = match token_result {
            Ok(RawToken::Newline) => {
                line += 1;
                continue;
            }
            Ok(RawToken::UnterminatedString) => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span, line));
            }
            Ok(raw) => convert_token(raw, slice),
            Err(()) => None,
        };
        let Some(kind) = kind else {
            return Err(LexError::new(LexErrorKind::UnknownToken, span, line));
        };

        trace!(?kind, line, text = slice, "token");
        result.push(Token::new(kind, span, line));
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof, line));
    debug!(tokens = result.len(), lines = line, "lexed source");

    Ok(result)
}

/// Map a raw token to its `TokenKind`.
fn convert_token(raw: RawToken, slice: &str) -> Option<TokenKind> {
    let bytes = slice.as_bytes();
    match raw {
        RawToken::Word => Some(TokenKind::keyword(slice).unwrap_or(TokenKind::Identifier)),
        RawToken::Number => Some(TokenKind::Number),
        RawToken::String => Some(TokenKind::String),
        RawToken::Punct2 => match bytes {
            [first, second] => TokenKind::punct2(*first, *second),
            _ => None,
        },
        RawToken::Punct => bytes.first().copied().and_then(TokenKind::punct),
        RawToken::Newline | RawToken::UnterminatedString => None,
    }
}
