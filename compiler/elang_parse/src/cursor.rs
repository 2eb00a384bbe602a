//! Token cursor for navigating the token stream.
//!
//! Provides token access, one-token lookahead, and consumption. Reading past
//! the end yields an end-of-file token, so the parser never indexes out of
//! bounds even for a list without a trailing `Eof`.


use elang_ir::{Span, Token, TokenKind, TokenList};
use tracing::trace;

static EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::DUMMY, 0);

/// Cursor over a token list.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or_else(|| self.eof())
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it.
    ///
    /// The end-of-file token is never consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            trace!(pos = self.pos, kind = %token.kind, line = token.line, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// The end-of-file token, carrying the last real line number.
    fn eof(&self) -> &'a Token {
        match self.tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last,
            _ => &EOF_TOKEN,
        }
    }
}
