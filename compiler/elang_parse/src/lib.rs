//! Recursive descent parser for elang.
//!
//! Consumes the lexer's [`TokenList`] and builds a flat [`Module`]. Names and
//! string literals become [`StrView`]s into the arena holding the source, so
//! the parser itself allocates nothing but node storage.
//!
//! Expression tiers, tightest first:
//!
//! | Tier | Forms |
//! |---|---|
//! | factor | literals, identifiers, calls, `( expression )`, unary `-` |
//! | term | `* / %`, left-associative |
//! | expression | `+ -`, left-associative |
//! | conditional factor | `( condition )`, or expression `[< > ==] expression` |
//! | condition | `and`/`or`, left-associative, one shared level |
//!
//! Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;

use elang_ir::{Module, Span, StrView, Token, TokenKind, TokenList, ValueType};
use tracing::debug;

pub use error::{ParseError, ParseErrorKind};

use cursor::Cursor;

/// Parse a whole file.
///
/// `source` is the text the tokens were lexed from and `origin` is a view of
/// that same text in its arena; token spans are turned into sub-views of
/// `origin`.
pub fn parse(tokens: &TokenList, source: &str, origin: StrView) -> Result<Module, ParseError> {
    let mut parser = Parser::new(tokens, source, origin);
    parser.parse_module()?;
    debug!(
        nodes = parser.module.node_count(),
        items = parser.module.items().len(),
        "parsed module"
    );
    Ok(parser.module)
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    origin: StrView,
    module: Module,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList, source: &'a str, origin: StrView) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
            origin,
            module: Module::new(),
        }
    }

    /// View of the text under `span`.
    fn view(&self, span: Span) -> StrView {
        self.origin.slice(span.start as usize, span.len() as usize)
    }

    /// Text under `span`.
    fn text(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or_default()
    }

    /// Consume a token of the given kind or fail.
    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if let Some(token) = self.cursor.accept(kind) {
            return Ok(token);
        }
        let found = self.cursor.current();
        if found.kind == TokenKind::Eof {
            return Err(self.error_at(ParseErrorKind::UnexpectedEof, found));
        }
        Err(self.error_at(
            ParseErrorKind::UnexpectedToken {
                expected: kind,
                found: found.kind,
            },
            found,
        ))
    }

    /// Consume a type name.
    fn expect_type(&mut self) -> Result<ValueType, ParseError> {
        let token = self.cursor.current();
        let ty = match token.kind {
            TokenKind::IntType => ValueType::Int,
            TokenKind::StringType => ValueType::String,
            TokenKind::BoolType => ValueType::Bool,
            TokenKind::VoidType => ValueType::Void,
            TokenKind::Eof => return Err(self.error_at(ParseErrorKind::UnexpectedEof, token)),
            found => return Err(self.error_at(ParseErrorKind::InvalidTypeName { found }, token)),
        };
        self.cursor.advance();
        Ok(ty)
    }

    fn error_at(&self, kind: ParseErrorKind, token: &Token) -> ParseError {
        ParseError::new(kind, token.span, token.line)
    }

    /// Error at the current token, or end-of-file if there is none.
    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let token = self.cursor.current();
        if token.kind == TokenKind::Eof {
            self.error_at(ParseErrorKind::UnexpectedEof, token)
        } else {
            self.error_at(kind, token)
        }
    }
}
