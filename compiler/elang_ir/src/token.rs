//! Token types produced by the lexer.


use std::fmt;

use crate::Span;

/// Lexical category of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Identifier,
    Number,
    /// String literal, quotes included in the span.
    String,

    // Keywords
    Var,
    Const,
    True,
    False,
    If,
    Else,
    While,
    And,
    Or,
    Fun,
    Return,
    StringType,
    IntType,
    BoolType,
    VoidType,
    Import,
    Extern,

    // Single-character punctuation
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
    Lt,
    Gt,
    Ampersand,
    Pipe,
    LBrace,
    RBrace,
    Bang,
    Eq,
    Colon,

    // Double-character punctuation
    EqEq,
    DoubleColon,

    Eof,
}

impl TokenKind {
    /// Keyword table, matched against whole identifiers.
    pub const KEYWORDS: &'static [(&'static str, TokenKind)] = &[
        ("var", TokenKind::Var),
        ("const", TokenKind::Const),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("while", TokenKind::While),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("fun", TokenKind::Fun),
        ("return", TokenKind::Return),
        ("string", TokenKind::StringType),
        ("int", TokenKind::IntType),
        ("bool", TokenKind::BoolType),
        ("void", TokenKind::VoidType),
        ("import", TokenKind::Import),
        ("extern", TokenKind::Extern),
    ];

    /// Look up a keyword by its exact, case-sensitive spelling.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Self::KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|&(_, kind)| kind)
    }

    /// Single-character punctuation.
    pub fn punct(byte: u8) -> Option<TokenKind> {
        Some(match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'&' => TokenKind::Ampersand,
            b'|' => TokenKind::Pipe,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'!' => TokenKind::Bang,
            b'=' => TokenKind::Eq,
            b':' => TokenKind::Colon,
            _ => return None,
        })
    }

    /// Double-character punctuation.
    pub fn punct2(first: u8, second: u8) -> Option<TokenKind> {
        match (first, second) {
            (b'=', b'=') => Some(TokenKind::EqEq),
            (b':', b':') => Some(TokenKind::DoubleColon),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        Self::KEYWORDS.iter().any(|&(_, kind)| kind == self)
    }

    /// Human-readable name used in dumps.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string literal",
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Fun => "fun",
            TokenKind::Return => "return",
            TokenKind::StringType => "string",
            TokenKind::IntType => "int",
            TokenKind::BoolType => "bool",
            TokenKind::VoidType => "void",
            TokenKind::Import => "import",
            TokenKind::Extern => "extern",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Bang => "!",
            TokenKind::Eq => "=",
            TokenKind::Colon => ":",
            TokenKind::EqEq => "==",
            TokenKind::DoubleColon => "::",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Token { kind, span, line }
    }

    /// Source text covered by this token.
    ///
    /// Empty for spans that fall outside `source`.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or_default()
    }
}

/// Ordered tokens of one source file, always ending in [`TokenKind::Eof`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The last token, which is the end-of-file marker for lexer output.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
