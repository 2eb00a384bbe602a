//! Statement and block parsing.

use elang_ir::{FunctionDecl, Mutability, NodeId, NodeKind, NodeRange, Param, TokenKind, ValueType};
use elang_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse statements until end of file. The final item is an `Eof` node.
    pub(crate) fn parse_module(&mut self) -> Result<(), ParseError> {
        loop {
            let item = self.parse_statement()?;
            self.module.push_item(item);
            if matches!(self.module.node(item).kind, NodeKind::Eof) {
                return Ok(());
            }
        }
    }

    /// Parse one statement. At end of file this yields an `Eof` node without
    /// consuming anything.
    pub(crate) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.current();
        let line = token.line;
        trace!(kind = %token.kind, line, "statement");

        match token.kind {
            TokenKind::Var | TokenKind::Const => {
                self.cursor.advance();
                let mutability = if token.kind == TokenKind::Var {
                    Mutability::Mutable
                } else {
                    Mutability::Immutable
                };
                let name = self.expect(TokenKind::Identifier)?;
                let name = self.view(name.span);
                let declared = if self.cursor.accept(TokenKind::DoubleColon).is_some() {
                    self.expect_type()?
                } else {
                    ValueType::Void
                };
                self.expect(TokenKind::Eq)?;
                let init = self.parse_expression()?;
                Ok(self.module.alloc(
                    NodeKind::Declaration {
                        name,
                        init,
                        mutability,
                        declared,
                    },
                    line,
                ))
            }
            TokenKind::Identifier => {
                self.cursor.advance();
                let name = self.view(token.span);
                if self.cursor.accept(TokenKind::LParen).is_some() {
                    let args = self.parse_call_args()?;
                    return Ok(self.module.alloc(NodeKind::Call { callee: name, args }, line));
                }
                if self.cursor.accept(TokenKind::Eq).is_some() {
                    let value = self.parse_expression()?;
                    return Ok(self.module.alloc(NodeKind::Assignment { name, value }, line));
                }
                let found = self.cursor.current_kind();
                Err(self.error_here(ParseErrorKind::UnknownStatement { found }))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.cursor.advance();
                let condition = self.parse_condition()?;
                let body = self.parse_body()?;
                Ok(self.module.alloc(NodeKind::While { condition, body }, line))
            }
            TokenKind::Fun => self.parse_function(),
            TokenKind::Return => {
                self.cursor.advance();
                let value = self.parse_expression()?;
                Ok(self.module.alloc(NodeKind::Return(value), line))
            }
            TokenKind::Import => {
                self.cursor.advance();
                let path = self.expect(TokenKind::String)?;
                let literal = self.view(path.span);
                let path = literal.slice(1, literal.len().saturating_sub(2));
                Ok(self.module.alloc(NodeKind::Import(path), line))
            }
            TokenKind::Eof => Ok(self.module.alloc(NodeKind::Eof, line)),
            found => Err(self.error_here(ParseErrorKind::UnknownStatement { found })),
        }
    }

    /// `if condition { ... } [else { ... } | else if ...]`
    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let line = self.cursor.advance().line;
        let condition = self.parse_condition()?;
        let then_body = self.parse_body()?;

        let else_body = if self.cursor.accept(TokenKind::Else).is_some() {
            if self.cursor.check(TokenKind::If) {
                let nested = ensure_sufficient_stack(|| self.parse_if())?;
                self.module.alloc_body(&[nested])
            } else {
                self.parse_body()?
            }
        } else {
            None
        };

        Ok(self.module.alloc(
            NodeKind::If {
                condition,
                then_body,
                else_body,
            },
            line,
        ))
    }

    /// `fun [extern] name(param :: type, ...) [:: type] { body }`
    fn parse_function(&mut self) -> Result<NodeId, ParseError> {
        let line = self.cursor.advance().line;
        let is_extern = self.cursor.accept(TokenKind::Extern).is_some();
        let name = self.expect(TokenKind::Identifier)?;
        let name = self.view(name.span);

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.cursor.check(TokenKind::Identifier) {
            loop {
                let param = self.expect(TokenKind::Identifier)?;
                let param_name = self.view(param.span);
                self.expect(TokenKind::DoubleColon)?;
                let ty = self.expect_type()?;
                params.push(Param {
                    name: param_name,
                    ty,
                });
                if self.cursor.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let return_type = if self.cursor.accept(TokenKind::DoubleColon).is_some() {
            self.expect_type()?
        } else {
            ValueType::Void
        };

        let body_start = self.cursor.current();
        let body = self.parse_body()?;
        if is_extern && body.is_some() {
            return Err(self.error_at(ParseErrorKind::ExternWithBody, body_start));
        }

        let function = self.module.alloc_function(FunctionDecl {
            name,
            params,
            body,
            return_type,
            is_extern,
            line,
        });
        Ok(self.module.alloc(NodeKind::FunctionDecl(function), line))
    }

    /// `{ statement* }`. An empty block is `None`.
    pub(crate) fn parse_body(&mut self) -> Result<Option<NodeRange>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        ensure_sufficient_stack(|| {
            let mut stmts = Vec::new();
            while self.cursor.accept(TokenKind::RBrace).is_none() {
                if self.cursor.is_at_end() {
                    let eof = self.cursor.current();
                    return Err(self.error_at(ParseErrorKind::UnexpectedEof, eof));
                }
                stmts.push(self.parse_statement()?);
            }
            Ok(self.module.alloc_body(&stmts))
        })
    }
}
