//! Expression parsing.

use elang_ir::{ArithOp, CondOp, NodeId, NodeKind, NodeRange, TokenKind};
use elang_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

fn term_op(kind: TokenKind) -> Option<ArithOp> {
    match kind {
        TokenKind::Star => Some(ArithOp::Mul),
        TokenKind::Slash => Some(ArithOp::Div),
        TokenKind::Percent => Some(ArithOp::Mod),
        _ => None,
    }
}

fn expression_op(kind: TokenKind) -> Option<ArithOp> {
    match kind {
        TokenKind::Plus => Some(ArithOp::Add),
        TokenKind::Minus => Some(ArithOp::Sub),
        _ => None,
    }
}

fn relational_op(kind: TokenKind) -> Option<CondOp> {
    match kind {
        TokenKind::Lt => Some(CondOp::Lt),
        TokenKind::Gt => Some(CondOp::Gt),
        TokenKind::EqEq => Some(CondOp::Eq),
        _ => None,
    }
}

fn logic_op(kind: TokenKind) -> Option<CondOp> {
    match kind {
        TokenKind::And => Some(CondOp::And),
        TokenKind::Or => Some(CondOp::Or),
        _ => None,
    }
}

impl Parser<'_> {
    /// condition = conditional_factor { ("and" | "or") conditional_factor }
    pub(crate) fn parse_condition(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| {
            let mut lhs = self.parse_conditional_factor()?;
            while let Some(op) = logic_op(self.cursor.current_kind()) {
                let line = self.cursor.advance().line;
                let rhs = self.parse_conditional_factor()?;
                lhs = self.module.alloc(NodeKind::Condition { op, lhs, rhs }, line);
            }
            Ok(lhs)
        })
    }

    /// conditional_factor = "(" condition ")" | expression [ ("<" | ">" | "==") expression ]
    ///
    /// A parenthesized group followed by an arithmetic operator keeps going
    /// as an expression, so `(a + b) * 2 < c` parses as written.
    fn parse_conditional_factor(&mut self) -> Result<NodeId, ParseError> {
        let lhs = if self.cursor.check(TokenKind::LParen) {
            self.cursor.advance();
            let inner = self.parse_condition()?;
            self.expect(TokenKind::RParen)?;
            let term = self.continue_term(inner)?;
            self.continue_expression(term)?
        } else {
            self.parse_expression()?
        };

        let Some(op) = relational_op(self.cursor.current_kind()) else {
            return Ok(lhs);
        };
        let line = self.cursor.advance().line;
        let rhs = self.parse_expression()?;
        Ok(self.module.alloc(NodeKind::Condition { op, lhs, rhs }, line))
    }

    /// expression = term { ("+" | "-") term }
    pub(crate) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        let lhs = self.parse_term()?;
        self.continue_expression(lhs)
    }

    fn continue_expression(&mut self, mut lhs: NodeId) -> Result<NodeId, ParseError> {
        while let Some(op) = expression_op(self.cursor.current_kind()) {
            let line = self.cursor.advance().line;
            let rhs = self.parse_term()?;
            lhs = self.module.alloc(NodeKind::Arithmetic { op, lhs, rhs }, line);
        }
        Ok(lhs)
    }

    /// term = factor { ("*" | "/" | "%") factor }
    fn parse_term(&mut self) -> Result<NodeId, ParseError> {
        let lhs = self.parse_factor()?;
        self.continue_term(lhs)
    }

    fn continue_term(&mut self, mut lhs: NodeId) -> Result<NodeId, ParseError> {
        while let Some(op) = term_op(self.cursor.current_kind()) {
            let line = self.cursor.advance().line;
            let rhs = self.parse_factor()?;
            lhs = self.module.alloc(NodeKind::Arithmetic { op, lhs, rhs }, line);
        }
        Ok(lhs)
    }

    /// factor = number | string | "true" | "false" | identifier [ "(" args ")" ]
    ///        | "(" expression ")" | "-" factor
    fn parse_factor(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| {
            let token = self.cursor.current();
            let line = token.line;
            match token.kind {
                TokenKind::Number => {
                    self.cursor.advance();
                    let value = self.parse_int(self.text(token.span), token)?;
                    Ok(self.module.alloc(NodeKind::Number(value), line))
                }
                TokenKind::String => {
                    self.cursor.advance();
                    let literal = self.view(token.span);
                    let contents = literal.slice(1, literal.len().saturating_sub(2));
                    Ok(self.module.alloc(NodeKind::Str(contents), line))
                }
                TokenKind::True | TokenKind::False => {
                    self.cursor.advance();
                    let value = token.kind == TokenKind::True;
                    Ok(self.module.alloc(NodeKind::Bool(value), line))
                }
                TokenKind::Identifier => {
                    self.cursor.advance();
                    let name = self.view(token.span);
                    if self.cursor.accept(TokenKind::LParen).is_some() {
                        let args = self.parse_call_args()?;
                        return Ok(self.module.alloc(NodeKind::Call { callee: name, args }, line));
                    }
                    Ok(self.module.alloc(NodeKind::Identifier(name), line))
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let inner = self.parse_expression()?;
                    self.expect(TokenKind::RParen)?;
                    Ok(inner)
                }
                TokenKind::Minus => {
                    self.cursor.advance();
                    let operand = self.cursor.current();
                    if operand.kind == TokenKind::Number {
                        // Folded so that i64::MIN is writable.
                        self.cursor.advance();
                        let digits = self.text(operand.span);
                        let value = self.parse_int(&format!("-{digits}"), operand)?;
                        return Ok(self.module.alloc(NodeKind::Number(value), line));
                    }
                    let operand = self.parse_factor()?;
                    Ok(self.module.alloc(NodeKind::Negate(operand), line))
                }
                found => Err(self.error_here(ParseErrorKind::SyntaxError { found })),
            }
        })
    }

    /// Arguments after the opening parenthesis, through the closing one.
    pub(crate) fn parse_call_args(&mut self) -> Result<NodeRange, ParseError> {
        if self.cursor.accept(TokenKind::RParen).is_some() {
            return Ok(NodeRange::EMPTY);
        }
        let mut args = Vec::new();
        loop {
            args.push(self.parse_expression()?);
            if self.cursor.accept(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(self.module.alloc_list(&args))
    }

    fn parse_int(&self, text: &str, token: &elang_ir::Token) -> Result<i64, ParseError> {
        text.parse::<i64>()
            .map_err(|_| self.error_at(ParseErrorKind::IntegerOutOfRange, token))
    }
}
