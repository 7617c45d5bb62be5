//! Expression parsing.
//!
//! The precedence ladder, loosest to tightest:
//!
//! | Level             | Operators                        |
//! |-------------------|----------------------------------|
//! | expression        | `< > <= >= == !=`, then `as`     |
//! | simple expression | `+ - or`                         |
//! | term              | `* / and`                        |
//! | factor            | literals, names, calls, `not`, unary `-`, `__random_int`, `__read`, parentheses |
//!
//! Each level loops over its operator class, so `a - b - c` parses as
//! `(a - b) - c`. A trailing `as type` casts the whole expression.

use pixc_lex::TokenKind;
use pixc_util::ParseResult;

use crate::ast::{
    Binary, Call, Cast, Expr, Literal, LiteralValue, Random, Read, Unary, Variable,
};
use crate::Parser;

impl Parser {
    /// `expression = simple { rel_op simple } [ "as" type ]`
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let line = self.current.line;
        let mut expr = self.parse_simple_expression()?;

        while self.current.kind == TokenKind::RelationalOp {
            let op = self.current.lexeme.clone();
            self.advance();
            let right = self.parse_simple_expression()?;
            expr = Expr::Binary(Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            });
        }

        if self.eat(TokenKind::As) {
            let target = self.parse_type()?;
            expr = Expr::Cast(Cast {
                expr: Box::new(expr),
                target,
                line,
            });
        }

        Ok(expr)
    }

    /// `simple = term { add_op term }`
    fn parse_simple_expression(&mut self) -> ParseResult<Expr> {
        let line = self.current.line;
        let mut expr = self.parse_term()?;

        while self.current.kind == TokenKind::AdditiveOp {
            let op = self.current.lexeme.clone();
            self.advance();
            let right = self.parse_term()?;
            expr = Expr::Binary(Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            });
        }

        Ok(expr)
    }

    /// `term = factor { mul_op factor }`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let line = self.current.line;
        let mut expr = self.parse_factor()?;

        while self.current.kind == TokenKind::MultiplicativeOp {
            let op = self.current.lexeme.clone();
            self.advance();
            let right = self.parse_factor()?;
            expr = Expr::Binary(Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            });
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let line = self.current.line;

        match self.current.kind {
            TokenKind::IntLiteral => {
                let value = self
                    .current
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| self.error("an integer literal in range"))?;
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Int(value),
                    line,
                }))
            }
            TokenKind::FloatLiteral => {
                let value = self
                    .current
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| self.error("a float literal in range"))?;
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Float(value),
                    line,
                }))
            }
            TokenKind::BoolLiteral => {
                let value = self.current.lexeme == "true";
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Bool(value),
                    line,
                }))
            }
            TokenKind::ColourLiteral => {
                let value = self.current.lexeme.clone();
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Colour(value),
                    line,
                }))
            }
            TokenKind::Width => {
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Width,
                    line,
                }))
            }
            TokenKind::Height => {
                self.advance();
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Height,
                    line,
                }))
            }
            TokenKind::Identifier if self.next.kind == TokenKind::LParen => self.parse_call(),
            TokenKind::Identifier => {
                let name = self.current.lexeme.clone();
                self.advance();
                let index = if self.eat(TokenKind::LBracket) {
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    Some(Box::new(index))
                } else {
                    None
                };
                Ok(Expr::Variable(Variable { name, index, line }))
            }
            TokenKind::NotOp => {
                self.advance();
                let operand = self.parse_expression()?;
                Ok(Expr::Unary(Unary {
                    op: "not".to_string(),
                    operand: Box::new(operand),
                    line,
                }))
            }
            TokenKind::AdditiveOp if self.current.lexeme == "-" => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::Unary(Unary {
                    op: "-".to_string(),
                    operand: Box::new(operand),
                    line,
                }))
            }
            TokenKind::RandomInt => {
                self.advance();
                let bound = self.parse_expression()?;
                Ok(Expr::Random(Random {
                    bound: Box::new(bound),
                    line,
                }))
            }
            TokenKind::Read => {
                self.advance();
                let x = self.parse_expression()?;
                self.expect(TokenKind::Comma)?;
                let y = self.parse_expression()?;
                Ok(Expr::Read(Read {
                    x: Box::new(x),
                    y: Box::new(y),
                    line,
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error("an expression")),
        }
    }

    /// `call = identifier "(" [ expression { "," expression } ] ")"`
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let line = self.current.line;
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if self.current.kind != TokenKind::RParen {
            args.push(self.parse_expression()?);
            while self.eat(TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(Expr::Call(Call { name, args, line }))
    }
}
