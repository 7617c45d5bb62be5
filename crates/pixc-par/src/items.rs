//! Function declaration parsing.

use pixc_lex::TokenKind;
use pixc_util::{ParseError, ParseResult};

use crate::ast::{FormalParam, FunDec, Stmt};
use crate::Parser;

impl Parser {
    /// `fun name ( [ param { , param } ] ) -> type block`
    pub(crate) fn parse_function(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::Fun)?.line;
        let name = self.expect(TokenKind::Identifier)?.lexeme;

        self.expect(TokenKind::LParen)?;
        let mut params: Vec<FormalParam> = Vec::new();
        if self.current.kind != TokenKind::RParen {
            params.push(self.parse_formal_parameter()?);
            while self.eat(TokenKind::Comma) {
                params.push(self.parse_formal_parameter()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        // Duplicate parameter names are a grammar-level rejection.
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|p| p.name == param.name) {
                return Err(ParseError {
                    line: param.line,
                    expected: "a distinct parameter name".to_string(),
                    found: format!("`{}`", param.name),
                });
            }
        }

        self.expect(TokenKind::Arrow)?;
        let ret_type = self.parse_type()?;
        let body = self.parse_block()?;

        Ok(Stmt::Fun(FunDec {
            name,
            params,
            ret_type,
            body,
            line,
        }))
    }

    /// `param = name : type`
    fn parse_formal_parameter(&mut self) -> ParseResult<FormalParam> {
        let token = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(FormalParam {
            name: token.lexeme,
            ty,
            line: token.line,
        })
    }
}
