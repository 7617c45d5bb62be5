//! Statement parsing.
//!
//! Statements dispatch on the current token; an identifier only begins an
//! assignment when the lookahead shows `=` or `[`. Every simple statement
//! owns its trailing semicolon. Blocks and control structures end at their
//! closing brace instead.

use pixc_lex::TokenKind;
use pixc_util::ParseResult;

use crate::ast::{
    ArrayDec, Assign, Block, Delay, For, If, Print, Return, Stmt, VarDec, While, Write, WriteBox,
};
use crate::types::Type;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current.kind {
            TokenKind::Let => self.parse_variable_declaration(),
            TokenKind::Identifier
                if matches!(self.next.kind, TokenKind::Assign | TokenKind::LBracket) =>
            {
                let assign = self.parse_assignment_body()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Assign(assign))
            }
            TokenKind::Print => self.parse_print(),
            TokenKind::Delay => self.parse_delay(),
            TokenKind::Write => self.parse_write(),
            TokenKind::WriteBox => self.parse_write_box(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Fun => self.parse_function(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            _ => Err(self.error("a statement")),
        }
    }

    /// `let name : type = expr ;` or
    /// `let name : type [ len? ] = [ expr { , expr } ] ;`
    fn parse_variable_declaration(&mut self) -> ParseResult<Stmt> {
        let (name, ty, line) = self.parse_let_header()?;

        if self.eat(TokenKind::LBracket) {
            let len = if self.current.kind == TokenKind::IntLiteral {
                let token = self.expect(TokenKind::IntLiteral)?;
                let len = token.lexeme.parse::<usize>().map_err(|_| {
                    pixc_util::ParseError {
                        line: token.line,
                        expected: "an array length in range".to_string(),
                        found: format!("`{}`", token.lexeme),
                    }
                })?;
                Some(len)
            } else {
                None
            };
            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Assign)?;

            self.expect(TokenKind::LBracket)?;
            let mut elements = vec![self.parse_expression()?];
            while self.eat(TokenKind::Comma) {
                elements.push(self.parse_expression()?);
            }
            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Semicolon)?;

            return Ok(Stmt::ArrayDec(ArrayDec {
                name,
                ty,
                len,
                elements,
                line,
            }));
        }

        self.expect(TokenKind::Assign)?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::VarDec(VarDec {
            name,
            ty,
            init,
            line,
        }))
    }

    /// `let name : type`, shared by declarations and for-loop initialisers.
    fn parse_let_header(&mut self) -> ParseResult<(String, Type, u32)> {
        let line = self.expect(TokenKind::Let)?.line;
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok((name, ty, line))
    }

    /// `name ( [ expr ] )? = expr`, without the terminating semicolon so
    /// for-loop increments can reuse it.
    fn parse_assignment_body(&mut self) -> ParseResult<Assign> {
        let line = self.current.line;
        let target = self.expect(TokenKind::Identifier)?.lexeme;

        let index = if self.eat(TokenKind::LBracket) {
            let index = self.parse_expression()?;
            self.expect(TokenKind::RBracket)?;
            Some(index)
        } else {
            None
        };

        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(Assign {
            target,
            index,
            value,
            line,
        })
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::Print)?.line;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Print(Print { expr, line }))
    }

    fn parse_delay(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::Delay)?.line;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Delay(Delay { expr, line }))
    }

    /// `__write x , y , colour ;`
    fn parse_write(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::Write)?.line;
        let x = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let y = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let colour = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Write(Write { x, y, colour, line }))
    }

    /// `__write_box x , y , w , h , colour ;`
    fn parse_write_box(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::WriteBox)?.line;
        let x = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let y = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let width = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let height = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let colour = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::WriteBox(WriteBox {
            x,
            y,
            width,
            height,
            colour,
            line,
        }))
    }

    /// `if ( cond ) block [ else block ]`
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::If)?.line;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If(If {
            condition,
            then_block,
            else_block,
            line,
        }))
    }

    /// `while ( cond ) block`
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::While)?.line;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While(While {
            condition,
            body,
            line,
        }))
    }

    /// `for ( init? ; cond ; incr? ) block`
    ///
    /// The initialiser is a scalar declaration, the increment an
    /// assignment; either may be omitted but the condition is required.
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::For)?.line;
        self.expect(TokenKind::LParen)?;

        let init = if self.current.kind == TokenKind::Semicolon {
            None
        } else {
            let (name, ty, dec_line) = self.parse_let_header()?;
            self.expect(TokenKind::Assign)?;
            let init = self.parse_expression()?;
            Some(VarDec {
                name,
                ty,
                init,
                line: dec_line,
            })
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        let increment = if self.current.kind == TokenKind::RParen {
            None
        } else {
            Some(self.parse_assignment_body()?)
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(Stmt::For(For {
            init,
            condition,
            increment,
            body,
            line,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let line = self.expect(TokenKind::Return)?.line;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return(Return { expr, line }))
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let line = self.expect(TokenKind::LBrace)?.line;

        let mut statements = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Block { statements, line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Program};
    use pixc_lex::Lexer;

    fn parse(source: &str) -> ParseResult<Program> {
        let tokens = Lexer::new(source).tokenize().expect("lexes");
        Parser::new(tokens).parse_program()
    }

    fn single(source: &str) -> Stmt {
        let mut program = parse(source).expect("parses");
        assert_eq!(program.statements.len(), 1);
        program.statements.remove(0)
    }

    #[test]
    fn test_variable_declaration() {
        match single("let hue: color = #ff00ff;") {
            Stmt::VarDec(dec) => {
                assert_eq!(dec.name, "hue");
                assert_eq!(dec.ty, Type::Colour);
                assert_eq!(dec.line, 1);
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_array_declaration_with_length() {
        match single("let ramp: int[3] = [1, 2, 3];") {
            Stmt::ArrayDec(dec) => {
                assert_eq!(dec.len, Some(3));
                assert_eq!(dec.elements.len(), 3);
            }
            other => panic!("expected array declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_array_declaration_without_length() {
        match single("let ramp: int[] = [4, 5];") {
            Stmt::ArrayDec(dec) => {
                assert_eq!(dec.len, None);
                assert_eq!(dec.elements.len(), 2);
            }
            other => panic!("expected array declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_indexed_assignment() {
        match single("ramp[1] = 9;") {
            Stmt::Assign(assign) => {
                assert_eq!(assign.target, "ramp");
                assert!(assign.index.is_some());
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_if_with_else() {
        match single("if (x < 1) { __print 1; } else { __print 2; }") {
            Stmt::If(node) => {
                assert!(node.else_block.is_some());
                assert_eq!(node.then_block.statements.len(), 1);
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_if_without_else() {
        match single("if (x < 1) { __print 1; }") {
            Stmt::If(node) => assert!(node.else_block.is_none()),
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_while() {
        match single("while (x < 3) { x = x + 1; }") {
            Stmt::While(node) => {
                assert!(matches!(node.condition, Expr::Binary(_)));
                assert_eq!(node.body.statements.len(), 1);
            }
            other => panic!("expected while, got {other:?}"),
        }
    }

    #[test]
    fn test_for_full_header() {
        match single("for (let i: int = 0; i < 8; i = i + 1) { __delay 5; }") {
            Stmt::For(node) => {
                assert!(node.init.is_some());
                assert!(node.increment.is_some());
            }
            other => panic!("expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_empty_init_and_increment() {
        match single("for (; i < 8;) { __delay 5; }") {
            Stmt::For(node) => {
                assert!(node.init.is_none());
                assert!(node.increment.is_none());
            }
            other => panic!("expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_write_box_arity() {
        match single("__write_box 0, 0, 4, 4, #112233;") {
            Stmt::WriteBox(_) => {}
            other => panic!("expected write_box, got {other:?}"),
        }
        assert!(parse("__write_box 0, 0, 4, 4;").is_err());
    }

    #[test]
    fn test_nested_blocks() {
        match single("{ let x: int = 1; { __print x; } }") {
            Stmt::Block(block) => {
                assert_eq!(block.statements.len(), 2);
                assert!(matches!(block.statements[1], Stmt::Block(_)));
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("{ __print 1;").unwrap_err();
        assert_eq!(err.expected, "'}'");
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("__print 1").unwrap_err();
        assert_eq!(err.expected, "';'");
    }
}
