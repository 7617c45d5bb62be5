//! The lexer: longest-match tokenization with backtracking.
//!
//! Each call to [`Lexer::next_token`] walks the DFA from its start state,
//! pushing every visited state onto a stack. The stack is cleared whenever
//! an accepting state is reached, so after the walk dies (no transition, or
//! end of input) the stack holds the last accepting state followed by the
//! states visited after it. Unwinding pops those trailing states, giving
//! their characters back to the cursor, and the accepting state left on top
//! names the token. An empty stack means no accepting prefix exists and the
//! input is rejected.

use pixc_util::{LexError, LexResult};

use crate::category::categorize;
use crate::cursor::Cursor;
use crate::dfa::{classify, Dfa, State};
use crate::token::{Token, TokenKind};

/// The lexer for PixIR-source text.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    dfa: Dfa,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            dfa: Dfa::new(),
        }
    }

    /// Tokenizes the whole input.
    ///
    /// Skip tokens (whitespace, comments) are consumed but not emitted; the
    /// returned stream always ends with exactly one EOF token.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while !self.cursor.is_at_end() {
            let token = self.next_token()?;
            if token.kind != TokenKind::Skip {
                tokens.push(token);
            }
        }

        tokens.push(Token::eof(self.cursor.line()));
        Ok(tokens)
    }

    /// Reads the next token, including skip tokens.
    fn next_token(&mut self) -> LexResult<Token> {
        let start_line = self.cursor.line();
        let mut state = State::Start;
        let mut stack: Vec<State> = Vec::new();
        let mut lexeme = String::new();

        loop {
            if self.dfa.is_accepting(state) {
                stack.clear();
            }
            stack.push(state);

            let Some(c) = self.cursor.peek() else { break };
            let Some(next) = self.dfa.transition(state, categorize(c)) else {
                break;
            };
            self.cursor.advance();
            lexeme.push(c);
            state = next;
        }

        // A block comment left open at end of input would otherwise roll
        // back to a bare `/` and mis-lex the comment body.
        if self.cursor.is_at_end()
            && matches!(state, State::BlockComment | State::BlockCommentStar)
        {
            return Err(LexError {
                line: start_line,
                lexeme,
            });
        }

        // Remember what was read for the error message before the unwind
        // shrinks it. A walk that died on its very first character has an
        // empty lexeme; report the offending character instead.
        let read = if lexeme.is_empty() {
            self.cursor.peek().map(String::from).unwrap_or_default()
        } else {
            lexeme.clone()
        };

        let accepted = loop {
            match stack.pop() {
                None => {
                    return Err(LexError {
                        line: start_line,
                        lexeme: read,
                    })
                }
                Some(s) if self.dfa.is_accepting(s) => break s,
                Some(_) => {
                    // Give one character back; the pop for the start state
                    // has no character attached.
                    if lexeme.pop().is_some() {
                        self.cursor.retreat();
                    }
                }
            }
        };

        match classify(accepted, &lexeme) {
            Some(kind) => Ok(Token::new(kind, lexeme, start_line)),
            None => Err(LexError {
                line: start_line,
                lexeme,
            }),
        }
    }
}
