//! Lexer for IntentLang.
//!
//! Converts source text into a stream of [`Token`]s. Numeric literals are
//! classified here (integer, `Mbps` rate, dotted quad, CIDR) so the parser
//! only ever sees well-formed values.

use std::net::Ipv4Addr;

use super::error::ParseError;
use super::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line: self.line,
                    col: self.col,
                });
                break;
            }

            let ch = self.peek();

            if ch == '\n' {
                tokens.push(Token {
                    kind: TokenKind::Newline,
                    line: self.line,
                    col: self.col,
                });
                self.advance();
                self.line += 1;
                self.col = 1;
                continue;
            }

            let token = match ch {
                '0'..='9' => self.lex_number()?,
                'a'..='z' | 'A'..='Z' | '_' => self.lex_ident_or_keyword(),
                _ => {
                    return Err(ParseError::lex(
                        format!("unexpected character: '{ch}'"),
                        self.line,
                        self.col,
                    ));
                }
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch != '\n' {
            self.col += 1;
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            let ch = self.peek();
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while !self.is_at_end() && pred(self.peek()) {
            s.push(self.advance());
        }
        s
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let line = self.line;
        let col = self.col;
        let digits = self.take_while(|c| c.is_ascii_digit());

        let dotted = !self.is_at_end()
            && self.peek() == '.'
            && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if dotted {
            return self.lex_address(digits, line, col);
        }

        if !self.is_at_end() && self.peek().is_ascii_alphabetic() {
            let suffix = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            if suffix != "Mbps" {
                return Err(ParseError::lex(
                    format!("malformed numeric literal: {digits}{suffix}"),
                    line,
                    col,
                ));
            }
            let value = parse_integer(&digits, line, col)?;
            return Ok(Token {
                kind: TokenKind::Rate(value),
                line,
                col,
            });
        }

        let value = parse_integer(&digits, line, col)?;
        Ok(Token {
            kind: TokenKind::Integer(value),
            line,
            col,
        })
    }

    /// Lex the rest of a dotted quad, with an optional `/prefix`.
    fn lex_address(&mut self, head: String, line: usize, col: usize) -> Result<Token, ParseError> {
        let mut text = head;
        text.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '.'));

        let addr: Ipv4Addr = text
            .parse()
            .map_err(|_| ParseError::lex(format!("malformed address: {text}"), line, col))?;

        if self.is_at_end() || self.peek() != '/' {
            self.reject_trailing(&text, line, col)?;
            return Ok(Token {
                kind: TokenKind::Address(addr),
                line,
                col,
            });
        }

        self.advance(); // consume '/'
        let prefix_text = self.take_while(|c| c.is_ascii_digit());
        let prefix = prefix_text
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= 32)
            .ok_or_else(|| {
                ParseError::lex(
                    format!("malformed prefix length: {text}/{prefix_text}"),
                    line,
                    col,
                )
            })?;
        self.reject_trailing(&text, line, col)?;

        Ok(Token {
            kind: TokenKind::Cidr(addr, prefix),
            line,
            col,
        })
    }

    fn reject_trailing(&self, text: &str, line: usize, col: usize) -> Result<(), ParseError> {
        if !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '/') {
            return Err(ParseError::lex(
                format!("malformed address: {text}{}", self.peek()),
                line,
                col,
            ));
        }
        Ok(())
    }

    fn lex_ident_or_keyword(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let s = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        let kind = TokenKind::keyword(&s).unwrap_or(TokenKind::Ident(s));
        Token { kind, line, col }
    }
}

fn parse_integer(digits: &str, line: usize, col: usize) -> Result<u64, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::lex(format!("integer literal out of range: {digits}"), line, col))
}
