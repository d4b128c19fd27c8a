// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Tokenizer for register description source with spans.
//!
//! One declaration per line: a keyword, a parenthesized argument list of
//! identifiers and numbers, and an optional trailing semicolon. `//` starts
//! a comment running to the end of the line.

use crate::core::text_utils::{is_ident_char, is_ident_start, is_space};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub col_start: usize,
    pub col_end: usize,
}

impl Span {
    fn new(line: u32, start: usize, end: usize) -> Self {
        Self {
            line,
            col_start: start + 1,
            col_end: end + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier(String),
    Number(NumberLiteral),
    Comma,
    OpenParen,
    CloseParen,
    Semicolon,
    End,
}

/// A numeric literal with its source text and parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLiteral {
    pub text: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn to_source_text(&self) -> String {
        match &self.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Number(num) => num.text.clone(),
            TokenKind::Comma => ",".to_string(),
            TokenKind::OpenParen => "(".to_string(),
            TokenKind::CloseParen => ")".to_string(),
            TokenKind::Semicolon => ";".to_string(),
            TokenKind::End => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizeError {
    pub message: String,
    pub span: Span,
}

pub struct Tokenizer<'a> {
    line_num: u32,
    input: &'a [u8],
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(line: &'a str, line_num: u32) -> Self {
        Self {
            line_num,
            input: line.as_bytes(),
            cursor: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        self.skip_white();
        let start = self.cursor;
        let c = self.current_byte();
        match c {
            0 => Ok(Token {
                kind: TokenKind::End,
                span: Span::new(self.line_num, start, start),
            }),
            b'/' if self.peek_byte(1) == b'/' => {
                self.cursor = self.input.len();
                Ok(Token {
                    kind: TokenKind::End,
                    span: Span::new(self.line_num, start, start),
                })
            }
            _ if is_ident_start(c) => Ok(self.scan_identifier()),
            _ if c.is_ascii_digit() => self.scan_number(),
            b',' => Ok(self.single(TokenKind::Comma)),
            b'(' => Ok(self.single(TokenKind::OpenParen)),
            b')' => Ok(self.single(TokenKind::CloseParen)),
            b';' => Ok(self.single(TokenKind::Semicolon)),
            _ => Err(TokenizeError {
                message: format!("Unexpected character '{}'", c as char),
                span: Span::new(self.line_num, start, start + 1),
            }),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.cursor;
        self.cursor += 1;
        Token {
            kind,
            span: Span::new(self.line_num, start, self.cursor),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.cursor;
        self.cursor += 1;
        while is_ident_char(self.current_byte()) {
            self.cursor += 1;
        }
        let text = String::from_utf8_lossy(&self.input[start..self.cursor]).to_string();
        Token {
            kind: TokenKind::Identifier(text),
            span: Span::new(self.line_num, start, self.cursor),
        }
    }

    fn scan_number(&mut self) -> Result<Token, TokenizeError> {
        let start = self.cursor;
        let hex = self.current_byte() == b'0'
            && matches!(self.peek_byte(1), b'x' | b'X')
            && self.peek_byte(2).is_ascii_hexdigit();
        if hex {
            self.cursor += 2;
            while self.current_byte().is_ascii_hexdigit() {
                self.cursor += 1;
            }
        } else {
            while self.current_byte().is_ascii_digit() {
                self.cursor += 1;
            }
        }
        let text = String::from_utf8_lossy(&self.input[start..self.cursor]).to_string();
        let span = Span::new(self.line_num, start, self.cursor);
        let parsed = if hex {
            u32::from_str_radix(&text[2..], 16)
        } else {
            text.parse::<u32>()
        };
        match parsed {
            Ok(value) => Ok(Token {
                kind: TokenKind::Number(NumberLiteral { text, value }),
                span,
            }),
            Err(_) => Err(TokenizeError {
                message: format!("Number out of range: {text}"),
                span,
            }),
        }
    }

    fn skip_white(&mut self) {
        while is_space(self.current_byte()) {
            self.cursor += 1;
        }
    }

    fn current_byte(&self) -> u8 {
        self.peek_byte(0)
    }

    fn peek_byte(&self, offset: usize) -> u8 {
        self.input.get(self.cursor + offset).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Vec<TokenKind> {
        let mut tokenizer = Tokenizer::new(line, 1);
        let mut kinds = Vec::new();
        loop {
            let token = tokenizer.next_token().expect("tokenize");
            let done = token.kind == TokenKind::End;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn scans_declaration_tokens() {
        let kinds = collect("SFR16 (TMR2, 0xCC);");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("SFR16".to_string()),
                TokenKind::OpenParen,
                TokenKind::Identifier("TMR2".to_string()),
                TokenKind::Comma,
                TokenKind::Number(NumberLiteral {
                    text: "0xCC".to_string(),
                    value: 0xCC,
                }),
                TokenKind::CloseParen,
                TokenKind::Semicolon,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn scans_decimal_numbers() {
        let kinds = collect("VECT (TF2_VECTOR, 5, 0x2B)");
        assert!(kinds.contains(&TokenKind::Number(NumberLiteral {
            text: "5".to_string(),
            value: 5,
        })));
    }

    #[test]
    fn comment_ends_the_line() {
        let kinds = collect("SFR (P0, 0x80); // Port 0");
        assert_eq!(kinds.last(), Some(&TokenKind::End));
        assert_eq!(kinds.len(), 8);
    }

    #[test]
    fn spans_are_one_based() {
        let mut tokenizer = Tokenizer::new("  SFR", 3);
        let token = tokenizer.next_token().expect("tokenize");
        assert_eq!(token.span.line, 3);
        assert_eq!(token.span.col_start, 3);
        assert_eq!(token.span.col_end, 6);
    }

    #[test]
    fn rejects_unexpected_characters() {
        let mut tokenizer = Tokenizer::new("SFR @ 0x80", 1);
        tokenizer.next_token().expect("keyword");
        let err = tokenizer.next_token().unwrap_err();
        assert_eq!(err.message, "Unexpected character '@'");
        assert_eq!(err.span.col_start, 5);
    }

    #[test]
    fn rejects_huge_numbers() {
        let mut tokenizer = Tokenizer::new("0x1FFFFFFFF", 1);
        let err = tokenizer.next_token().unwrap_err();
        assert!(err.message.starts_with("Number out of range"));
    }
}
