// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Parser for register description lines.
//
// Each line holds at most one declaration of the form
// `KEYWORD(NAME, args...)` with an optional trailing semicolon.
// Blank lines and `//` comments parse to `None`.

use crate::core::dialect::EntryPoint;
use crate::core::tokenizer::{NumberLiteral, Span, Token, TokenKind, TokenizeError, Tokenizer};

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl From<TokenizeError> for ParseError {
    fn from(err: TokenizeError) -> Self {
        Self {
            message: err.message,
            span: err.span,
        }
    }
}

/// A single register declaration, carrying the span of its keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Vect {
        name: String,
        num: u32,
        addr: u16,
        span: Span,
    },
    Sbit {
        name: String,
        addr: u8,
        bit: u8,
        span: Span,
    },
    Sfr {
        name: String,
        addr: u8,
        span: Span,
    },
    SfrBit {
        name: String,
        addr: u8,
        /// Bit field names as written, most significant first.
        bits: [String; 8],
        span: Span,
    },
    Sfrx {
        name: String,
        addr: u16,
        span: Span,
    },
    Sfr16 {
        name: String,
        addr: u8,
        span: Span,
    },
    Sfr16E {
        name: String,
        fulladdr: u16,
        span: Span,
    },
    Sfr32 {
        name: String,
        addr: u8,
        span: Span,
    },
    Sfr32E {
        name: String,
        fulladdr: u32,
        span: Span,
    },
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Declaration::Vect { name, .. }
            | Declaration::Sbit { name, .. }
            | Declaration::Sfr { name, .. }
            | Declaration::SfrBit { name, .. }
            | Declaration::Sfrx { name, .. }
            | Declaration::Sfr16 { name, .. }
            | Declaration::Sfr16E { name, .. }
            | Declaration::Sfr32 { name, .. }
            | Declaration::Sfr32E { name, .. } => name,
        }
    }

    #[must_use]
    pub fn entry_point(&self) -> EntryPoint {
        match self {
            Declaration::Vect { .. } => EntryPoint::Vect,
            Declaration::Sbit { .. } => EntryPoint::Sbit,
            Declaration::Sfr { .. } => EntryPoint::Sfr,
            Declaration::SfrBit { .. } => EntryPoint::SfrBit,
            Declaration::Sfrx { .. } => EntryPoint::Sfrx,
            Declaration::Sfr16 { .. } => EntryPoint::Sfr16,
            Declaration::Sfr16E { .. } => EntryPoint::Sfr16E,
            Declaration::Sfr32 { .. } => EntryPoint::Sfr32,
            Declaration::Sfr32E { .. } => EntryPoint::Sfr32E,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Declaration::Vect { span, .. }
            | Declaration::Sbit { span, .. }
            | Declaration::Sfr { span, .. }
            | Declaration::SfrBit { span, .. }
            | Declaration::Sfrx { span, .. }
            | Declaration::Sfr16 { span, .. }
            | Declaration::Sfr16E { span, .. }
            | Declaration::Sfr32 { span, .. }
            | Declaration::Sfr32E { span, .. } => *span,
        }
    }
}

/// Parses one source line. Returns `None` for blank and comment lines.
pub fn parse_line(line: &str, line_num: u32) -> Result<Option<Declaration>, ParseError> {
    let mut parser = Parser::new(line, line_num)?;
    parser.parse()
}

struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(line: &'a str, line_num: u32) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::new(line, line_num);
        let current = tokenizer.next_token()?;
        Ok(Self { tokenizer, current })
    }

    fn parse(&mut self) -> Result<Option<Declaration>, ParseError> {
        if self.current.kind == TokenKind::End {
            return Ok(None);
        }
        let span = self.current.span;
        let keyword = self.expect_identifier("declaration keyword")?;
        let entry = match EntryPoint::from_keyword(&keyword) {
            Some(entry) if entry.is_declaration() => entry,
            Some(_) => {
                return Err(ParseError {
                    message: format!("'{keyword}' is not valid in a register description"),
                    span,
                });
            }
            None => {
                return Err(ParseError {
                    message: format!("Unknown declaration keyword '{keyword}'"),
                    span,
                });
            }
        };
        self.expect(&TokenKind::OpenParen, "'('")?;
        let name = self.expect_identifier("register name")?;
        let declaration = self.parse_arguments(entry, name, span)?;
        self.expect(&TokenKind::CloseParen, "')'")?;
        if self.current.kind == TokenKind::Semicolon {
            self.advance()?;
        }
        if self.current.kind != TokenKind::End {
            return Err(ParseError {
                message: format!(
                    "Unexpected text after declaration: '{}'",
                    self.current.to_source_text()
                ),
                span: self.current.span,
            });
        }
        Ok(Some(declaration))
    }

    fn parse_arguments(
        &mut self,
        entry: EntryPoint,
        name: String,
        span: Span,
    ) -> Result<Declaration, ParseError> {
        match entry {
            EntryPoint::Vect => {
                let num = self.comma_number()?.value;
                let addr = self.comma_word_address()?;
                Ok(Declaration::Vect {
                    name,
                    num,
                    addr,
                    span,
                })
            }
            EntryPoint::Sbit => {
                let addr = self.comma_byte_address()?;
                let bit = self.comma_bit_position()?;
                Ok(Declaration::Sbit {
                    name,
                    addr,
                    bit,
                    span,
                })
            }
            EntryPoint::Sfr => {
                let addr = self.comma_byte_address()?;
                Ok(Declaration::Sfr { name, addr, span })
            }
            EntryPoint::SfrBit => {
                let addr = self.comma_byte_address()?;
                let mut bits: [String; 8] = Default::default();
                for slot in &mut bits {
                    self.expect(&TokenKind::Comma, "','")?;
                    *slot = self.expect_identifier("bit field name")?;
                }
                Ok(Declaration::SfrBit {
                    name,
                    addr,
                    bits,
                    span,
                })
            }
            EntryPoint::Sfrx => {
                let addr = self.comma_word_address()?;
                Ok(Declaration::Sfrx { name, addr, span })
            }
            EntryPoint::Sfr16 => {
                let addr = self.comma_base_address(0xFE, "SFR16")?;
                Ok(Declaration::Sfr16 { name, addr, span })
            }
            EntryPoint::Sfr16E => {
                let fulladdr = self.comma_word_address()?;
                Ok(Declaration::Sfr16E {
                    name,
                    fulladdr,
                    span,
                })
            }
            EntryPoint::Sfr32 => {
                let addr = self.comma_base_address(0xFC, "SFR32")?;
                Ok(Declaration::Sfr32 { name, addr, span })
            }
            EntryPoint::Sfr32E => {
                let fulladdr = self.comma_number()?.value;
                Ok(Declaration::Sfr32E {
                    name,
                    fulladdr,
                    span,
                })
            }
            EntryPoint::Asm | EntryPoint::AsmBegin | EntryPoint::AsmEnd => {
                unreachable!("filtered by is_declaration")
            }
        }
    }

    fn comma_number(&mut self) -> Result<NumberLiteral, ParseError> {
        self.expect(&TokenKind::Comma, "','")?;
        self.expect_number().map(|(literal, _)| literal)
    }

    fn comma_byte_address(&mut self) -> Result<u8, ParseError> {
        self.expect(&TokenKind::Comma, "','")?;
        let (literal, span) = self.expect_number()?;
        u8::try_from(literal.value).map_err(|_| ParseError {
            message: format!(
                "Address out of range: {} (expected 0x00-0xFF)",
                literal.text
            ),
            span,
        })
    }

    fn comma_word_address(&mut self) -> Result<u16, ParseError> {
        self.expect(&TokenKind::Comma, "','")?;
        let (literal, span) = self.expect_number()?;
        u16::try_from(literal.value).map_err(|_| ParseError {
            message: format!(
                "Address out of range: {} (expected 0x0000-0xFFFF)",
                literal.text
            ),
            span,
        })
    }

    fn comma_bit_position(&mut self) -> Result<u8, ParseError> {
        self.expect(&TokenKind::Comma, "','")?;
        let (literal, span) = self.expect_number()?;
        if literal.value > 7 {
            return Err(ParseError {
                message: format!("Bit position out of range: {} (expected 0-7)", literal.text),
                span,
            });
        }
        Ok(literal.value as u8)
    }

    /// Base address of a multi-byte register. The constituent bytes climb
    /// upward from the base, so the base must leave room below 0xFF.
    fn comma_base_address(&mut self, max: u8, keyword: &str) -> Result<u8, ParseError> {
        self.expect(&TokenKind::Comma, "','")?;
        let (literal, span) = self.expect_number()?;
        match u8::try_from(literal.value) {
            Ok(addr) if addr <= max => Ok(addr),
            _ => Err(ParseError {
                message: format!(
                    "{} base address out of range: {} (expected 0x00-0x{:02X})",
                    keyword, literal.text, max
                ),
                span,
            }),
        }
    }

    fn expect_number(&mut self) -> Result<(NumberLiteral, Span), ParseError> {
        let span = self.current.span;
        match self.current.kind.clone() {
            TokenKind::Number(literal) => {
                self.advance()?;
                Ok((literal, span))
            }
            _ => Err(ParseError {
                message: format!(
                    "Expected a number, found '{}'",
                    self.current.to_source_text()
                ),
                span,
            }),
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance()?;
                Ok(name)
            }
            _ => Err(ParseError {
                message: format!("Expected {what}, found '{}'", self.current.to_source_text()),
                span: self.current.span,
            }),
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ParseError> {
        if self.current.kind == *kind {
            self.advance()?;
            Ok(())
        } else {
            Err(ParseError {
                message: format!("Expected {what}, found '{}'", self.current.to_source_text()),
                span: self.current.span,
            })
        }
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.tokenizer.next_token()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Declaration {
        parse_line(line, 1).expect("parse").expect("declaration")
    }

    fn parse_err(line: &str) -> ParseError {
        parse_line(line, 1).unwrap_err()
    }

    #[test]
    fn parses_blank_and_comment_lines_to_none() {
        assert!(parse_line("", 1).expect("parse").is_none());
        assert!(parse_line("   ", 1).expect("parse").is_none());
        assert!(parse_line("// Timer registers", 1).expect("parse").is_none());
    }

    #[test]
    fn parses_sbit() {
        let decl = parse("SBIT (P0_1, 0x80, 1);");
        assert_eq!(
            decl,
            Declaration::Sbit {
                name: "P0_1".to_string(),
                addr: 0x80,
                bit: 1,
                span: Span {
                    line: 1,
                    col_start: 1,
                    col_end: 5,
                },
            }
        );
    }

    #[test]
    fn parses_vect_with_decimal_number() {
        let decl = parse("VECT (TF2_VECTOR, 5, 0x2B)");
        match decl {
            Declaration::Vect {
                name, num, addr, ..
            } => {
                assert_eq!(name, "TF2_VECTOR");
                assert_eq!(num, 5);
                assert_eq!(addr, 0x2B);
            }
            other => panic!("wrong declaration: {other:?}"),
        }
    }

    #[test]
    fn parses_sfrbit_fields_most_significant_first() {
        let decl = parse("SFRBIT (PSW, 0xD0, CY, AC, F0, RS1, RS0, OV, F1, P);");
        match decl {
            Declaration::SfrBit {
                name, addr, bits, ..
            } => {
                assert_eq!(name, "PSW");
                assert_eq!(addr, 0xD0);
                assert_eq!(bits[0], "CY");
                assert_eq!(bits[7], "P");
            }
            other => panic!("wrong declaration: {other:?}"),
        }
    }

    #[test]
    fn parses_extended_forms() {
        assert_eq!(
            parse("SFR16E (TMR0, 0x8C8A)").entry_point(),
            EntryPoint::Sfr16E
        );
        match parse("SFR32E (SUMR, 0xE5E4E3E2)") {
            Declaration::Sfr32E { fulladdr, .. } => assert_eq!(fulladdr, 0xE5E4_E3E2),
            other => panic!("wrong declaration: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keywords() {
        let err = parse_err("SFRB (P0, 0x80)");
        assert_eq!(err.message, "Unknown declaration keyword 'SFRB'");
        assert_eq!(err.span.col_start, 1);
    }

    #[test]
    fn rejects_asm_keyword() {
        let err = parse_err("ASM (nop)");
        assert_eq!(err.message, "'ASM' is not valid in a register description");
    }

    #[test]
    fn rejects_out_of_range_bit() {
        let err = parse_err("SBIT (P0_1, 0x80, 8)");
        assert_eq!(err.message, "Bit position out of range: 8 (expected 0-7)");
    }

    #[test]
    fn rejects_oversized_addresses() {
        let err = parse_err("SFR (P0, 0x180)");
        assert_eq!(
            err.message,
            "Address out of range: 0x180 (expected 0x00-0xFF)"
        );
        let err = parse_err("SFR16 (TMR2, 0xFF)");
        assert_eq!(
            err.message,
            "SFR16 base address out of range: 0xFF (expected 0x00-0xFE)"
        );
        let err = parse_err("SFR32 (MAC0ACC, 0xFD)");
        assert_eq!(
            err.message,
            "SFR32 base address out of range: 0xFD (expected 0x00-0xFC)"
        );
    }

    #[test]
    fn rejects_trailing_text() {
        let err = parse_err("SFR (P0, 0x80); SFR (P1, 0x90)");
        assert_eq!(err.message, "Unexpected text after declaration: 'SFR'");
        assert_eq!(err.span.col_start, 17);
    }

    #[test]
    fn rejects_missing_arguments() {
        let err = parse_err("SFR (P0)");
        assert_eq!(err.message, "Expected ',', found ')'");
    }
}
