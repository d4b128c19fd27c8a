// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Dialect descriptors: per-toolchain expansion templates.
//!
//! A [`Dialect`] holds one [`Expansion`] per entry point and renders register
//! declarations in the owning toolchain's syntax. Rendering an entry point the
//! toolchain has no syntax for returns an [`Unsupported`] error instead of
//! silently producing empty text, so misuse surfaces here rather than as a
//! downstream compiler error.
//!
//! There are no `SFR16X`/`SFR32X` entry points for multi-byte xdata
//! registers: an xdata object's byte order follows the compiler's
//! endianness, so no expansion for them is portable. The SFR-space
//! multi-byte forms pin the order themselves by packing each byte's
//! address into the declaration.

use std::fmt;

use crate::core::toolchain::ToolchainId;

/// The fixed set of declaration and assembly entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    Vect,
    Sbit,
    Sfr,
    SfrBit,
    Sfrx,
    Sfr16,
    Sfr16E,
    Sfr32,
    Sfr32E,
    Asm,
    AsmBegin,
    AsmEnd,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 12] = [
        EntryPoint::Vect,
        EntryPoint::Sbit,
        EntryPoint::Sfr,
        EntryPoint::SfrBit,
        EntryPoint::Sfrx,
        EntryPoint::Sfr16,
        EntryPoint::Sfr16E,
        EntryPoint::Sfr32,
        EntryPoint::Sfr32E,
        EntryPoint::Asm,
        EntryPoint::AsmBegin,
        EntryPoint::AsmEnd,
    ];

    /// The keyword used in register description files and reports.
    pub fn keyword(&self) -> &'static str {
        match self {
            EntryPoint::Vect => "VECT",
            EntryPoint::Sbit => "SBIT",
            EntryPoint::Sfr => "SFR",
            EntryPoint::SfrBit => "SFRBIT",
            EntryPoint::Sfrx => "SFRX",
            EntryPoint::Sfr16 => "SFR16",
            EntryPoint::Sfr16E => "SFR16E",
            EntryPoint::Sfr32 => "SFR32",
            EntryPoint::Sfr32E => "SFR32E",
            EntryPoint::Asm => "ASM",
            EntryPoint::AsmBegin => "__asm_begin",
            EntryPoint::AsmEnd => "__asm_end",
        }
    }

    /// Look up an entry point by its declaration keyword (case-sensitive).
    pub fn from_keyword(keyword: &str) -> Option<EntryPoint> {
        match keyword {
            "VECT" => Some(EntryPoint::Vect),
            "SBIT" => Some(EntryPoint::Sbit),
            "SFR" => Some(EntryPoint::Sfr),
            "SFRBIT" => Some(EntryPoint::SfrBit),
            "SFRX" => Some(EntryPoint::Sfrx),
            "SFR16" => Some(EntryPoint::Sfr16),
            "SFR16E" => Some(EntryPoint::Sfr16E),
            "SFR32" => Some(EntryPoint::Sfr32),
            "SFR32E" => Some(EntryPoint::Sfr32E),
            "ASM" => Some(EntryPoint::Asm),
            _ => None,
        }
    }

    /// Whether this entry point may appear as a register file declaration.
    /// Assembly entry points are rendered through the library API only.
    pub fn is_declaration(&self) -> bool {
        !matches!(
            self,
            EntryPoint::Asm | EntryPoint::AsmBegin | EntryPoint::AsmEnd
        )
    }
}

/// How a toolchain expands one entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// A declaration template with `{name}`-style placeholders.
    Template(&'static str),
    /// Deliberately empty expansion (IAR's assembly delimiters).
    Empty,
    /// The toolchain has no syntax for this entry point.
    Unsupported,
}

/// Error returned when rendering an entry point a toolchain does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
    pub toolchain: ToolchainId,
    pub entry: EntryPoint,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not supported by the {} toolchain",
            self.entry.keyword(),
            self.toolchain.as_str()
        )
    }
}

impl std::error::Error for Unsupported {}

/// One toolchain's complete expansion record.
///
/// Address placeholders are evaluated while rendering: `{bitaddr}` is
/// `addr+bit`, and the packed forms combine the byte addresses of a
/// multi-byte register into a single literal. Only Keil's `{addr}^{bit}`
/// bit syntax survives as literal source arithmetic.
#[derive(Clone, Debug)]
pub struct Dialect {
    pub toolchain: ToolchainId,
    pub vect: Expansion,
    pub sbit: Expansion,
    pub sfr: Expansion,
    pub sfrbit: Expansion,
    pub sfrx: Expansion,
    pub sfr16: Expansion,
    pub sfr16e: Expansion,
    pub sfr32: Expansion,
    pub sfr32e: Expansion,
    pub asm: Expansion,
    pub asm_begin: Expansion,
    pub asm_end: Expansion,
    /// Companion macros the generated header must define before any
    /// declaration (IAR's `__SFRBIT_IN_USE__`).
    pub extra_defines: &'static [&'static str],
}

impl Dialect {
    pub fn toolchain(&self) -> ToolchainId {
        self.toolchain
    }

    pub fn extra_defines(&self) -> &'static [&'static str] {
        self.extra_defines
    }

    pub fn expansion(&self, entry: EntryPoint) -> Expansion {
        match entry {
            EntryPoint::Vect => self.vect,
            EntryPoint::Sbit => self.sbit,
            EntryPoint::Sfr => self.sfr,
            EntryPoint::SfrBit => self.sfrbit,
            EntryPoint::Sfrx => self.sfrx,
            EntryPoint::Sfr16 => self.sfr16,
            EntryPoint::Sfr16E => self.sfr16e,
            EntryPoint::Sfr32 => self.sfr32,
            EntryPoint::Sfr32E => self.sfr32e,
            EntryPoint::Asm => self.asm,
            EntryPoint::AsmBegin => self.asm_begin,
            EntryPoint::AsmEnd => self.asm_end,
        }
    }

    /// Capability query: whether this toolchain can render the entry point.
    pub fn supports(&self, entry: EntryPoint) -> bool {
        !matches!(self.expansion(entry), Expansion::Unsupported)
    }

    /// Interrupt vector value: the vector number or the vector address,
    /// whichever this toolchain's interrupt syntax takes.
    pub fn vect(&self, num: u32, addr: u16) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::Vect,
            &[
                ("num", num.to_string()),
                ("addr", format!("0x{addr:04X}")),
            ],
        )
    }

    /// A single bit of a bit-addressable register: bit `bit` (0-7) of the
    /// byte at `addr`.
    pub fn sbit(&self, name: &str, addr: u8, bit: u8) -> Result<String, Unsupported> {
        let bitaddr = addr as u16 + bit as u16;
        self.render(
            EntryPoint::Sbit,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:02X}")),
                ("bit", bit.to_string()),
                ("bitaddr", format!("0x{bitaddr:02X}")),
            ],
        )
    }

    /// An 8-bit register at an absolute address in SFR space.
    pub fn sfr(&self, name: &str, addr: u8) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::Sfr,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:02X}")),
            ],
        )
    }

    /// An 8-bit register overlaid with eight named bit fields.
    /// `bits` lists the field names most significant first (bit 7 to bit 0).
    pub fn sfrbit(&self, name: &str, addr: u8, bits: &[&str; 8]) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::SfrBit,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:02X}")),
                ("bit7", bits[0].to_string()),
                ("bit6", bits[1].to_string()),
                ("bit5", bits[2].to_string()),
                ("bit4", bits[3].to_string()),
                ("bit3", bits[4].to_string()),
                ("bit2", bits[5].to_string()),
                ("bit1", bits[6].to_string()),
                ("bit0", bits[7].to_string()),
            ],
        )
    }

    /// An 8-bit register in xdata (external) memory space.
    pub fn sfrx(&self, name: &str, addr: u16) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::Sfrx,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:04X}")),
            ],
        )
    }

    /// A 16-bit register pair at adjacent addresses, low byte at `addr` and
    /// high byte at `addr+1`. `addr` may be at most 0xFE so the high byte
    /// still falls inside the register file.
    ///
    /// The order in which the two bytes are accessed when the pair is read
    /// or written is not guaranteed, by any toolchain. Hardware with
    /// latching semantics must be accessed byte-wise instead.
    pub fn sfr16(&self, name: &str, addr: u8) -> Result<String, Unsupported> {
        debug_assert!(addr <= 0xFE, "SFR16 base address out of range: 0x{addr:02X}");
        let packed = ((addr as u16 + 1) << 8) | addr as u16;
        self.render(
            EntryPoint::Sfr16,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:02X}")),
                ("packed", format!("0x{packed:04X}")),
            ],
        )
    }

    /// A 16-bit register pair at two byte addresses packed into one literal,
    /// high byte address in the upper half. The halves need not be adjacent.
    ///
    /// Same byte access ordering caveat as [`Dialect::sfr16`].
    pub fn sfr16e(&self, name: &str, fulladdr: u16) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::Sfr16E,
            &[
                ("name", name.to_string()),
                ("fulladdr", format!("0x{fulladdr:04X}")),
            ],
        )
    }

    /// A 32-bit register at four ascending adjacent addresses starting at
    /// `addr` (low byte first). `addr` may be at most 0xFC.
    ///
    /// Same byte access ordering caveat as [`Dialect::sfr16`].
    pub fn sfr32(&self, name: &str, addr: u8) -> Result<String, Unsupported> {
        debug_assert!(addr <= 0xFC, "SFR32 base address out of range: 0x{addr:02X}");
        let a = addr as u32;
        let packed = ((a + 3) << 24) | ((a + 2) << 16) | ((a + 1) << 8) | a;
        self.render(
            EntryPoint::Sfr32,
            &[
                ("name", name.to_string()),
                ("addr", format!("0x{addr:02X}")),
                ("packed", format!("0x{packed:08X}")),
            ],
        )
    }

    /// A 32-bit register at four byte addresses packed into one literal,
    /// lowest byte in the lowest eight bits.
    ///
    /// Same byte access ordering caveat as [`Dialect::sfr16`].
    pub fn sfr32e(&self, name: &str, fulladdr: u32) -> Result<String, Unsupported> {
        self.render(
            EntryPoint::Sfr32E,
            &[
                ("name", name.to_string()),
                ("fulladdr", format!("0x{fulladdr:08X}")),
            ],
        )
    }

    /// Inline assembly statement in this toolchain's embedding syntax.
    pub fn asm(&self, code: &str) -> Result<String, Unsupported> {
        self.render(EntryPoint::Asm, &[("code", code.to_string())])
    }

    /// Opening delimiter of an inline assembly block.
    pub fn asm_begin(&self) -> Result<String, Unsupported> {
        self.render(EntryPoint::AsmBegin, &[])
    }

    /// Closing delimiter of an inline assembly block.
    pub fn asm_end(&self) -> Result<String, Unsupported> {
        self.render(EntryPoint::AsmEnd, &[])
    }

    fn render(
        &self,
        entry: EntryPoint,
        values: &[(&str, String)],
    ) -> Result<String, Unsupported> {
        match self.expansion(entry) {
            Expansion::Template(template) => Ok(substitute(template, values)),
            Expansion::Empty => Ok(String::new()),
            Expansion::Unsupported => Err(Unsupported {
                toolchain: self.toolchain,
                entry,
            }),
        }
    }
}

/// Replace `{key}` placeholders. Braces that do not form a known placeholder
/// are copied verbatim, so template text like `__asm{` stays intact.
fn substitute(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        if let Some(end) = after.find('}') {
            let key = &after[..end];
            if let Some((_, value)) = values.iter().find(|(name, _)| *name == key) {
                out.push_str(value);
                rest = &after[end + 1..];
                continue;
            }
        }
        // Unknown or unterminated: keep the brace and rescan right after it,
        // so a placeholder nested past it is still found.
        out.push('{');
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dialect {
        Dialect {
            toolchain: ToolchainId::new("sample"),
            vect: Expansion::Template("{num}"),
            sbit: Expansion::Template("bit {name} at {bitaddr}"),
            sfr: Expansion::Template("reg {name} at {addr}"),
            sfrbit: Expansion::Unsupported,
            sfrx: Expansion::Template("xreg {name} at {addr}"),
            sfr16: Expansion::Template("wide {name} at {packed}"),
            sfr16e: Expansion::Unsupported,
            sfr32: Expansion::Unsupported,
            sfr32e: Expansion::Unsupported,
            asm: Expansion::Template("do{ {code} }"),
            asm_begin: Expansion::Empty,
            asm_end: Expansion::Empty,
            extra_defines: &[],
        }
    }

    #[test]
    fn substitute_replaces_known_placeholders() {
        let out = substitute("{a} + {b}", &[("a", "1".to_string()), ("b", "2".to_string())]);
        assert_eq!(out, "1 + 2");
    }

    #[test]
    fn substitute_keeps_unknown_braces() {
        let out = substitute("__asm{ {code} }", &[("code", "nop".to_string())]);
        assert_eq!(out, "__asm{ nop }");
        assert_eq!(substitute("struct {", &[]), "struct {");
    }

    #[test]
    fn substitute_keeps_multibyte_text_intact() {
        let out = substitute("// Wickenhäuser {name}", &[("name", "P0".to_string())]);
        assert_eq!(out, "// Wickenhäuser P0");
    }

    #[test]
    fn render_computes_bit_address() {
        let dialect = sample();
        assert_eq!(dialect.sbit("P0_1", 0x80, 1).unwrap(), "bit P0_1 at 0x81");
    }

    #[test]
    fn render_packs_adjacent_pair() {
        let dialect = sample();
        assert_eq!(
            dialect.sfr16("TMR2", 0xCC).unwrap(),
            "wide TMR2 at 0xCDCC"
        );
    }

    #[test]
    #[should_panic(expected = "SFR16 base address out of range")]
    fn sfr16_base_must_leave_room_for_the_high_byte() {
        let _ = sample().sfr16("TMR2", 0xFF);
    }

    #[test]
    #[should_panic(expected = "SFR32 base address out of range")]
    fn sfr32_base_must_leave_room_for_three_more_bytes() {
        let _ = sample().sfr32("MAC0ACC", 0xFD);
    }

    #[test]
    fn unsupported_entry_is_an_error() {
        let dialect = sample();
        let err = dialect.sfr16e("TMR0", 0x8C8A).unwrap_err();
        assert_eq!(err.entry, EntryPoint::Sfr16E);
        assert_eq!(err.toolchain.as_str(), "sample");
        assert_eq!(
            err.to_string(),
            "SFR16E is not supported by the sample toolchain"
        );
        assert!(!dialect.supports(EntryPoint::Sfr16E));
        assert!(dialect.supports(EntryPoint::Sfr16));
    }

    #[test]
    fn empty_expansion_renders_empty_text() {
        let dialect = sample();
        assert_eq!(dialect.asm_begin().unwrap(), "");
    }

    #[test]
    fn declaration_keywords_round_trip() {
        for entry in EntryPoint::ALL {
            if entry.is_declaration() {
                assert_eq!(EntryPoint::from_keyword(entry.keyword()), Some(entry));
            }
        }
        assert_eq!(EntryPoint::from_keyword("ASM"), Some(EntryPoint::Asm));
        assert_eq!(EntryPoint::from_keyword("sfr"), None);
    }
}
