// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! IAR ICC8051 toolchain, <http://www.iar.com>.
//!
//! IAR stands apart in three ways. Its identity macro matches on value, not
//! mere definition, so `__IAR_SYSTEMS_ICC__=0` does not select it. It is the
//! only toolchain with bit-field overlay syntax, expanding SFRBIT to an
//! anonymous-union declaration (headers using it must define
//! `__SFRBIT_IN_USE__` first, which [`Dialect::extra_defines`] carries). And
//! its inline assembly is a self-terminated statement with no block
//! delimiters, so `__asm_begin`/`__asm_end` render empty on purpose.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct IarModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("iar");
pub const TOOLCHAIN_NAME: &str = "IAR ICC8051";

// Bit fields are declared LSB first; the low bit of the register is the
// first member of the overlay struct.
const SFRBIT_TEMPLATE: &str = "\
__sfr __no_init volatile union
{
  unsigned char {name};
  struct {
    unsigned char {bit0} : 1;
    unsigned char {bit1} : 1;
    unsigned char {bit2} : 1;
    unsigned char {bit3} : 1;
    unsigned char {bit4} : 1;
    unsigned char {bit5} : 1;
    unsigned char {bit6} : 1;
    unsigned char {bit7} : 1;
  };
} @ {addr}";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{addr}"),
    sbit: Expansion::Unsupported,
    sfr: Expansion::Template("__sfr __no_init volatile unsigned char {name} @ {addr}"),
    sfrbit: Expansion::Template(SFRBIT_TEMPLATE),
    sfrx: Expansion::Template("__xdata __no_init volatile unsigned char {name} @ {addr}"),
    sfr16: Expansion::Template("__sfr __no_init volatile unsigned int {name} @ {addr}"),
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Template("__sfr __no_init volatile unsigned long {name} @ {addr}"),
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Template("asm(\"{code}\");"),
    asm_begin: Expansion::Empty,
    asm_end: Expansion::Empty,
    extra_defines: &["__SFRBIT_IN_USE__"],
};

impl ToolchainModule for IarModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["__IAR_SYSTEMS_ICC__"]
    }

    fn matches(&self, defines: &DefineSet) -> bool {
        defines.is_truthy("__IAR_SYSTEMS_ICC__")
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialect::EntryPoint;

    fn dialect() -> Dialect {
        IarModule.dialect(&DefineSet::new())
    }

    fn defines(args: &[&str]) -> DefineSet {
        let owned: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        DefineSet::from_args(&owned).expect("defines")
    }

    #[test]
    fn matches_on_value_not_definition() {
        assert!(IarModule.matches(&defines(&["__IAR_SYSTEMS_ICC__"])));
        assert!(IarModule.matches(&defines(&["__IAR_SYSTEMS_ICC__=2"])));
        assert!(!IarModule.matches(&defines(&["__IAR_SYSTEMS_ICC__=0"])));
        assert!(!IarModule.matches(&DefineSet::new()));
    }

    #[test]
    fn vector_value_is_the_address() {
        assert_eq!(dialect().vect(5, 0x2B).unwrap(), "0x002B");
    }

    #[test]
    fn expands_registers_with_placement_syntax() {
        let dialect = dialect();
        assert_eq!(
            dialect.sfr("P0", 0x80).unwrap(),
            "__sfr __no_init volatile unsigned char P0 @ 0x80"
        );
        assert_eq!(
            dialect.sfrx("CPUCS", 0xE600).unwrap(),
            "__xdata __no_init volatile unsigned char CPUCS @ 0xE600"
        );
        assert_eq!(
            dialect.sfr16("TMR2", 0xCC).unwrap(),
            "__sfr __no_init volatile unsigned int TMR2 @ 0xCC"
        );
        assert_eq!(
            dialect.sfr32("MAC0ACC", 0x93).unwrap(),
            "__sfr __no_init volatile unsigned long MAC0ACC @ 0x93"
        );
    }

    #[test]
    fn expands_bit_overlays_as_anonymous_unions() {
        let bits = ["CY", "AC", "F0", "RS1", "RS0", "OV", "F1", "P"];
        let text = dialect().sfrbit("PSW", 0xD0, &bits).unwrap();
        let expected = "\
__sfr __no_init volatile union
{
  unsigned char PSW;
  struct {
    unsigned char P : 1;
    unsigned char F1 : 1;
    unsigned char OV : 1;
    unsigned char RS0 : 1;
    unsigned char RS1 : 1;
    unsigned char AC : 1;
    unsigned char F0 : 1;
    unsigned char CY : 1;
  };
} @ 0xD0";
        assert_eq!(text, expected);
    }

    #[test]
    fn requires_the_bit_overlay_companion_define() {
        assert_eq!(dialect().extra_defines(), &["__SFRBIT_IN_USE__"]);
    }

    #[test]
    fn assembly_is_a_statement_without_delimiters() {
        let dialect = dialect();
        assert_eq!(dialect.asm("nop").unwrap(), "asm(\"nop\");");
        assert_eq!(dialect.asm_begin().unwrap(), "");
        assert_eq!(dialect.asm_end().unwrap(), "");
        assert!(dialect.supports(EntryPoint::AsmBegin));
    }

    #[test]
    fn has_no_single_bit_syntax() {
        assert!(!dialect().supports(EntryPoint::Sbit));
    }
}
