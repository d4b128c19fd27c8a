// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Tasking CC51 toolchain, <http://www.altium.com/tasking>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct TaskingModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("tasking");
pub const TOOLCHAIN_NAME: &str = "Tasking CC51";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("_sfrbit {name} _at({bitaddr})"),
    sfr: Expansion::Template("_sfrbyte {name} _at({addr})"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("_xdat volatile unsigned char {name} _at({addr})"),
    sfr16: Expansion::Unsupported,
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for TaskingModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["_CC51"]
    }

    fn dialect(&self, defines: &DefineSet) -> Dialect {
        let mut dialect = DIALECT.clone();
        // _CC51 carries the toolset version; _sfrword needs v7.2 (72) or later.
        if defines.int_value("_CC51").unwrap_or(0) > 71 {
            dialect.sfr16 = Expansion::Template("_sfrword _little {name} _at({addr})");
        }
        dialect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialect::EntryPoint;

    fn defines(args: &[&str]) -> DefineSet {
        let owned: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        DefineSet::from_args(&owned).expect("defines")
    }

    #[test]
    fn expands_bit_and_byte_registers() {
        let dialect = TaskingModule.dialect(&defines(&["_CC51"]));
        assert_eq!(
            dialect.sbit("P0_1", 0x80, 1).unwrap(),
            "_sfrbit P0_1 _at(0x81)"
        );
        assert_eq!(dialect.sfr("P0", 0x80).unwrap(), "_sfrbyte P0 _at(0x80)");
        assert_eq!(
            dialect.sfrx("CPUCS", 0xE600).unwrap(),
            "_xdat volatile unsigned char CPUCS _at(0xE600)"
        );
    }

    #[test]
    fn word_registers_depend_on_the_toolset_version() {
        let old = TaskingModule.dialect(&defines(&["_CC51=71"]));
        assert!(!old.supports(EntryPoint::Sfr16));
        assert!(old.sfr16("TMR2", 0xCC).is_err());

        let new = TaskingModule.dialect(&defines(&["_CC51=72"]));
        assert_eq!(
            new.sfr16("TMR2", 0xCC).unwrap(),
            "_sfrword _little TMR2 _at(0xCC)"
        );
    }

    #[test]
    fn bare_identity_define_gets_the_old_dialect() {
        // -D _CC51 without a version defaults to 1.
        let dialect = TaskingModule.dialect(&defines(&["_CC51"]));
        assert!(!dialect.supports(EntryPoint::Sfr16));
    }
}
