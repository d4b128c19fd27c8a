// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Crossware XC51 toolchain, <http://www.crossware.com>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct CrosswareModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("crossware");
pub const TOOLCHAIN_NAME: &str = "Crossware XC51";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("_sfrbit {name} = ({bitaddr})"),
    sfr: Expansion::Template("_sfr {name} = {addr}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("volatile unsigned char _xdata {name} _at {addr}"),
    sfr16: Expansion::Template("_sfrword {name} = {addr}"),
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for CrosswareModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["_XC51_VER"]
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
        CrosswareModule.dialect(&DefineSet::new())
    }

    #[test]
    fn expands_registers_with_assignment_syntax() {
        let dialect = dialect();
        assert_eq!(
            dialect.sbit("P0_1", 0x80, 1).unwrap(),
            "_sfrbit P0_1 = (0x81)"
        );
        assert_eq!(dialect.sfr("P0", 0x80).unwrap(), "_sfr P0 = 0x80");
        assert_eq!(
            dialect.sfrx("CPUCS", 0xE600).unwrap(),
            "volatile unsigned char _xdata CPUCS _at 0xE600"
        );
        assert_eq!(dialect.sfr16("TMR2", 0xCC).unwrap(), "_sfrword TMR2 = 0xCC");
    }

    #[test]
    fn has_no_32_bit_registers() {
        assert!(!dialect().supports(EntryPoint::Sfr32));
    }
}
