// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Raisonance RC51 toolchain, <http://www.raisonance.com>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct RaisonanceModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("raisonance");
pub const TOOLCHAIN_NAME: &str = "Raisonance RC51";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("at ({bitaddr}) sbit {name}"),
    sfr: Expansion::Template("sfr at {addr} {name}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("xdata at {addr} volatile unsigned char {name}"),
    sfr16: Expansion::Template("sfr16 at {addr} {name}"),
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for RaisonanceModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["__RC51__"]
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
        RaisonanceModule.dialect(&DefineSet::new())
    }

    #[test]
    fn puts_the_address_before_the_name() {
        let dialect = dialect();
        assert_eq!(
            dialect.sbit("P0_1", 0x80, 1).unwrap(),
            "at (0x81) sbit P0_1"
        );
        assert_eq!(dialect.sfr("P0", 0x80).unwrap(), "sfr at 0x80 P0");
        assert_eq!(
            dialect.sfrx("CPUCS", 0xE600).unwrap(),
            "xdata at 0xE600 volatile unsigned char CPUCS"
        );
        assert_eq!(dialect.sfr16("TMR2", 0xCC).unwrap(), "sfr16 at 0xCC TMR2");
    }

    #[test]
    fn has_no_inline_assembly_embedding() {
        let dialect = dialect();
        assert!(!dialect.supports(EntryPoint::Asm));
        assert!(dialect.asm_begin().is_err());
    }
}
