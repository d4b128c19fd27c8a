// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Hi-Tech C51 toolchain, <http://www.htsoft.com>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct HiTechModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("hitech");
pub const TOOLCHAIN_NAME: &str = "Hi-Tech C51";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{addr}"),
    sbit: Expansion::Template("volatile bit {name} @ ({bitaddr})"),
    sfr: Expansion::Template("volatile unsigned char {name} @ {addr}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("volatile far unsigned char {name} @ {addr}"),
    sfr16: Expansion::Unsupported,
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for HiTechModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["HI_TECH_C"]
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}
