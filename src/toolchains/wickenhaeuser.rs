// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Wickenhaeuser uC51 toolchain, <http://www.wickenhaeuser.de>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct WickenhaeuserModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("wickenhaeuser");
pub const TOOLCHAIN_NAME: &str = "Wickenhaeuser uC51";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{addr}"),
    sbit: Expansion::Template("unsigned char bit {name} @ ({bitaddr})"),
    sfr: Expansion::Template("near unsigned char {name} @ {addr}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("xdata volatile unsigned char {name} @ {addr}"),
    sfr16: Expansion::Unsupported,
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for WickenhaeuserModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["__UC__"]
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}
