// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Keil C51 toolchain, <http://www.keil.com>.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct KeilModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("keil");
pub const TOOLCHAIN_NAME: &str = "Keil C51";

// The addr^bit form in SBIT is Keil source syntax, not arithmetic to fold.
static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("sbit {name} = {addr}^{bit}"),
    sfr: Expansion::Template("sfr {name} = {addr}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("volatile unsigned char xdata {name} _at_ {addr}"),
    sfr16: Expansion::Template("sfr16 {name} = {addr}"),
    sfr16e: Expansion::Unsupported,
    sfr32: Expansion::Unsupported,
    sfr32e: Expansion::Unsupported,
    asm: Expansion::Template("{code}"),
    asm_begin: Expansion::Template("__asm{"),
    asm_end: Expansion::Template("}"),
    extra_defines: &[],
};

impl ToolchainModule for KeilModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["__CX51__"]
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}
