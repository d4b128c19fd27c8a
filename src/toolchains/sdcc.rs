// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SDCC toolchain: Small Device C Compiler, <http://sdcc.sf.net>.
//!
//! SDCC is the only toolchain here with the full multi-byte register
//! vocabulary: `__sfr16`/`__sfr32` take all constituent byte addresses
//! packed into a single literal, low byte in the low bits.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct SdccModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("sdcc");
pub const TOOLCHAIN_NAME: &str = "SDCC";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("__sbit __at({bitaddr}) {name}"),
    sfr: Expansion::Template("__sfr __at({addr}) {name}"),
    sfrbit: Expansion::Unsupported,
    sfrx: Expansion::Template("__xdata volatile unsigned char __at({addr}) {name}"),
    sfr16: Expansion::Template("__sfr16 __at({packed}) {name}"),
    sfr16e: Expansion::Template("__sfr16 __at({fulladdr}) {name}"),
    sfr32: Expansion::Template("__sfr32 __at({packed}) {name}"),
    sfr32e: Expansion::Template("__sfr32 __at({fulladdr}) {name}"),
    asm: Expansion::Template("{code}"),
    asm_begin: Expansion::Template("__asm"),
    asm_end: Expansion::Template("__endasm"),
    extra_defines: &[],
};

impl ToolchainModule for SdccModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &["SDCC", "__SDCC"]
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}
