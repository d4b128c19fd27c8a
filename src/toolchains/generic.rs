// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Fallback module for unrecognized toolchains.
//!
//! Declarations keep their names and widths but lose their address bindings,
//! so code written against the generated header still compiles for desktop
//! testing or unsupported compilers. The registry flags any selection of this
//! module so the generator can warn about it; it never matches a define set
//! on its own.

use crate::core::dialect::{Dialect, Expansion};
use crate::core::registry::ToolchainModule;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub struct GenericModule;

pub const TOOLCHAIN_ID: ToolchainId = ToolchainId::new("generic");
pub const TOOLCHAIN_NAME: &str = "Generic (no address binding)";

static DIALECT: Dialect = Dialect {
    toolchain: TOOLCHAIN_ID,
    vect: Expansion::Template("{num}"),
    sbit: Expansion::Template("volatile bool {name}"),
    sfr: Expansion::Template("volatile unsigned char {name}"),
    sfrbit: Expansion::Template("volatile unsigned char {name}"),
    sfrx: Expansion::Template("volatile unsigned char {name}"),
    sfr16: Expansion::Template("volatile unsigned short {name}"),
    sfr16e: Expansion::Template("volatile unsigned short {name}"),
    sfr32: Expansion::Template("volatile unsigned long {name}"),
    sfr32e: Expansion::Template("volatile unsigned long {name}"),
    asm: Expansion::Unsupported,
    asm_begin: Expansion::Unsupported,
    asm_end: Expansion::Unsupported,
    extra_defines: &[],
};

impl ToolchainModule for GenericModule {
    fn toolchain_id(&self) -> ToolchainId {
        TOOLCHAIN_ID
    }

    fn display_name(&self) -> &'static str {
        TOOLCHAIN_NAME
    }

    fn identity_symbols(&self) -> &'static [&'static str] {
        &[]
    }

    fn dialect(&self, _defines: &DefineSet) -> Dialect {
        DIALECT.clone()
    }
}
