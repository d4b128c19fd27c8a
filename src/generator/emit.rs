// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! C header assembly from rendered declarations.

use std::path::Path;

use crate::core::dialect::{Dialect, Unsupported};
use crate::core::parser::Declaration;
use crate::core::text_utils::to_upper;

use super::cli::VERSION;

/// Include guard symbol derived from a header filename: the stem uppercased,
/// non-alphanumerics replaced by underscores, a leading underscore when the
/// stem starts with a digit, and a `_H` suffix.
pub fn include_guard_from_filename(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("header");
    let mut guard = String::with_capacity(stem.len() + 3);
    if stem.as_bytes().first().map_or(false, |b| b.is_ascii_digit()) {
        guard.push('_');
    }
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            guard.push(c);
        } else {
            guard.push('_');
        }
    }
    guard.push_str("_H");
    to_upper(&guard)
}

/// Renders one declaration in the dialect's syntax. Vectors become `#define`
/// lines; everything else is a C declaration with a trailing semicolon.
pub fn render_declaration(dialect: &Dialect, decl: &Declaration) -> Result<String, Unsupported> {
    let text = match decl {
        Declaration::Vect {
            name, num, addr, ..
        } => {
            let value = dialect.vect(*num, *addr)?;
            return Ok(format!("#define {name} {value}"));
        }
        Declaration::Sbit {
            name, addr, bit, ..
        } => dialect.sbit(name, *addr, *bit)?,
        Declaration::Sfr { name, addr, .. } => dialect.sfr(name, *addr)?,
        Declaration::SfrBit {
            name, addr, bits, ..
        } => {
            let fields: [&str; 8] = [
                &bits[0], &bits[1], &bits[2], &bits[3], &bits[4], &bits[5], &bits[6], &bits[7],
            ];
            dialect.sfrbit(name, *addr, &fields)?
        }
        Declaration::Sfrx { name, addr, .. } => dialect.sfrx(name, *addr)?,
        Declaration::Sfr16 { name, addr, .. } => dialect.sfr16(name, *addr)?,
        Declaration::Sfr16E {
            name, fulladdr, ..
        } => dialect.sfr16e(name, *fulladdr)?,
        Declaration::Sfr32 { name, addr, .. } => dialect.sfr32(name, *addr)?,
        Declaration::Sfr32E {
            name, fulladdr, ..
        } => dialect.sfr32e(name, *fulladdr)?,
    };
    Ok(format!("{text};"))
}

/// Assembles the complete header text: banner, include guard, companion
/// defines, the multi-byte access caveat when any SFR16/SFR32 form is
/// present, and the rendered declaration lines.
pub fn emit_header(
    dialect: &Dialect,
    display_name: &str,
    guard: &str,
    lines: &[String],
    multi_byte: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("// Generated by sfrForge v{VERSION}\n"));
    out.push_str(&format!("// Toolchain: {display_name}\n"));
    out.push('\n');
    out.push_str(&format!("#ifndef {guard}\n"));
    out.push_str(&format!("#define {guard}\n"));
    if !dialect.extra_defines().is_empty() {
        out.push('\n');
        for define in dialect.extra_defines() {
            out.push_str(&format!("#define {define}\n"));
        }
    }
    if multi_byte {
        out.push('\n');
        out.push_str(
            "// SFR16/SFR32 registers are not read or written atomically; the byte\n\
             // access order is undefined. Access hardware with latching semantics\n\
             // byte-wise instead.\n",
        );
    }
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("#endif // {guard}\n"));
    out
}
