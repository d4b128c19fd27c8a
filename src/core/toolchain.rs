// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Toolchain identifiers and predefined-macro sets.
//!
//! This module intentionally avoids hardcoding specific toolchains. Toolchain
//! modules define their own identifiers and expose them through the registry.

use std::collections::HashMap;

use crate::core::error::{GenError, GenErrorKind};

/// Identifier for a compiler toolchain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToolchainId(&'static str);

impl ToolchainId {
    /// Create a new toolchain identifier.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Return the identifier string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// A set of predefined macros, as given with `-D NAME[=VAL]`.
///
/// Toolchain detection inspects this set for identity macros. Values matter
/// in two places: version-gated capabilities (Tasking keys support on the
/// numeric value of `_CC51`) and value-truthy identity tests (IAR).
#[derive(Debug, Default, Clone)]
pub struct DefineSet {
    defines: HashMap<String, String>,
}

impl DefineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a define set from `-D NAME[=VAL]` arguments.
    /// A missing value defaults to `1`.
    pub fn from_args(args: &[String]) -> Result<Self, GenError> {
        let mut set = Self::new();
        for arg in args {
            set.insert_arg(arg)?;
        }
        Ok(set)
    }

    /// Insert one `NAME[=VAL]` argument.
    pub fn insert_arg(&mut self, arg: &str) -> Result<(), GenError> {
        let (name, value) = match arg.split_once('=') {
            Some((name, value)) => (name, value),
            None => (arg, "1"),
        };
        if name.is_empty() {
            return Err(GenError::new(
                GenErrorKind::Cli,
                "Invalid -D/--define; NAME must not be empty",
                Some(arg),
            ));
        }
        self.define(name, value);
        Ok(())
    }

    pub fn define(&mut self, name: &str, value: &str) {
        self.defines.insert(name.to_string(), value.to_string());
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.defines.get(name).map(|s| s.as_str())
    }

    /// Numeric value of a define, decimal or `0x` hex. None when the define
    /// is absent or not a number.
    pub fn int_value(&self, name: &str) -> Option<i64> {
        let value = self.value(name)?;
        parse_int(value)
    }

    /// Preprocessor-style truth test: defined with a nonzero numeric value.
    /// Non-numeric values count as zero, matching `#if` on an unknown token.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.int_value(name).is_some_and(|v| v != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    text.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_without_value_defaults_to_one() {
        let set = DefineSet::from_args(&["SDCC".to_string()]).expect("parse defines");
        assert!(set.is_defined("SDCC"));
        assert_eq!(set.value("SDCC"), Some("1"));
        assert_eq!(set.int_value("SDCC"), Some(1));
    }

    #[test]
    fn define_with_value() {
        let set = DefineSet::from_args(&["_CC51=72".to_string()]).expect("parse defines");
        assert_eq!(set.value("_CC51"), Some("72"));
        assert_eq!(set.int_value("_CC51"), Some(72));
    }

    #[test]
    fn define_with_hex_value() {
        let set = DefineSet::from_args(&["VER=0x10".to_string()]).expect("parse defines");
        assert_eq!(set.int_value("VER"), Some(16));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = DefineSet::from_args(&["=1".to_string()]).unwrap_err();
        assert_eq!(err.kind(), GenErrorKind::Cli);
    }

    #[test]
    fn truthy_requires_nonzero_numeric_value() {
        let mut set = DefineSet::new();
        set.define("__IAR_SYSTEMS_ICC__", "8");
        assert!(set.is_truthy("__IAR_SYSTEMS_ICC__"));
        set.define("__IAR_SYSTEMS_ICC__", "0");
        assert!(!set.is_truthy("__IAR_SYSTEMS_ICC__"));
        set.define("__IAR_SYSTEMS_ICC__", "yes");
        assert!(!set.is_truthy("__IAR_SYSTEMS_ICC__"));
        assert!(!set.is_truthy("UNDEFINED"));
    }
}
