// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Module registry for toolchain dialects.
//!
//! The registry holds one module per supported toolchain, in detection order,
//! and selects the dialect for a run either from the preprocessor-style
//! defines given on the command line or from an explicit toolchain name.
//! Selection is total: when no identity macro matches, the generic fallback
//! is chosen and the selection is flagged so callers can warn about it.

use std::fmt;

use crate::core::dialect::Dialect;
use crate::core::toolchain::{DefineSet, ToolchainId};

pub trait ToolchainModule: Send + Sync {
    fn toolchain_id(&self) -> ToolchainId;

    /// Vendor name for listings and generated header banners.
    fn display_name(&self) -> &'static str;

    /// Identity macros the toolchain predefines about itself.
    fn identity_symbols(&self) -> &'static [&'static str];

    /// Whether the define set identifies this toolchain. The default accepts
    /// any defined identity symbol regardless of value.
    fn matches(&self, defines: &DefineSet) -> bool {
        self.identity_symbols()
            .iter()
            .any(|symbol| defines.is_defined(symbol))
    }

    fn dialect(&self, defines: &DefineSet) -> Dialect;
}

#[derive(Debug, Clone)]
pub enum RegistryError {
    UnknownToolchain {
        name: String,
        known: Vec<&'static str>,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownToolchain { name, known } => {
                write!(
                    f,
                    "Unknown toolchain '{}'. Known toolchains: {}",
                    name,
                    known.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// The outcome of dialect selection.
#[derive(Debug, Clone)]
pub struct Selection {
    pub dialect: Dialect,
    pub toolchain: ToolchainId,
    pub display_name: &'static str,
    /// True when no toolchain matched and the generic fallback was used.
    pub fallback: bool,
    /// Toolchains past the first match whose identity symbols also matched.
    pub extra_matches: Vec<ToolchainId>,
}

pub struct ToolchainRegistry {
    modules: Vec<Box<dyn ToolchainModule>>,
    fallback: Box<dyn ToolchainModule>,
}

impl Default for ToolchainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolchainRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            fallback: Box::new(crate::toolchains::generic::GenericModule),
        }
    }

    /// Registry with every built-in toolchain, in detection order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::toolchains::sdcc::SdccModule));
        registry.register(Box::new(crate::toolchains::keil::KeilModule));
        registry.register(Box::new(crate::toolchains::raisonance::RaisonanceModule));
        registry.register(Box::new(crate::toolchains::iar::IarModule));
        registry.register(Box::new(crate::toolchains::tasking::TaskingModule));
        registry.register(Box::new(crate::toolchains::hitech::HiTechModule));
        registry.register(Box::new(crate::toolchains::crossware::CrosswareModule));
        registry.register(Box::new(
            crate::toolchains::wickenhaeuser::WickenhaeuserModule,
        ));
        registry
    }

    pub fn register(&mut self, module: Box<dyn ToolchainModule>) {
        self.modules.push(module);
    }

    /// Selects a dialect from the define set. The first matching toolchain
    /// in registration order wins; later matches are reported so callers can
    /// flag contradictory defines. With no match at all the generic fallback
    /// is selected.
    pub fn select(&self, defines: &DefineSet) -> Selection {
        let mut matching = self.modules.iter().filter(|module| module.matches(defines));
        match matching.next() {
            Some(module) => Selection {
                dialect: module.dialect(defines),
                toolchain: module.toolchain_id(),
                display_name: module.display_name(),
                fallback: false,
                extra_matches: matching.map(|module| module.toolchain_id()).collect(),
            },
            None => Selection {
                dialect: self.fallback.dialect(defines),
                toolchain: self.fallback.toolchain_id(),
                display_name: self.fallback.display_name(),
                fallback: true,
                extra_matches: Vec::new(),
            },
        }
    }

    /// Selects a toolchain by name, bypassing identity macro matching.
    /// Names are compared case-insensitively.
    pub fn resolve(&self, name: &str, defines: &DefineSet) -> Result<Selection, RegistryError> {
        let module = self
            .modules()
            .find(|module| module.toolchain_id().as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| RegistryError::UnknownToolchain {
                name: name.to_string(),
                known: self.known_names(),
            })?;
        Ok(Selection {
            dialect: module.dialect(defines),
            toolchain: module.toolchain_id(),
            display_name: module.display_name(),
            fallback: false,
            extra_matches: Vec::new(),
        })
    }

    /// All modules in detection order, with the generic fallback last.
    pub fn modules(&self) -> impl Iterator<Item = &dyn ToolchainModule> + '_ {
        self.modules
            .iter()
            .map(|module| module.as_ref())
            .chain(std::iter::once(self.fallback.as_ref()))
    }

    pub fn known_names(&self) -> Vec<&'static str> {
        self.modules()
            .map(|module| module.toolchain_id().as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defines(args: &[&str]) -> DefineSet {
        let owned: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        DefineSet::from_args(&owned).expect("defines")
    }

    #[test]
    fn first_match_in_detection_order_wins() {
        let registry = ToolchainRegistry::with_defaults();
        let selection = registry.select(&defines(&["__CX51__", "SDCC"]));
        assert_eq!(selection.toolchain.as_str(), "sdcc");
        assert!(!selection.fallback);
        assert_eq!(selection.extra_matches.len(), 1);
        assert_eq!(selection.extra_matches[0].as_str(), "keil");
    }

    #[test]
    fn either_sdcc_identity_symbol_matches() {
        let registry = ToolchainRegistry::with_defaults();
        assert_eq!(
            registry.select(&defines(&["SDCC"])).toolchain.as_str(),
            "sdcc"
        );
        assert_eq!(
            registry.select(&defines(&["__SDCC"])).toolchain.as_str(),
            "sdcc"
        );
    }

    #[test]
    fn falls_back_to_generic_without_matches() {
        let registry = ToolchainRegistry::with_defaults();
        let selection = registry.select(&defines(&["F_CPU=12000000"]));
        assert!(selection.fallback);
        assert_eq!(selection.toolchain.as_str(), "generic");
        assert!(selection.extra_matches.is_empty());
    }

    #[test]
    fn iar_identity_symbol_must_be_truthy() {
        let registry = ToolchainRegistry::with_defaults();
        let ignored = registry.select(&defines(&["__IAR_SYSTEMS_ICC__=0"]));
        assert!(ignored.fallback);
        let matched = registry.select(&defines(&["__IAR_SYSTEMS_ICC__=1"]));
        assert_eq!(matched.toolchain.as_str(), "iar");
    }

    #[test]
    fn resolve_matches_names_case_insensitively() {
        let registry = ToolchainRegistry::with_defaults();
        let selection = registry
            .resolve("Keil", &DefineSet::new())
            .expect("resolve");
        assert_eq!(selection.toolchain.as_str(), "keil");
        assert!(!selection.fallback);
    }

    #[test]
    fn resolve_finds_the_fallback_by_name() {
        let registry = ToolchainRegistry::with_defaults();
        let selection = registry
            .resolve("generic", &DefineSet::new())
            .expect("resolve");
        assert_eq!(selection.toolchain.as_str(), "generic");
        assert!(!selection.fallback);
    }

    #[test]
    fn resolve_reports_known_toolchains_for_unknown_names() {
        let registry = ToolchainRegistry::with_defaults();
        let err = registry.resolve("gcc", &DefineSet::new()).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Unknown toolchain 'gcc'"));
        assert!(text.contains("sdcc"));
        assert!(text.contains("generic"));
    }

    #[test]
    fn identity_symbols_do_not_overlap() {
        let registry = ToolchainRegistry::with_defaults();
        let mut seen: Vec<&str> = Vec::new();
        for module in registry.modules() {
            for symbol in module.identity_symbols() {
                assert!(
                    !seen.contains(symbol),
                    "identity symbol {symbol} claimed twice"
                );
                seen.push(symbol);
            }
        }
    }
}
