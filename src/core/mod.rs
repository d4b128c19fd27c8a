// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Toolchain-agnostic generator core.
//!
//! This module provides the infrastructure shared by every toolchain target:
//! the dialect descriptors, the define-driven selection registry, and the
//! register description front end.
//!
//! # Components
//!
//! - [`toolchain`] - Toolchain identifiers and preprocessor-style define sets
//! - [`dialect`] - Per-toolchain expansion templates and rendering
//! - [`registry`] - Toolchain module registration and dialect selection
//! - [`text_utils`] - Identifier and whitespace classification
//! - [`tokenizer`] - Token scanning for register description lines
//! - [`parser`] - Declaration parsing with range checking
//! - [`error`] - Error and diagnostic types shared across the generator

pub mod dialect;
pub mod error;
pub mod parser;
pub mod registry;
pub mod text_utils;
pub mod tokenizer;
pub mod toolchain;

// Re-exports for convenience
pub use dialect::{Dialect, EntryPoint, Expansion, Unsupported};
pub use error::{Diagnostic, GenError, GenErrorKind, Severity};
pub use parser::{parse_line, Declaration, ParseError};
pub use registry::{RegistryError, Selection, ToolchainModule, ToolchainRegistry};
pub use tokenizer::{Span, Token, TokenKind, TokenizeError, Tokenizer};
pub use toolchain::{DefineSet, ToolchainId};
