// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Toolchain modules, one per supported compiler vendor.
//!
//! Each module pairs a [`Dialect`](crate::core::dialect::Dialect) table with
//! the identity macros its compiler predefines about itself. SDCC, Keil,
//! Raisonance, IAR, Tasking, Hi-Tech, Crossware and Wickenhaeuser are
//! covered; Dunfield is not. Registration order in
//! [`ToolchainRegistry::with_defaults`] fixes the detection order.
//!
//! [`ToolchainRegistry::with_defaults`]: crate::core::registry::ToolchainRegistry::with_defaults

pub mod crossware;
pub mod generic;
pub mod hitech;
pub mod iar;
pub mod keil;
pub mod raisonance;
pub mod sdcc;
pub mod tasking;
pub mod wickenhaeuser;
