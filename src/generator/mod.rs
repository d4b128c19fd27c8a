// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Register header generator - main entry point.
//!
//! This module ties together the toolchain-agnostic core with the
//! per-toolchain dialect modules: it selects a dialect, parses each register
//! description, and writes the resulting C header.

pub mod cli;
pub mod emit;


use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::core::dialect::{EntryPoint, Expansion};
use crate::core::error::{Diagnostic, GenError, GenErrorKind, GenRunError, GenRunReport, Severity};
use crate::core::parser::parse_line;
use crate::core::registry::{Selection, ToolchainRegistry};
use crate::core::toolchain::DefineSet;

use cli::{input_base_from_path, resolve_output_path, validate_cli, Cli, CliConfig};

// Re-export public types
pub use crate::core::error::{GenRunError as RunError, GenRunReport as RunReport};
pub use cli::VERSION;

/// Run the generator with command-line arguments.
pub fn run() -> Result<Vec<GenRunReport>, GenRunError> {
    let cli = Cli::parse();
    run_with(&cli)
}

/// Run the generator for an already-parsed command line.
pub fn run_with(cli: &Cli) -> Result<Vec<GenRunReport>, GenRunError> {
    let registry = ToolchainRegistry::with_defaults();

    if cli.list_toolchains {
        print!("{}", list_toolchains_text(&registry));
        return Ok(Vec::new());
    }

    let defines = DefineSet::from_args(&cli.defines)
        .map_err(|err| GenRunError::new(err, Vec::new(), Vec::new()))?;

    if cli.matrix {
        print!("{}", matrix_text(&registry, &defines));
        return Ok(Vec::new());
    }

    let config = validate_cli(cli)?;

    let selection = match cli.toolchain.as_deref() {
        Some(name) => registry.resolve(name, &defines).map_err(|err| {
            GenRunError::new(
                GenError::new(GenErrorKind::Toolchain, &err.to_string(), None),
                Vec::new(),
                Vec::new(),
            )
        })?,
        None => registry.select(&defines),
    };

    let mut reports = Vec::new();
    for infile in &cli.infiles {
        let report = run_one(cli, &config, &selection, infile)?;
        reports.push(report);
    }
    Ok(reports)
}

fn run_one(
    cli: &Cli,
    config: &CliConfig,
    selection: &Selection,
    infile: &Path,
) -> Result<GenRunReport, GenRunError> {
    let (sfr_name, base) = input_base_from_path(infile)?;

    let source = fs::read_to_string(infile).map_err(|err| {
        GenRunError::new(
            GenError::new(GenErrorKind::Io, &err.to_string(), Some(&sfr_name)),
            Vec::new(),
            Vec::new(),
        )
    })?;
    let source_lines: Vec<String> = source.lines().map(|line| line.to_string()).collect();

    let mut diagnostics = Vec::new();

    if selection.fallback {
        diagnostics.push(
            Diagnostic::new(
                0,
                Severity::Warning,
                GenError::new(
                    GenErrorKind::Toolchain,
                    "No toolchain identity macro matched; generating a generic header without address bindings",
                    None,
                ),
            )
            .with_file(Some(sfr_name.clone())),
        );
    }
    for extra in &selection.extra_matches {
        diagnostics.push(
            Diagnostic::new(
                0,
                Severity::Warning,
                GenError::new(
                    GenErrorKind::Toolchain,
                    "Defines also match another toolchain",
                    Some(extra.as_str()),
                ),
            )
            .with_file(Some(sfr_name.clone())),
        );
    }

    let mut declarations = Vec::new();
    for (idx, line) in source_lines.iter().enumerate() {
        let line_num = idx as u32 + 1;
        match parse_line(line, line_num) {
            Ok(Some(declaration)) => declarations.push(declaration),
            Ok(None) => {}
            Err(parse_error) => {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Error,
                        GenError::new(GenErrorKind::Parser, &parse_error.message, None),
                    )
                    .with_column(Some(parse_error.span.col_start))
                    .with_file(Some(sfr_name.clone()))
                    .with_source(Some(line.clone()))
                    .with_parser_error(Some(parse_error)),
                );
            }
        }
    }

    let mut lines = Vec::new();
    let mut multi_byte = false;
    for declaration in &declarations {
        if matches!(
            declaration.entry_point(),
            EntryPoint::Sfr16 | EntryPoint::Sfr16E | EntryPoint::Sfr32 | EntryPoint::Sfr32E
        ) {
            multi_byte = true;
        }
        match emit::render_declaration(&selection.dialect, declaration) {
            Ok(text) => lines.push(text),
            Err(unsupported) => {
                let severity = if cli.skip_unsupported {
                    Severity::Warning
                } else {
                    Severity::Error
                };
                let span = declaration.span();
                diagnostics.push(
                    Diagnostic::new(
                        span.line,
                        severity,
                        GenError::new(
                            GenErrorKind::Declaration,
                            &unsupported.to_string(),
                            Some(declaration.name()),
                        ),
                    )
                    .with_column(Some(span.col_start))
                    .with_file(Some(sfr_name.clone()))
                    .with_source(source_lines.get(span.line as usize - 1).cloned()),
                );
                if cli.skip_unsupported {
                    lines.push(format!("// {}: {}", declaration.name(), unsupported));
                }
            }
        }
    }

    let error_count = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity() == Severity::Error)
        .count();
    if error_count > 0 {
        return Err(GenRunError::new(
            GenError::new(
                GenErrorKind::Generator,
                "Errors detected in source. No header file created.",
                None,
            ),
            diagnostics,
            source_lines,
        ));
    }

    let out_name = match &config.out_dir {
        Some(dir) => dir.join(format!("{base}.h")).to_string_lossy().to_string(),
        None => resolve_output_path(&base, cli.outfile.as_deref(), "h"),
    };
    let guard = match &config.guard {
        Some(guard) => guard.clone(),
        None => emit::include_guard_from_filename(&PathBuf::from(&out_name)),
    };

    let header = emit::emit_header(
        &selection.dialect,
        selection.display_name,
        &guard,
        &lines,
        multi_byte,
    );
    if fs::write(&out_name, &header).is_err() {
        return Err(GenRunError::new(
            GenError::new(
                GenErrorKind::Io,
                "Error opening file for write",
                Some(&out_name),
            ),
            diagnostics,
            source_lines,
        ));
    }

    if cli.verbose {
        println!(
            "{}: {} declarations -> {} [{}]",
            sfr_name,
            declarations.len(),
            out_name,
            selection.display_name
        );
    }

    Ok(GenRunReport::new(diagnostics, source_lines))
}

/// One line per toolchain: name, vendor, and identity macros.
pub fn list_toolchains_text(registry: &ToolchainRegistry) -> String {
    let mut out = String::new();
    for module in registry.modules() {
        let symbols = module.identity_symbols().join(", ");
        let symbols = if symbols.is_empty() {
            "(fallback)".to_string()
        } else {
            symbols
        };
        out.push_str(&format!(
            "{:<14} {:<28} {}\n",
            module.toolchain_id().as_str(),
            module.display_name(),
            symbols
        ));
    }
    out
}

/// Support matrix: one row per toolchain, one column per entry point.
/// Rendered against the given defines, so version gates are visible.
pub fn matrix_text(registry: &ToolchainRegistry, defines: &DefineSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<14}", "toolchain"));
    for entry in EntryPoint::ALL {
        out.push_str(&format!(" {:>11}", entry.keyword()));
    }
    out.push('\n');
    for module in registry.modules() {
        let dialect = module.dialect(defines);
        out.push_str(&format!("{:<14}", module.toolchain_id().as_str()));
        for entry in EntryPoint::ALL {
            let mark = match dialect.expansion(entry) {
                Expansion::Template(_) => "yes",
                Expansion::Empty => "empty",
                Expansion::Unsupported => "-",
            };
            out.push_str(&format!(" {:>11}", mark));
        }
        out.push('\n');
    }
    out
}
