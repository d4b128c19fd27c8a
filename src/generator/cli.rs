// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::core::error::{GenError, GenErrorKind, GenRunError};

pub const VERSION: &str = "1.0";

const LONG_ABOUT: &str = "8051 special function register header generator.

Reads register description files (.sfr) and emits a C header in the dialect of
the selected toolchain. The toolchain is selected from -D defines the same way
the target compiler would identify itself, or forced with -t/--toolchain.
When nothing matches, a generic header without address bindings is generated
and a warning is printed.
Output defaults to the input base name with a .h extension; use -o/--outfile
to override it. With multiple inputs, -o must be a directory.";

#[derive(Parser, Debug)]
#[command(
    name = "sfrForge",
    version = VERSION,
    about = "8051 special function register header generator",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'i',
        long = "infile",
        value_name = "FILE",
        action = ArgAction::Append,
        long_help = "Input register description file (repeatable). Files must end with .sfr."
    )]
    pub infiles: Vec<PathBuf>,
    #[arg(
        short = 'o',
        long = "outfile",
        value_name = "FILE|FOLDER",
        long_help = "Output header path. Defaults to the input base with a .h extension. With multiple inputs, FILE|FOLDER must be a directory."
    )]
    pub outfile: Option<String>,
    #[arg(
        short = 'D',
        long = "define",
        value_name = "NAME[=VAL]",
        action = ArgAction::Append,
        long_help = "Predefine a macro the way the target compiler would (repeatable). If VAL is omitted, defaults to 1. Toolchain identity macros given here drive dialect selection."
    )]
    pub defines: Vec<String>,
    #[arg(
        short = 't',
        long = "toolchain",
        value_name = "NAME",
        long_help = "Select the toolchain by name instead of detecting it from -D defines. Use --list-toolchains for the known names."
    )]
    pub toolchain: Option<String>,
    #[arg(
        long = "guard",
        value_name = "SYMBOL",
        long_help = "Include guard symbol for the generated header. Defaults to one derived from the output filename. Not allowed with multiple inputs."
    )]
    pub guard: Option<String>,
    #[arg(
        long = "skip-unsupported",
        action = ArgAction::SetTrue,
        long_help = "Emit a placeholder comment instead of failing when the selected toolchain cannot express a declaration."
    )]
    pub skip_unsupported: bool,
    #[arg(
        long = "list-toolchains",
        action = ArgAction::SetTrue,
        long_help = "List the known toolchains with their identity macros and exit."
    )]
    pub list_toolchains: bool,
    #[arg(
        long = "matrix",
        action = ArgAction::SetTrue,
        long_help = "Print the per-toolchain entry point support matrix and exit. Honors -D, so version-gated entries reflect the given defines."
    )]
    pub matrix: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::SetTrue,
        long_help = "Print a status line for each generated header."
    )]
    pub verbose: bool,
}

pub fn resolve_output_path(base: &str, name: Option<&str>, extension: &str) -> String {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return format!("{base}.{extension}"),
    };
    let path = PathBuf::from(name);
    if path.extension().is_none() {
        format!("{name}.{extension}")
    } else {
        name.to_string()
    }
}

pub fn input_base_from_path(path: &Path) -> Result<(String, String), GenRunError> {
    let sfr_name = path.to_string_lossy().to_string();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(name) => name,
        None => {
            return Err(GenRunError::new(
                GenError::new(GenErrorKind::Cli, "Invalid input file name", None),
                Vec::new(),
                Vec::new(),
            ))
        }
    };
    if !file_name.ends_with(".sfr") {
        return Err(GenRunError::new(
            GenError::new(GenErrorKind::Cli, "Input file must end with .sfr", None),
            Vec::new(),
            Vec::new(),
        ));
    }
    let base = file_name.strip_suffix(".sfr").unwrap_or(file_name);
    Ok((sfr_name, base.to_string()))
}

/// Validate CLI arguments and return parsed configuration.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, GenRunError> {
    if cli.infiles.is_empty() {
        return Err(GenRunError::new(
            GenError::new(
                GenErrorKind::Cli,
                "No input files specified. Use -i/--infile",
                None,
            ),
            Vec::new(),
            Vec::new(),
        ));
    }

    if cli.infiles.len() > 1 && cli.guard.is_some() {
        return Err(GenRunError::new(
            GenError::new(
                GenErrorKind::Cli,
                "Explicit --guard symbols are not allowed with multiple inputs",
                None,
            ),
            Vec::new(),
            Vec::new(),
        ));
    }

    let out_dir = match cli.outfile.as_deref() {
        Some(out) if cli.infiles.len() > 1 => {
            let out_path = PathBuf::from(out);
            if out_path.exists() && !out_path.is_dir() {
                return Err(GenRunError::new(
                    GenError::new(
                        GenErrorKind::Cli,
                        "-o/--outfile must be a directory when multiple inputs are provided",
                        None,
                    ),
                    Vec::new(),
                    Vec::new(),
                ));
            }
            if let Err(err) = fs::create_dir_all(&out_path) {
                return Err(GenRunError::new(
                    GenError::new(GenErrorKind::Io, &err.to_string(), Some(out)),
                    Vec::new(),
                    Vec::new(),
                ));
            }
            Some(out_path)
        }
        Some(out) if Path::new(out).is_dir() => Some(PathBuf::from(out)),
        _ => None,
    };

    Ok(CliConfig {
        out_dir,
        guard: cli.guard.clone(),
    })
}

/// Validated CLI configuration.
#[derive(Debug)]
pub struct CliConfig {
    pub out_dir: Option<PathBuf>,
    pub guard: Option<String>,
}
