// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for the generator.

use std::fmt;

use crate::core::parser::ParseError;
use crate::reporter::format_parse_error;

/// Categories of generator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenErrorKind {
    Cli,
    Declaration,
    Dialect,
    Generator,
    Io,
    Parser,
    Toolchain,
}

/// A generator error with a kind and message.
#[derive(Debug, Clone)]
pub struct GenError {
    kind: GenErrorKind,
    message: String,
}

impl GenError {
    pub fn new(kind: GenErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> GenErrorKind {
        self.kind
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenError {}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A diagnostic message with location and context.
///
/// Line numbers are 1-based; line 0 marks a file-scope diagnostic with no
/// source position (toolchain fallback, unreadable input).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub(crate) line: u32,
    pub(crate) column: Option<usize>,
    pub(crate) severity: Severity,
    pub(crate) error: GenError,
    pub(crate) file: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) parser_error: Option<ParseError>,
}

impl Diagnostic {
    pub fn new(line: u32, severity: Severity, error: GenError) -> Self {
        Self {
            line,
            column: None,
            severity,
            error,
            file: None,
            source: None,
            parser_error: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &GenError {
        &self.error
    }

    pub fn with_column(mut self, column: Option<usize>) -> Self {
        self.column = column;
        self
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn with_parser_error(mut self, parser_error: Option<ParseError>) -> Self {
        self.parser_error = parser_error;
        self
    }

    pub fn format(&self) -> String {
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        if self.line == 0 {
            return format!("{sev} - {}", self.error.message());
        }
        format!("{}: {} - {}", self.line, sev, self.error.message())
    }

    pub fn format_with_context(&self, lines: Option<&[String]>, use_color: bool) -> String {
        if let Some(parser_error) = &self.parser_error {
            return format_parse_error(parser_error, self.file.as_deref(), lines, use_color);
        }
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        let header = match (&self.file, self.line) {
            (Some(file), 0) => format!("{file}: {sev}"),
            (Some(file), line) => format!("{file}:{line}: {sev}"),
            (None, 0) => sev.to_string(),
            (None, line) => format!("{line}: {sev}"),
        };

        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');

        if self.line > 0 {
            let context = build_context_lines(
                self.line,
                self.column,
                lines,
                self.source.as_deref(),
                use_color,
            );
            for line in context {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out.push_str(&format!("{sev}: {}", self.error.message()));
        out
    }
}

/// Report from a successful generator run.
#[derive(Debug)]
pub struct GenRunReport {
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
}

impl GenRunReport {
    pub fn new(diagnostics: Vec<Diagnostic>, source_lines: Vec<String>) -> Self {
        Self {
            diagnostics,
            source_lines,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Error from a failed generator run.
#[derive(Debug)]
pub struct GenRunError {
    error: GenError,
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
}

impl GenRunError {
    pub fn new(error: GenError, diagnostics: Vec<Diagnostic>, source_lines: Vec<String>) -> Self {
        Self {
            error,
            diagnostics,
            source_lines,
        }
    }

    pub fn error(&self) -> &GenError {
        &self.error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }
}

impl fmt::Display for GenRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for GenRunError {}

/// Build context lines for error display.
pub fn build_context_lines(
    line_num: u32,
    column: Option<usize>,
    lines: Option<&[String]>,
    source_override: Option<&str>,
    use_color: bool,
) -> Vec<String> {
    let mut out = Vec::new();
    let line_idx = line_num.saturating_sub(1) as usize;

    if let Some(source) = source_override {
        let highlighted = highlight_line(source, column, use_color);
        out.push(format!("{:>5} | {}", line_num, highlighted));
        return out;
    }

    let lines = match lines {
        Some(lines) if !lines.is_empty() => lines,
        _ => {
            out.push(format!("{:>5} | <source unavailable>", line_num));
            return out;
        }
    };

    if line_idx >= lines.len() {
        out.push(format!("{:>5} | <source unavailable>", line_num));
        return out;
    }

    let line = &lines[line_idx];
    let display = highlight_line(line, column, use_color);
    out.push(format!("{:>5} | {}", line_num, display));

    out
}

fn highlight_line(line: &str, column: Option<usize>, use_color: bool) -> String {
    crate::reporter::highlight_line(line, column, use_color)
}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_format_includes_line_and_severity() {
        let err = GenError::new(GenErrorKind::Generator, "Bad thing", None);
        let diag = Diagnostic::new(12, Severity::Error, err);
        assert_eq!(diag.format(), "12: ERROR - Bad thing");
    }

    #[test]
    fn file_scope_diagnostic_omits_line_number() {
        let err = GenError::new(GenErrorKind::Toolchain, "No toolchain matched", None);
        let diag = Diagnostic::new(0, Severity::Warning, err).with_file(Some("fx2.sfr".to_string()));
        assert_eq!(diag.format(), "WARNING - No toolchain matched");
        let text = diag.format_with_context(None, false);
        assert!(text.starts_with("fx2.sfr: WARNING\n"));
        assert!(!text.contains("<source unavailable>"));
    }

    #[test]
    fn error_message_appends_param() {
        let err = GenError::new(GenErrorKind::Io, "Error opening file for write", Some("out.h"));
        assert_eq!(err.message(), "Error opening file for write: out.h");
    }
}
