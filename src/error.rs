// Bankdiff - Filters shift-induced noise out of bank-switched ROM revision diffs
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Error and warning types for bankdiff.
//!
//! Fatal input problems are [`BankdiffError`]s and abort the run.
//! Everything that only deserves a second look by a human is a
//! [`Warning`] and is collected next to the results.

use thiserror::Error;

/// A byte range in a feed's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Error codes for fatal input problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Feed format errors (E001-E009)
    InvalidHexField,
    MissingField,
    MissingColumn,
    UnterminatedQuote,

    // Structural errors (E010-E019)
    UnequalMatchLengths,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidHexField => "E001",
            ErrorCode::MissingField => "E002",
            ErrorCode::MissingColumn => "E003",
            ErrorCode::UnterminatedQuote => "E004",
            ErrorCode::UnequalMatchLengths => "E010",
        }
    }
}

/// A fatal error with the location of the offending feed bytes.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct BankdiffError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The feed span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl BankdiffError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for bankdiff operations.
pub type Result<T> = std::result::Result<T, BankdiffError>;

/// Codes for non-fatal findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    // Feed warnings (W001-W009)
    UnknownRowKind,
    InvalidRegionSpan,

    // Reconciliation warnings (W010-W019)
    OutOfBankA,
    OutOfBankB,
    CrossSpaceAccess,
}

impl WarningCode {
    /// Get the numeric code for this warning.
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnknownRowKind => "W001",
            WarningCode::InvalidRegionSpan => "W002",
            WarningCode::OutOfBankA => "W010",
            WarningCode::OutOfBankB => "W011",
            WarningCode::CrossSpaceAccess => "W012",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A finding that does not stop the run.
///
/// Feed warnings point at feed text. Reconciliation warnings have no span
/// and name the ROM location in the message instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    pub span: Option<Span>,
}

impl Warning {
    /// Create a warning attached to feed text.
    pub fn at(code: WarningCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span: Some(span),
        }
    }

    /// Create a warning without a feed location.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
        }
    }
}

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in feed text.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = floor_char_boundary(source, offset.min(source.len()));
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end]
            .trim_end_matches('\r')
            .to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Render the `--> file:line:col` block with an underline.
fn format_context(output: &mut String, span: Span, source: &str, filename: &str) {
    let loc = SourceLocation::from_offset(source, span.start);

    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));
}

/// Format an error with feed context.
pub fn format_error(error: &BankdiffError, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");
    let mut output = format!("error[{}]: {}\n", error.code_str(), error.message);

    format_context(&mut output, error.span, source, filename);

    if let Some(hint) = &error.hint {
        output.push_str(&format!("  = hint: {}\n", hint));
    }

    output
}

/// Format a warning, with feed context when it has a span.
pub fn format_warning(warning: &Warning, source: &str, filename: Option<&str>) -> String {
    let mut output = format!("warning[{}]: {}\n", warning.code.code(), warning.message);

    if let Some(span) = warning.span {
        format_context(&mut output, span, source, filename.unwrap_or("<input>"));
    }

    output
}
