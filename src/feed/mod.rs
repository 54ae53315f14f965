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

//! Readers for the text feeds that drive a reconciliation.
//!
//! - [`compare`] - the binary comparison table (matches, differences, gaps)
//! - [`ramshift`] - the RAM layout comparison table and its switches
//! - [`annotations`] - code and pointer-table regions
//! - [`split`] - normalizes wide difference rows into two-byte rows
//!
//! Both comparison tables share one shape: a header row, then rows of
//! `kind, addressA, sizeA, addressB, sizeB` with hex values written as
//! `1A2Bh`. An empty hex field means "absent".

pub mod annotations;
pub mod compare;
pub mod ramshift;
pub mod split;

pub use annotations::{parse_annotations, AnnotationFeed};
pub use compare::{parse_comparison, Comparison};
pub use ramshift::{parse_ram_feed, RamFeed};
pub use split::split_rows;

use crate::error::{BankdiffError, ErrorCode, Result, Span};

/// Column of the kind field.
pub const KIND: usize = 0;
/// Column of the revision A address.
pub const ADDRESS_A: usize = 1;
/// Column of the revision A size.
pub const SIZE_A: usize = 2;
/// Column of the revision B address.
pub const ADDRESS_B: usize = 3;
/// Column of the revision B size.
pub const SIZE_B: usize = 4;

/// Largest address or size a feed may hold. The sum of an address and a
/// size still decomposes into a 16-bit bank, and differences of two
/// values stay inside `i32`.
pub const MAX_VALUE: u32 = 0x1FFF_FFFF;

const COLUMNS: usize = 5;

/// What a table row says about its two byte ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Match,
    Difference,
    OnlyInA,
    OnlyInB,
    Switch,
    Other(String),
}

impl RowKind {
    /// Classify the kind column.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "Match" => RowKind::Match,
            "Difference" => RowKind::Difference,
            "Only in A" => RowKind::OnlyInA,
            "Only in B" => RowKind::OnlyInB,
            "Switch" => RowKind::Switch,
            other => RowKind::Other(other.to_string()),
        }
    }
}

/// One unquoted field and where it sits in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub value: String,
    pub span: Span,
}

/// A data row of a comparison table.
#[derive(Debug, Clone)]
pub struct FeedRow {
    pub kind: RowKind,
    pub fields: Vec<Field>,
    /// Span of the whole line, without its terminator.
    pub span: Span,
}

impl FeedRow {
    /// Parse a hex column, `None` when the field is empty.
    pub fn value(&self, column: usize) -> Result<Option<u32>> {
        parse_hex(&self.fields[column])
    }

    /// Parse a hex column that this row kind cannot do without.
    pub fn required(&self, column: usize) -> Result<u32> {
        let field = &self.fields[column];
        parse_hex(field)?.ok_or_else(|| {
            BankdiffError::new(
                ErrorCode::MissingField,
                format!(
                    "'{}' row is missing {}",
                    self.fields[KIND].value.trim(),
                    column_name(column)
                ),
                self.span,
            )
        })
    }

    /// The kind field's span, for warnings about the row.
    pub fn kind_span(&self) -> Span {
        self.fields[KIND].span
    }
}

fn column_name(column: usize) -> &'static str {
    match column {
        ADDRESS_A => "address A",
        SIZE_A => "size A",
        ADDRESS_B => "address B",
        SIZE_B => "size B",
        _ => "kind",
    }
}

/// Parse a hex value with its trailing `h`, e.g. `4C1AFh`.
///
/// An empty field, or a lone `h`, is an absent value.
pub fn parse_hex(field: &Field) -> Result<Option<u32>> {
    let text = field.value.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let digits = text
        .strip_suffix('h')
        .or_else(|| text.strip_suffix('H'))
        .ok_or_else(|| {
            BankdiffError::new(
                ErrorCode::InvalidHexField,
                format!("Hex field '{}' lacks its 'h' suffix", text),
                field.span,
            )
            .with_hint("hex values are written like 3FFFh")
        })?;
    if digits.is_empty() {
        return Ok(None);
    }

    match u32::from_str_radix(digits, 16) {
        Ok(value) if value <= MAX_VALUE => Ok(Some(value)),
        Ok(_) => Err(BankdiffError::new(
            ErrorCode::InvalidHexField,
            format!("Hex field '{}' is out of range", text),
            field.span,
        )
        .with_hint(format!("values go up to {:X}h", MAX_VALUE))),
        Err(_) => Err(BankdiffError::new(
            ErrorCode::InvalidHexField,
            format!("Invalid hex field '{}'", text),
            field.span,
        )),
    }
}

/// Split one line into comma-separated fields.
///
/// Fields may be wrapped in double quotes, with `""` standing for a
/// literal quote. `base` is the byte offset of the line in the feed.
pub fn split_fields(line: &str, base: usize) -> Result<Vec<Field>> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0;

    loop {
        let start = pos;
        if bytes.get(pos) == Some(&b'"') {
            let mut value = String::new();
            pos += 1;
            loop {
                match bytes.get(pos) {
                    None => {
                        return Err(BankdiffError::new(
                            ErrorCode::UnterminatedQuote,
                            "Unterminated quoted field",
                            Span::new(base + start, base + line.len()),
                        ));
                    }
                    Some(b'"') if bytes.get(pos + 1) == Some(&b'"') => {
                        value.push('"');
                        pos += 2;
                    }
                    Some(b'"') => {
                        pos += 1;
                        break;
                    }
                    Some(_) => {
                        if let Some(ch) = line[pos..].chars().next() {
                            value.push(ch);
                            pos += ch.len_utf8();
                        }
                    }
                }
            }
            let end = pos;
            // Anything between the closing quote and the comma is dropped
            while pos < bytes.len() && bytes[pos] != b',' {
                pos += 1;
            }
            fields.push(Field {
                value,
                span: Span::new(base + start, base + end),
            });
        } else {
            while pos < bytes.len() && bytes[pos] != b',' {
                pos += 1;
            }
            fields.push(Field {
                value: line[start..pos].to_string(),
                span: Span::new(base + start, base + pos),
            });
        }

        if pos >= bytes.len() {
            break;
        }
        pos += 1;
    }

    Ok(fields)
}

/// Iterate over the lines of `text` with their byte offsets.
///
/// Line terminators (`\n` or `\r\n`) are stripped.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

/// Read the data rows of a comparison table.
///
/// The first line is the header and is skipped, as are blank lines.
pub fn read_rows(text: &str) -> Result<Vec<FeedRow>> {
    let mut rows = Vec::new();

    for (start, line) in lines_with_offsets(text).skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let span = Span::new(start, start + line.len());
        let fields = split_fields(line, start)?;
        if fields.len() < COLUMNS {
            return Err(BankdiffError::new(
                ErrorCode::MissingColumn,
                format!("Expected {} columns, found {}", COLUMNS, fields.len()),
                span,
            )
            .with_hint("rows look like: Difference,1234h,2h,1236h,2h"));
        }

        rows.push(FeedRow {
            kind: RowKind::parse(&fields[KIND].value),
            fields,
            span,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str) -> Field {
        Field {
            value: text.to_string(),
            span: Span::new(0, text.len()),
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex(&field("4C1AFh")).unwrap(), Some(0x4C1AF));
        assert_eq!(parse_hex(&field("2H")).unwrap(), Some(2));
        assert_eq!(parse_hex(&field("h")).unwrap(), None);
        assert_eq!(parse_hex(&field("")).unwrap(), None);
        assert_eq!(parse_hex(&field(" 10h ")).unwrap(), Some(0x10));
    }

    #[test]
    fn test_parse_hex_errors() {
        let err = parse_hex(&field("12")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidHexField);
        assert!(err.hint.is_some());

        let err = parse_hex(&field("XYh")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidHexField);

        let err = parse_hex(&field("20000000h")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidHexField);
        assert!(err.message.contains("out of range"));
        assert_eq!(parse_hex(&field("1FFFFFFFh")).unwrap(), Some(MAX_VALUE));
    }

    #[test]
    fn test_row_kind() {
        assert_eq!(RowKind::parse("Only in A"), RowKind::OnlyInA);
        assert_eq!(RowKind::parse("Switch"), RowKind::Switch);
        assert_eq!(RowKind::parse("Moved"), RowKind::Other("Moved".to_string()));
    }

    #[test]
    fn test_split_fields_plain() {
        let fields = split_fields("Match,0h,10h,0h,10h", 100).unwrap();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[1].value, "0h");
        assert_eq!(fields[1].span, Span::new(106, 108));
    }

    #[test]
    fn test_split_fields_quoted() {
        let fields = split_fields("\"Only in B\",,,\"1A\"\"h\",2h", 0).unwrap();
        assert_eq!(fields[0].value, "Only in B");
        assert_eq!(fields[1].value, "");
        assert_eq!(fields[3].value, "1A\"h");
        assert_eq!(fields[4].value, "2h");
    }

    #[test]
    fn test_split_fields_trailing_comma() {
        let fields = split_fields("a,", 0).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].value, "");
    }

    #[test]
    fn test_split_fields_unterminated() {
        let err = split_fields("\"Only in A,1h", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnterminatedQuote);
    }

    #[test]
    fn test_read_rows_skips_header_and_blanks() {
        let text = "Type,Address A,Size A,Address B,Size B\r\n\r\nMatch,0h,10h,0h,10h\r\n";
        let rows = read_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Match);
        assert_eq!(rows[0].required(SIZE_B).unwrap(), 0x10);
    }

    #[test]
    fn test_read_rows_missing_column() {
        let err = read_rows("header\nMatch,0h,10h\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingColumn);
        assert_eq!(err.span, Span::new(7, 19));
    }

    #[test]
    fn test_required_field_missing() {
        let rows = read_rows("header\nOnly in B,h,h,20h,3h\n").unwrap();
        assert_eq!(rows[0].value(ADDRESS_A).unwrap(), None);
        let err = rows[0].required(SIZE_A).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert!(err.message.contains("size A"));
    }
}
