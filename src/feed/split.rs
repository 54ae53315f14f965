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

//! Difference row splitting.
//!
//! The classifier looks at one operand at a time, so a comparison table
//! has to list differences in chunks of at most two bytes. Comparison
//! tools report whole runs; this rewrites each wide `Difference` row as
//! a sequence of two-byte rows (the last one a single byte for odd
//! lengths). Other rows pass through unchanged.

use super::{
    lines_with_offsets, read_rows, split_fields, RowKind, ADDRESS_A, ADDRESS_B, KIND, SIZE_A,
    SIZE_B,
};
use crate::error::{BankdiffError, ErrorCode, Result};

/// Rows are written with the spreadsheet line terminator.
pub const LINE_END: &str = "\r\n";

/// Split every wide difference row of a comparison table.
///
/// Fails when a row to split has different sizes on both sides, since
/// two-byte chunks could not line up.
pub fn split_rows(text: &str) -> Result<String> {
    let mut output = String::new();

    if let Some((start, header)) = lines_with_offsets(text).next() {
        push_row(&mut output, split_fields(header, start)?.iter().map(|f| f.value.as_str()));
    }

    for row in read_rows(text)? {
        let values = || row.fields.iter().map(|f| f.value.as_str());

        if row.kind != RowKind::Difference {
            push_row(&mut output, values());
            continue;
        }

        let mut addr_a = row.required(ADDRESS_A)?;
        let mut size_a = row.required(SIZE_A)?;
        let mut addr_b = row.required(ADDRESS_B)?;
        let size_b = row.required(SIZE_B)?;

        if size_a <= 2 && size_b <= 2 {
            push_row(&mut output, values());
            continue;
        }

        if size_a != size_b {
            return Err(BankdiffError::new(
                ErrorCode::UnequalMatchLengths,
                format!(
                    "Unequal match lengths: {:X}h bytes in A, {:X}h bytes in B",
                    size_a, size_b
                ),
                row.span,
            )
            .with_hint("split the row by hand into a difference and an 'Only in' row"));
        }

        let kind = row.fields[KIND].value.as_str();
        while size_a > 0 {
            let chunk = size_a.min(2);
            let fields = [
                kind.to_string(),
                format!("{:X}h", addr_a),
                format!("{:X}h", chunk),
                format!("{:X}h", addr_b),
                format!("{:X}h", chunk),
            ];
            push_row(&mut output, fields.iter().map(String::as_str));

            size_a -= chunk;
            addr_a += 2;
            addr_b += 2;
        }
    }

    Ok(output)
}

fn push_row<'a>(output: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            output.push(',');
        }
        first = false;

        if field.contains([',', '"', '\n', '\r']) {
            output.push('"');
            output.push_str(&field.replace('"', "\"\""));
            output.push('"');
        } else {
            output.push_str(field);
        }
    }
    output.push_str(LINE_END);
}
