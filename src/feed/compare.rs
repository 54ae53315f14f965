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

//! ROM comparison table reader.
//!
//! Turns the comparison rows into the difference records to check, the
//! shift events that rebuild the address remapping, and the insertions
//! and deletions that go straight into the report.
//!
//! Each side keeps a cursor at the end of the last range it has seen.
//! A gap that exists in only one revision has no address on the other
//! side, so the cursor stands in for it.

use log::trace;

use super::{read_rows, RowKind, ADDRESS_A, ADDRESS_B, KIND, SIZE_A, SIZE_B};
use crate::error::{Result, Warning, WarningCode};
use crate::records::{DiffRecord, Run, ShiftEvent};

/// Everything read from a ROM comparison table.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub differences: Vec<DiffRecord>,
    pub shifts: Vec<ShiftEvent>,
    pub insertions: Vec<Run>,
    pub deletions: Vec<Run>,
    pub warnings: Vec<Warning>,
}

/// Parse a ROM comparison table.
pub fn parse_comparison(text: &str) -> Result<Comparison> {
    let mut comparison = Comparison::default();
    let mut cursor_a = 0u32;
    let mut cursor_b = 0u32;

    for row in read_rows(text)? {
        match &row.kind {
            RowKind::Match => {
                cursor_a = row.required(ADDRESS_A)? + row.required(SIZE_A)?;
                cursor_b = row.required(ADDRESS_B)? + row.required(SIZE_B)?;
            }
            RowKind::Difference => {
                let addr_a = row.required(ADDRESS_A)?;
                let size_a = row.required(SIZE_A)?;
                let addr_b = row.required(ADDRESS_B)?;
                let size_b = row.required(SIZE_B)?;

                comparison
                    .differences
                    .push(DiffRecord::from_offsets(addr_a, size_a, addr_b, size_b));

                if size_a != size_b {
                    comparison.shifts.push(ShiftEvent::from_offsets(
                        addr_a + size_a,
                        addr_b + size_b,
                        size_b as i32 - size_a as i32,
                    ));
                }
                if size_a > size_b {
                    comparison
                        .deletions
                        .push(Run::from_offsets(addr_a, addr_b, size_a));
                } else if size_a < size_b {
                    comparison
                        .insertions
                        .push(Run::from_offsets(addr_a, addr_b, size_b));
                }

                cursor_a = addr_a + size_a;
                cursor_b = addr_b + size_b;
            }
            RowKind::OnlyInB => {
                let addr_b = row.required(ADDRESS_B)?;
                let size_b = row.required(SIZE_B)?;

                comparison
                    .shifts
                    .push(ShiftEvent::from_offsets(cursor_a, addr_b, size_b as i32));
                comparison
                    .insertions
                    .push(Run::from_offsets(cursor_a, addr_b, size_b));

                cursor_b = addr_b + size_b;
            }
            RowKind::OnlyInA => {
                let addr_a = row.required(ADDRESS_A)?;
                let size_a = row.required(SIZE_A)?;

                comparison.shifts.push(ShiftEvent::from_offsets(
                    addr_a + size_a,
                    cursor_b,
                    -(size_a as i32),
                ));
                comparison
                    .deletions
                    .push(Run::from_offsets(addr_a, cursor_b, size_a));

                cursor_a = addr_a + size_a;
            }
            RowKind::Switch | RowKind::Other(_) => {
                comparison.warnings.push(Warning::at(
                    WarningCode::UnknownRowKind,
                    format!(
                        "Unknown comparison type '{}'",
                        row.fields[KIND].value.trim()
                    ),
                    row.kind_span(),
                ));
            }
        }
    }

    trace!(
        "comparison: {} differences, {} shifts, {} insertions, {} deletions",
        comparison.differences.len(),
        comparison.shifts.len(),
        comparison.insertions.len(),
        comparison.deletions.len()
    );

    Ok(comparison)
}
