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

//! RAM layout comparison reader.
//!
//! RAM is one flat space, so only the A-side cursor matters.

use super::{read_rows, RowKind, ADDRESS_A, ADDRESS_B, KIND, SIZE_A, SIZE_B};
use crate::error::{Result, Warning, WarningCode};
use crate::records::{RamDeletion, RamShift, RamSwitch};

/// Everything read from a RAM comparison table.
#[derive(Debug, Clone, Default)]
pub struct RamFeed {
    pub shifts: Vec<RamShift>,
    pub deletions: Vec<RamDeletion>,
    pub switches: Vec<RamSwitch>,
    pub warnings: Vec<Warning>,
}

/// Parse a RAM comparison table.
pub fn parse_ram_feed(text: &str) -> Result<RamFeed> {
    let mut feed = RamFeed::default();
    let mut cursor = 0u32;

    for row in read_rows(text)? {
        match &row.kind {
            RowKind::Match => {
                cursor = row.required(ADDRESS_A)? + row.required(SIZE_A)?;
            }
            RowKind::OnlyInB => {
                let size_b = row.required(SIZE_B)?;
                feed.shifts.push(RamShift {
                    ptr: cursor,
                    shift: size_b as i32,
                });
            }
            RowKind::OnlyInA => {
                let addr_a = row.required(ADDRESS_A)?;
                let size_a = row.required(SIZE_A)?;
                feed.shifts.push(RamShift {
                    ptr: addr_a + size_a,
                    shift: -(size_a as i32),
                });
                feed.deletions.push(RamDeletion {
                    ptr: addr_a,
                    len: size_a,
                });
                cursor = addr_a + size_a;
            }
            RowKind::Switch => {
                feed.switches.push(RamSwitch {
                    ptr_a: row.required(ADDRESS_A)?,
                    len_a: row.required(SIZE_A)?,
                    ptr_b: row.required(ADDRESS_B)?,
                    len_b: row.required(SIZE_B)?,
                });
            }
            RowKind::Difference | RowKind::Other(_) => {
                feed.warnings.push(Warning::at(
                    WarningCode::UnknownRowKind,
                    format!(
                        "Unknown RAM comparison type '{}'",
                        row.fields[KIND].value.trim()
                    ),
                    row.kind_span(),
                ));
            }
        }
    }

    Ok(feed)
}
