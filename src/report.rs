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

//! The trimmed difference report.

use std::fmt;

use crate::address::BankPtr;
use crate::records::{DiffRecord, Run};

/// One line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Insertion(Run),
    Deletion(Run),
    Difference(DiffRecord),
}

impl Entry {
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Insertion(_) => "Insertion",
            Entry::Deletion(_) => "Deletion",
            Entry::Difference(_) => "Difference",
        }
    }

    /// A-side location, length, B-side location, length.
    pub fn sides(&self) -> (BankPtr, u32, BankPtr, u32) {
        match self {
            Entry::Insertion(run) | Entry::Deletion(run) => (run.a, run.len, run.b, run.len),
            Entry::Difference(record) => (record.a, record.len_a, record.b, record.len_b),
        }
    }

    /// Sort key: the A-side linear address.
    pub fn linear_a(&self) -> u32 {
        self.sides().0.linear()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, len_a, b, len_b) = self.sides();
        write!(
            f,
            "{:<12} at A {} - {:>2} -- B: {} - {:>2}",
            self.kind(),
            a,
            len_a,
            b,
            len_b
        )
    }
}

/// Entries ordered by A-side address, plus summary counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<Entry>,
    /// Differences kept after reconciliation.
    pub retained: usize,
    /// Differences looked at.
    pub checked: usize,
}

impl Report {
    /// Merge insertions, deletions and retained differences.
    ///
    /// Entries at the same address keep that relative order.
    pub fn merge<'r>(
        insertions: &[Run],
        deletions: &[Run],
        retained: impl IntoIterator<Item = &'r DiffRecord>,
        checked: usize,
    ) -> Self {
        let mut entries: Vec<Entry> = insertions
            .iter()
            .copied()
            .map(Entry::Insertion)
            .chain(deletions.iter().copied().map(Entry::Deletion))
            .collect();
        let before = entries.len();
        entries.extend(retained.into_iter().copied().map(Entry::Difference));
        let retained = entries.len() - before;

        entries.sort_by_key(Entry::linear_a);

        Self {
            entries,
            retained,
            checked,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(Entry::to_string)
    }

    /// The report as text, one entry per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for line in self.lines() {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    pub fn summary(&self) -> String {
        format!("retained/checked {}/{}", self.retained, self.checked)
    }
}
