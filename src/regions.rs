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

//! Region annotations: known code and pointer-table spans.
//!
//! A `code` region is executable code that logically belongs to its
//! reference bank, so addresses it uses resolve there. A `ptrtbl` region
//! holds 16-bit pointers into its reference bank.

use std::fmt;

/// What an annotated span contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    Code,
    PointerTable,
    /// Any other tag from the feed. Kept, but no pattern uses it.
    Other(String),
}

impl RegionKind {
    /// Map a feed tag to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "code" => RegionKind::Code,
            "ptrtbl" => RegionKind::PointerTable,
            other => RegionKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionKind::Code => write!(f, "code"),
            RegionKind::PointerTable => write!(f, "ptrtbl"),
            RegionKind::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// A known span `[ptr, ptr + len)` in `bank`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: RegionKind,
    pub bank: u16,
    pub ptr: u16,
    pub ref_bank: u16,
    pub len: u32,
}

impl Annotation {
    /// Does this span cover `bank:ptr`?
    pub fn contains(&self, bank: u16, ptr: u16) -> bool {
        self.bank == bank && ptr >= self.ptr && u32::from(ptr) < u32::from(self.ptr) + self.len
    }
}

/// Lookup over the annotation feed.
///
/// Spans are expected not to overlap; if they do, the first one in feed
/// order wins.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    annotations: Vec<Annotation>,
}

impl RegionIndex {
    /// Build an index, keeping feed order.
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }

    /// The first annotation covering `bank:ptr`.
    pub fn lookup(&self, bank: u16, ptr: u16) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.contains(bank, ptr))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }
}
