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

//! Sanctioned RAM remaps.

use crate::records::RamSwitch;

/// RAM address pairs that moved on purpose between revisions.
#[derive(Debug, Clone, Default)]
pub struct RamSwitchTable {
    switches: Vec<RamSwitch>,
}

impl RamSwitchTable {
    pub fn new(switches: Vec<RamSwitch>) -> Self {
        Self { switches }
    }

    /// Is `ptr_a -> ptr_b` one of the listed remaps?
    pub fn contains(&self, ptr_a: u16, ptr_b: u16) -> bool {
        self.switches
            .iter()
            .any(|s| s.ptr_a == u32::from(ptr_a) && s.ptr_b == u32::from(ptr_b))
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}
