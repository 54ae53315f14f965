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

//! Shift ledgers.
//!
//! A ledger answers "how far has everything at this address moved?" by
//! summing every shift event located at or before the address. Events
//! are ordered by `(bank, pointer)`; for ROM this is the order a linear
//! scan of the comparison sees them in.
//!
//! The sum is kept as prefix totals, so a query is a binary search.

use crate::address::SWITCHABLE_WINDOW;
use crate::records::{RamShift, ShiftEvent};

/// Which address space a ledger keys its events on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Banked cartridge ROM, keyed on `(bank, pointer)`.
    Rom,
    /// Flat RAM/IO, keyed on `(0, address)`.
    Ram,
}

/// Cumulative shifts for one address space.
#[derive(Debug, Clone)]
pub struct ShiftLedger {
    space: Space,
    keys: Vec<(u16, u32)>,
    totals: Vec<i64>,
}

impl ShiftLedger {
    /// Ledger over ROM shift events.
    pub fn rom(events: &[ShiftEvent]) -> Self {
        let entries = events
            .iter()
            .map(|e| ((e.a.bank, u32::from(e.a.ptr)), e.shift));
        Self::build(Space::Rom, entries)
    }

    /// Ledger over RAM shift events.
    pub fn ram(events: &[RamShift]) -> Self {
        let entries = events.iter().map(|e| ((0, e.ptr), e.shift));
        Self::build(Space::Ram, entries)
    }

    fn build(space: Space, entries: impl Iterator<Item = ((u16, u32), i32)>) -> Self {
        let mut entries: Vec<_> = entries.collect();
        // Stable, so events at one location keep their feed order
        entries.sort_by_key(|(key, _)| *key);

        let mut running = 0i64;
        let (keys, totals) = entries
            .into_iter()
            .map(|(key, shift)| {
                running += i64::from(shift);
                (key, running)
            })
            .unzip();

        Self {
            space,
            keys,
            totals,
        }
    }

    pub fn space(&self) -> Space {
        self.space
    }

    /// Number of events in the ledger.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Total shift applied to `address` as seen from `bank`.
    ///
    /// In ROM, addresses below the switchable window always live in bank
    /// 0 whatever bank is asking. In RAM the bank is ignored.
    pub fn cumulative_shift(&self, bank: u16, address: u16) -> i64 {
        let bank = match self.space {
            Space::Rom if address >= SWITCHABLE_WINDOW => bank,
            Space::Rom | Space::Ram => 0,
        };
        let query = (bank, u32::from(address));

        let applied = self.keys.partition_point(|key| *key <= query);
        match applied {
            0 => 0,
            n => self.totals[n - 1],
        }
    }

    /// Iterate over `(bank, pointer, running total)` in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u32, i64)> + '_ {
        self.keys
            .iter()
            .zip(&self.totals)
            .map(|(&(bank, ptr), &total)| (bank, ptr, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::BankPtr;

    fn event(bank: u16, ptr: u16, shift: i32) -> ShiftEvent {
        ShiftEvent {
            a: BankPtr::new(bank, ptr),
            b: BankPtr::new(bank, ptr),
            shift,
        }
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = ShiftLedger::rom(&[]);
        assert!(ledger.is_empty());
        assert_eq!(ledger.cumulative_shift(0, 0x1234), 0);
        assert_eq!(ledger.cumulative_shift(5, 0x7FFF), 0);
    }

    #[test]
    fn test_event_applies_at_its_own_location() {
        let ledger = ShiftLedger::rom(&[event(0, 0x3003, -3)]);
        assert_eq!(ledger.cumulative_shift(0, 0x3002), 0);
        assert_eq!(ledger.cumulative_shift(0, 0x3003), -3);
        assert_eq!(ledger.cumulative_shift(0, 0x3FFF), -3);
    }

    #[test]
    fn test_home_bank_addresses_ignore_query_bank() {
        let ledger = ShiftLedger::rom(&[event(0, 0x0100, 2), event(3, 0x4100, 5)]);
        // $0200 lives in bank 0 no matter which bank refers to it
        assert_eq!(ledger.cumulative_shift(3, 0x0200), 2);
        assert_eq!(ledger.cumulative_shift(3, 0x4200), 7);
        assert_eq!(ledger.cumulative_shift(2, 0x4200), 2);
        assert_eq!(ledger.cumulative_shift(4, 0x4000), 7);
    }

    #[test]
    fn test_unsorted_events_are_ordered() {
        let ledger = ShiftLedger::rom(&[event(2, 0x4000, 1), event(1, 0x4000, 4)]);
        assert_eq!(ledger.cumulative_shift(1, 0x5000), 4);
        assert_eq!(ledger.cumulative_shift(2, 0x5000), 5);
    }

    #[test]
    fn test_events_at_same_location_all_apply() {
        let ledger = ShiftLedger::rom(&[event(1, 0x4010, 3), event(1, 0x4010, -1)]);
        assert_eq!(ledger.cumulative_shift(1, 0x4010), 2);
        let totals: Vec<_> = ledger.iter().map(|(_, _, total)| total).collect();
        assert_eq!(totals, vec![3, 2]);
    }

    #[test]
    fn test_ram_ledger_ignores_bank() {
        let ledger = ShiftLedger::ram(&[RamShift {
            ptr: 0xC100,
            shift: 2,
        }]);
        assert_eq!(ledger.space(), Space::Ram);
        assert_eq!(ledger.cumulative_shift(7, 0xC0FF), 0);
        assert_eq!(ledger.cumulative_shift(7, 0xC100), 2);
        assert_eq!(ledger.cumulative_shift(0, 0xFF80), 2);
    }
}
