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

//! Property-based tests for bankdiff.
//!
//! These tests verify invariants that should hold for all inputs, using
//! proptest for random input generation.

use bankdiff::address::{compose, decompose, SWITCHABLE_WINDOW};
use bankdiff::feed::{Comparison, RamFeed};
use bankdiff::ledger::ShiftLedger;
use bankdiff::records::{DiffRecord, RamShift, Run, ShiftEvent};
use bankdiff::rom::RomImage;
use bankdiff::{trim, BankPtr, TrimConfig};
use proptest::prelude::*;

// ============================================================================
// Address Properties
// ============================================================================

proptest! {
    /// Property: composing a decomposed offset gives the offset back.
    #[test]
    fn prop_compose_inverts_decompose(offset in 0u32..0x0080_0000) {
        let location = decompose(offset);
        prop_assert_eq!(compose(location.bank, location.ptr), offset);
        prop_assert_eq!(location.linear(), offset);
    }

    /// Property: only switchable banks carry the window flag.
    #[test]
    fn prop_window_flag_follows_bank(offset in 0u32..0x0080_0000) {
        let location = decompose(offset);
        prop_assert_eq!(location.ptr >= SWITCHABLE_WINDOW, location.bank > 0);
    }
}

// ============================================================================
// Ledger Properties
// ============================================================================

fn rom_events() -> impl Strategy<Value = Vec<ShiftEvent>> {
    prop::collection::vec((0u32..0x20000, -16i32..16), 0..40).prop_map(|events| {
        events
            .into_iter()
            .map(|(offset, shift)| ShiftEvent::from_offsets(offset, offset, shift))
            .collect()
    })
}

proptest! {
    /// Property: an empty ledger never shifts anything.
    #[test]
    fn prop_empty_ledger_is_zero(bank in 0u16..0x100, address in any::<u16>()) {
        prop_assert_eq!(ShiftLedger::rom(&[]).cumulative_shift(bank, address), 0);
        prop_assert_eq!(ShiftLedger::ram(&[]).cumulative_shift(bank, address), 0);
    }

    /// Property: with growing shifts only, later RAM addresses never shift less.
    #[test]
    fn prop_ram_ledger_monotone(
        events in prop::collection::vec((any::<u16>(), 0i32..64), 0..40),
        a in any::<u16>(),
        b in any::<u16>(),
    ) {
        let shifts: Vec<RamShift> = events
            .into_iter()
            .map(|(ptr, shift)| RamShift { ptr: u32::from(ptr), shift })
            .collect();
        let ledger = ShiftLedger::ram(&shifts);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ledger.cumulative_shift(0, low) <= ledger.cumulative_shift(0, high));
    }

    /// Property: the same holds within one ROM bank.
    #[test]
    fn prop_rom_ledger_monotone_in_bank(
        events in prop::collection::vec((0u32..0x20000, 0i32..64), 0..40),
        bank in 1u16..8,
        a in 0x4000u16..0x8000,
        b in 0x4000u16..0x8000,
    ) {
        let events: Vec<ShiftEvent> = events
            .into_iter()
            .map(|(offset, shift)| ShiftEvent::from_offsets(offset, offset, shift))
            .collect();
        let ledger = ShiftLedger::rom(&events);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ledger.cumulative_shift(bank, low) <= ledger.cumulative_shift(bank, high));
    }

    /// Property: feed order of the events does not matter.
    #[test]
    fn prop_ledger_ignores_event_order(
        events in rom_events(),
        bank in 0u16..8,
        address in any::<u16>(),
    ) {
        let mut reversed = events.clone();
        reversed.reverse();
        prop_assert_eq!(
            ShiftLedger::rom(&events).cumulative_shift(bank, address),
            ShiftLedger::rom(&reversed).cumulative_shift(bank, address)
        );
    }

    /// Property: the last total equals the sum of every shift.
    #[test]
    fn prop_ledger_total_is_sum(events in rom_events()) {
        let sum: i64 = events.iter().map(|e| i64::from(e.shift)).sum();
        let last = ShiftLedger::rom(&events).iter().last().map_or(0, |(_, _, total)| total);
        prop_assert_eq!(last, sum);
    }
}

// ============================================================================
// Pipeline Properties
// ============================================================================

fn comparison() -> impl Strategy<Value = Comparison> {
    let record = (0u32..0x8000, 1u32..3, 1u32..3)
        .prop_map(|(offset, len_a, len_b)| DiffRecord::from_offsets(offset, len_a, offset, len_b));
    let run = (0u32..0x8000, 1u32..8).prop_map(|(offset, len)| Run::from_offsets(offset, offset, len));
    (
        prop::collection::vec(record, 0..20),
        rom_events(),
        prop::collection::vec(run.clone(), 0..5),
        prop::collection::vec(run, 0..5),
    )
        .prop_map(|(differences, shifts, insertions, deletions)| Comparison {
            differences,
            shifts,
            insertions,
            deletions,
            warnings: Vec::new(),
        })
}

proptest! {
    /// Property: the report is sorted and every run is kept.
    #[test]
    fn prop_report_sorted(
        comparison in comparison(),
        bytes_a in prop::collection::vec(any::<u8>(), 0x8000),
        bytes_b in prop::collection::vec(any::<u8>(), 0x8000),
    ) {
        let rom_a = RomImage::from_bytes(&bytes_a);
        let rom_b = RomImage::from_bytes(&bytes_b);
        let trimmed = trim(&rom_a, &rom_b, &comparison, &RamFeed::default(), Vec::new(), TrimConfig::default());

        let entries = &trimmed.report.entries;
        prop_assert!(entries.windows(2).all(|w| w[0].linear_a() <= w[1].linear_a()));
        prop_assert_eq!(
            entries.len(),
            comparison.insertions.len() + comparison.deletions.len() + trimmed.report.retained
        );
        prop_assert!(trimmed.report.retained <= trimmed.report.checked);
        prop_assert_eq!(trimmed.report.checked, comparison.differences.len());
    }

    /// Property: trimming twice gives the same report.
    #[test]
    fn prop_trim_deterministic(
        comparison in comparison(),
        bytes in prop::collection::vec(any::<u8>(), 0x8000),
    ) {
        let rom_a = RomImage::from_bytes(&bytes);
        let rom_b = RomImage::from_bytes(&bytes.iter().rev().copied().collect::<Vec<_>>());
        let run = || trim(&rom_a, &rom_b, &comparison, &RamFeed::default(), Vec::new(), TrimConfig::default()).report;
        prop_assert_eq!(run(), run());
    }

    /// Property: byte reads never leave their bank window.
    #[test]
    fn prop_byte_reads_clip(
        len in 0usize..0x9000,
        bank in 0u16..4,
        ptr in any::<u16>(),
        offset in -4i32..4,
    ) {
        let rom = RomImage::from_bytes(&vec![0xAAu8; len]);
        let within = i32::from(ptr & 0x3FFF) + offset;
        if let Some(byte) = rom.byte_at(bank, ptr, offset) {
            prop_assert_eq!(byte, 0xAA);
            prop_assert!((0..0x4000).contains(&within));
        }
        prop_assert_eq!(BankPtr::new(bank, ptr).bank, bank);
    }
}
