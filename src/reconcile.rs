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

//! Shift reconciliation.
//!
//! A classified difference is *explained* when the B-side address equals
//! the A-side address moved by every shift recorded before it. Explained
//! differences are noise and get dropped; everything else is kept for the
//! report.

use log::{debug, info};

use crate::classify::{Classification, Classifier, Reference};
use crate::error::Warning;
use crate::ledger::{ShiftLedger, Space};
use crate::records::DiffRecord;
use crate::switches::RamSwitchTable;

/// The outcome for one difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The shift ledgers predict the B-side address exactly.
    Explained { reference: Reference, expected: i64 },
    /// A listed RAM remap.
    Switched { reference: Reference },
    /// An address was found but the ledgers do not explain it.
    Retained { reference: Reference, expected: i64 },
    /// Recognized but unsafe to resolve.
    Flagged(Warning),
    /// Nothing recognized.
    Unclassified,
}

impl Verdict {
    /// Does the difference stay in the report?
    pub fn is_retained(&self) -> bool {
        !matches!(self, Verdict::Explained { .. } | Verdict::Switched { .. })
    }
}

/// Checks classified references against the shift ledgers.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    rom: &'a ShiftLedger,
    ram: &'a ShiftLedger,
    switches: &'a RamSwitchTable,
}

impl<'a> Reconciler<'a> {
    pub fn new(rom: &'a ShiftLedger, ram: &'a ShiftLedger, switches: &'a RamSwitchTable) -> Self {
        Self { rom, ram, switches }
    }

    /// Decide what a classification means for its difference.
    pub fn judge(&self, classification: Classification) -> Verdict {
        let reference = match classification {
            Classification::Reference(reference) => reference,
            Classification::Flagged { warning, .. } => return Verdict::Flagged(warning),
            Classification::Unclassified => return Verdict::Unclassified,
        };

        let ledger = match reference.space {
            Space::Rom => self.rom,
            Space::Ram => {
                if self
                    .switches
                    .contains(reference.address_a, reference.address_b)
                {
                    return Verdict::Switched { reference };
                }
                self.ram
            }
        };

        let shift = ledger.cumulative_shift(reference.bank, reference.address_a);
        let expected = i64::from(reference.address_a) + shift;
        debug!(
            "    {}: {:04X} -- {:04X}, shift {}",
            reference.pattern, reference.address_a, reference.address_b, shift
        );

        if expected == i64::from(reference.address_b) {
            Verdict::Explained {
                reference,
                expected,
            }
        } else {
            Verdict::Retained {
                reference,
                expected,
            }
        }
    }
}

/// The verdicts for one run over the differences.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Every difference with its verdict, in input order.
    pub verdicts: Vec<(DiffRecord, Verdict)>,
}

impl Reconciliation {
    /// Differences that stay in the report, in input order.
    pub fn retained(&self) -> impl Iterator<Item = &DiffRecord> {
        self.verdicts
            .iter()
            .filter(|(_, verdict)| verdict.is_retained())
            .map(|(record, _)| record)
    }

    /// Warnings raised while classifying.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.verdicts.iter().filter_map(|(_, verdict)| match verdict {
            Verdict::Flagged(warning) => Some(warning),
            _ => None,
        })
    }

    pub fn checked(&self) -> usize {
        self.verdicts.len()
    }

    pub fn retained_count(&self) -> usize {
        self.retained().count()
    }
}

/// Classify and judge every difference.
pub fn reconcile(
    records: &[DiffRecord],
    classifier: &Classifier<'_>,
    reconciler: &Reconciler<'_>,
) -> Reconciliation {
    let verdicts = records
        .iter()
        .map(|record| {
            info!("Checking record {}...", record.a);
            let verdict = reconciler.judge(classifier.classify(record));
            if verdict.is_retained() {
                info!("    Interesting...");
            }
            (*record, verdict)
        })
        .collect();

    let reconciliation = Reconciliation { verdicts };
    info!(
        "retained/checked {}/{}",
        reconciliation.retained_count(),
        reconciliation.checked()
    );
    reconciliation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::BankPtr;
    use crate::classify::Pattern;
    use crate::error::WarningCode;
    use crate::records::{RamShift, RamSwitch, ShiftEvent};

    fn rom_reference(bank: u16, address_a: u16, address_b: u16) -> Classification {
        Classification::Reference(Reference {
            pattern: Pattern::Call,
            space: Space::Rom,
            bank,
            address_a,
            address_b,
        })
    }

    fn ram_reference(address_a: u16, address_b: u16) -> Classification {
        Classification::Reference(Reference {
            pattern: Pattern::HighPage,
            space: Space::Ram,
            bank: 0,
            address_a,
            address_b,
        })
    }

    fn rom_shift(bank: u16, ptr: u16, shift: i32) -> ShiftEvent {
        ShiftEvent {
            a: BankPtr::new(bank, ptr),
            b: BankPtr::new(bank, ptr),
            shift,
        }
    }

    #[test]
    fn test_rom_shift_explains() {
        let rom = ShiftLedger::rom(&[rom_shift(0, 0x5000, 2)]);
        let ram = ShiftLedger::ram(&[]);
        let switches = RamSwitchTable::default();
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        let verdict = reconciler.judge(rom_reference(0, 0x5678, 0x567A));
        assert!(matches!(verdict, Verdict::Explained { expected: 0x567A, .. }));
        assert!(!verdict.is_retained());
    }

    #[test]
    fn test_unexplained_rom_is_retained() {
        let rom = ShiftLedger::rom(&[]);
        let ram = ShiftLedger::ram(&[]);
        let switches = RamSwitchTable::default();
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        let verdict = reconciler.judge(rom_reference(0, 0x5678, 0x567A));
        assert!(matches!(verdict, Verdict::Retained { expected: 0x5678, .. }));
        assert!(verdict.is_retained());
    }

    #[test]
    fn test_ram_ledger() {
        let rom = ShiftLedger::rom(&[]);
        let ram = ShiftLedger::ram(&[RamShift {
            ptr: 0xC000,
            shift: -4,
        }]);
        let switches = RamSwitchTable::default();
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        assert!(!reconciler.judge(ram_reference(0xC104, 0xC100)).is_retained());
        assert!(reconciler.judge(ram_reference(0xC104, 0xC104)).is_retained());
    }

    #[test]
    fn test_ram_switch_wins() {
        let rom = ShiftLedger::rom(&[]);
        let ram = ShiftLedger::ram(&[]);
        let switches = RamSwitchTable::new(vec![RamSwitch {
            ptr_a: 0xFF8A,
            len_a: 1,
            ptr_b: 0xFF90,
            len_b: 1,
        }]);
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        let verdict = reconciler.judge(ram_reference(0xFF8A, 0xFF90));
        assert!(matches!(verdict, Verdict::Switched { .. }));
    }

    #[test]
    fn test_switch_table_ignored_for_rom() {
        let rom = ShiftLedger::rom(&[]);
        let ram = ShiftLedger::ram(&[]);
        let switches = RamSwitchTable::new(vec![RamSwitch {
            ptr_a: 0x1000,
            len_a: 2,
            ptr_b: 0x1002,
            len_b: 2,
        }]);
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        assert!(reconciler.judge(rom_reference(0, 0x1000, 0x1002)).is_retained());
    }

    #[test]
    fn test_flags_and_unclassified_are_retained() {
        let rom = ShiftLedger::rom(&[]);
        let ram = ShiftLedger::ram(&[]);
        let switches = RamSwitchTable::default();
        let reconciler = Reconciler::new(&rom, &ram, &switches);

        let warning = Warning::new(WarningCode::OutOfBankA, "out of bank");
        let flagged = reconciler.judge(Classification::Flagged {
            pattern: Pattern::Call,
            warning: warning.clone(),
        });
        assert_eq!(flagged, Verdict::Flagged(warning));
        assert!(flagged.is_retained());
        assert!(reconciler.judge(Classification::Unclassified).is_retained());
    }
}
