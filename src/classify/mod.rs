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

//! Difference classification.
//!
//! Decides which address, if any, a changed byte pair encodes. The bytes
//! around the difference are matched against a fixed list of instruction
//! and data patterns:
//!
//! 1. [`Pattern::Call`] - `call`/`jp` with a 16-bit target
//! 2. [`Pattern::LongCall`] - game-specific `op, bank, lo, hi` far call
//! 3. [`Pattern::LoadStore`] - absolute loads/stores and 16-bit immediates
//! 4. [`Pattern::HighPage`] - `ldh` into the `$FF00` page
//! 5. [`Pattern::PointerTable`] - an entry of an annotated pointer table
//!
//! The first pattern that recognizes the difference decides it; later
//! patterns are not consulted.

pub mod sm83;
pub mod window;

pub use window::ByteWindow;

use std::fmt;

use log::trace;

use crate::address::{RAM_START, SWITCHABLE_WINDOW};
use crate::config::TrimConfig;
use crate::error::{Warning, WarningCode};
use crate::ledger::Space;
use crate::records::DiffRecord;
use crate::regions::{Annotation, RegionIndex, RegionKind};
use crate::rom::RomImage;
use sm83::{CALL_JUMP, HIGH_PAGE, HIGH_PAGE_ACCESS, LOAD_STORE_ABS};
use window::same;

/// A family of address encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Call,
    LongCall,
    LoadStore,
    HighPage,
    PointerTable,
}

/// Patterns in the order they are tried.
pub const PRIORITY: [Pattern; 5] = [
    Pattern::Call,
    Pattern::LongCall,
    Pattern::LoadStore,
    Pattern::HighPage,
    Pattern::PointerTable,
];

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pattern::Call => "call",
            Pattern::LongCall => "long call",
            Pattern::LoadStore => "load/store",
            Pattern::HighPage => "high-page load/store",
            Pattern::PointerTable => "pointer table",
        };
        f.write_str(name)
    }
}

/// An address pair recovered from a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub pattern: Pattern,
    pub space: Space,
    /// Bank the A-side address is resolved in. Unused for RAM.
    pub bank: u16,
    pub address_a: u16,
    pub address_b: u16,
}

/// What the classifier made of a difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// An address to check against the shift ledgers.
    Reference(Reference),
    /// Recognized, but unsafe to resolve automatically.
    Flagged { pattern: Pattern, warning: Warning },
    /// No pattern applies.
    Unclassified,
}

/// Everything a pattern may look at for one difference.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    pub record: &'a DiffRecord,
    pub a: ByteWindow,
    pub b: ByteWindow,
    pub region: Option<&'a Annotation>,
}

impl<'a> Site<'a> {
    /// Are both sides at most `len` bytes long?
    fn fits(&self, len: u32) -> bool {
        self.record.len_a <= len && self.record.len_b <= len
    }

    fn region_kind(&self) -> Option<&RegionKind> {
        self.region.map(|r| &r.kind)
    }

    /// Resolve a ROM address pair read from an instruction operand.
    ///
    /// Code regions name the bank their addresses belong to. Outside of
    /// them, bank 0 code pointing into the switchable window could target
    /// any bank, so it is flagged instead of guessed.
    fn resolve_rom(&self, pattern: Pattern, address_a: u16, address_b: u16) -> Classification {
        let bank = match self.region {
            Some(region) if region.kind == RegionKind::Code => region.ref_bank,
            _ => {
                if let Some(warning) = self.out_of_bank(pattern, address_a, address_b) {
                    return Classification::Flagged { pattern, warning };
                }
                self.record.a.bank
            }
        };

        Classification::Reference(Reference {
            pattern,
            space: Space::Rom,
            bank,
            address_a,
            address_b,
        })
    }

    // Only bank 0 is guarded; a switchable bank reaching into its own
    // window is the normal case.
    fn out_of_bank(&self, pattern: Pattern, address_a: u16, address_b: u16) -> Option<Warning> {
        let record = self.record;
        if record.a.bank == 0 && address_a >= SWITCHABLE_WINDOW {
            return Some(Warning::new(
                WarningCode::OutOfBankA,
                format!(
                    "{}: out of bank {} to {:04X} in ROM A",
                    record.a, pattern, address_a
                ),
            ));
        }
        if record.b.bank == 0 && address_b >= SWITCHABLE_WINDOW {
            return Some(Warning::new(
                WarningCode::OutOfBankB,
                format!(
                    "{}: out of bank {} to {:04X} in ROM B but not in ROM A",
                    record.a, pattern, address_b
                ),
            ));
        }
        None
    }
}

impl Pattern {
    /// Try this pattern on a site.
    pub fn classify(self, site: &Site<'_>, config: &TrimConfig) -> Option<Classification> {
        match self {
            Pattern::Call => {
                let opcode = same(site.a.before, site.b.before)?;
                if !CALL_JUMP.contains(&opcode) || !site.fits(2) {
                    return None;
                }
                let (address_a, address_b) = (site.a.word()?, site.b.word()?);
                Some(site.resolve_rom(self, address_a, address_b))
            }
            Pattern::LongCall => {
                let vector = config.long_call_opcode?;
                if same(site.a.before2, site.b.before2)? != vector {
                    return None;
                }
                let bank = same(site.a.before, site.b.before)?;
                let (address_a, address_b) = (site.a.word()?, site.b.word()?);
                Some(Classification::Reference(Reference {
                    pattern: self,
                    space: Space::Rom,
                    bank: u16::from(bank),
                    address_a,
                    address_b,
                }))
            }
            Pattern::LoadStore => {
                let opcode = same(site.a.before, site.b.before)?;
                if !LOAD_STORE_ABS.contains(&opcode) || !site.fits(2) {
                    return None;
                }
                let (address_a, address_b) = (site.a.word()?, site.b.word()?);

                let rom_a = address_a < RAM_START;
                let rom_b = address_b < RAM_START;
                if rom_a != rom_b {
                    let warning = Warning::new(
                        WarningCode::CrossSpaceAccess,
                        format!(
                            "{}: {:04X} and {:04X} access different ROM/RAM targets",
                            site.record.a, address_a, address_b
                        ),
                    );
                    return Some(Classification::Flagged {
                        pattern: self,
                        warning,
                    });
                }

                if rom_a {
                    Some(site.resolve_rom(self, address_a, address_b))
                } else {
                    Some(Classification::Reference(Reference {
                        pattern: self,
                        space: Space::Ram,
                        bank: 0,
                        address_a,
                        address_b,
                    }))
                }
            }
            Pattern::HighPage => {
                let opcode = same(site.a.before, site.b.before)?;
                if !HIGH_PAGE_ACCESS.contains(&opcode) || !site.fits(1) {
                    return None;
                }
                Some(Classification::Reference(Reference {
                    pattern: self,
                    space: Space::Ram,
                    bank: 0,
                    address_a: HIGH_PAGE | u16::from(site.a.current?),
                    address_b: HIGH_PAGE | u16::from(site.b.current?),
                }))
            }
            Pattern::PointerTable => {
                let region = site.region?;
                if site.region_kind() != Some(&RegionKind::PointerTable) {
                    return None;
                }
                // Tables may start on an odd byte; an odd phase means the
                // difference is the high byte of its entry.
                let phase = site.record.a.ptr.wrapping_sub(region.ptr) & 1;
                let (address_a, address_b) = if phase == 0 {
                    (site.a.word()?, site.b.word()?)
                } else {
                    (site.a.word_before()?, site.b.word_before()?)
                };
                Some(Classification::Reference(Reference {
                    pattern: self,
                    space: Space::Rom,
                    bank: region.ref_bank,
                    address_a,
                    address_b,
                }))
            }
        }
    }
}

/// Classifies differences between two ROM revisions.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rom_a: &'a RomImage,
    rom_b: &'a RomImage,
    regions: &'a RegionIndex,
    config: TrimConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(
        rom_a: &'a RomImage,
        rom_b: &'a RomImage,
        regions: &'a RegionIndex,
        config: TrimConfig,
    ) -> Self {
        Self {
            rom_a,
            rom_b,
            regions,
            config,
        }
    }

    /// Gather the bytes and region around a difference.
    pub fn site<'r>(&self, record: &'r DiffRecord) -> Site<'r>
    where
        'a: 'r,
    {
        Site {
            record,
            a: ByteWindow::read(self.rom_a, record.a),
            b: ByteWindow::read(self.rom_b, record.b),
            region: self.regions.lookup(record.a.bank, record.a.ptr),
        }
    }

    /// Classify one difference.
    pub fn classify(&self, record: &DiffRecord) -> Classification {
        let site = self.site(record);
        trace!(
            "{}: region {}",
            record.a,
            site.region_kind()
                .map_or_else(|| "none".to_string(), |kind| kind.to_string())
        );

        PRIORITY
            .iter()
            .find_map(|pattern| pattern.classify(&site, &self.config))
            .unwrap_or(Classification::Unclassified)
    }
}
