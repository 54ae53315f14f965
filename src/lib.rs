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

//! Bankdiff Library
//!
//! Inserting or deleting a few bytes early in a bank-switched ROM moves
//! everything after it, and every pointer to the moved code or data
//! changes with it. A byte-level comparison of two revisions then drowns
//! the real edits in pointer updates. This library rebuilds the address
//! shifts from the comparison, recognizes the bytes that encode addresses,
//! and drops every difference the shifts fully explain.
//!
//! # Modules
//!
//! - [`address`] - linear offsets and `bank:pointer` addresses
//! - [`rom`] - ROM images split into banks
//! - [`feed`] - readers for the comparison and annotation feeds
//! - [`ledger`] - cumulative shifts per address space
//! - [`regions`] - code and pointer-table annotations
//! - [`switches`] - sanctioned RAM remaps
//! - [`classify`] - address-encoding patterns
//! - [`reconcile`] - verdicts against the shift ledgers
//! - [`report`] - the trimmed report
//! - [`error`] - errors, warnings and their formatting
//!
//! # Example
//!
//! ```no_run
//! use bankdiff::{feed, rom::RomImage, TrimConfig};
//! use std::path::Path;
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let rom_a = RomImage::read(Path::new("aka10.gbc"))?;
//!     let rom_b = RomImage::read(Path::new("aka11.gbc"))?;
//!     let comparison = feed::parse_comparison(&std::fs::read_to_string("aka_compare.csv")?)?;
//!     let ram = feed::parse_ram_feed(&std::fs::read_to_string("aka_ramshift.csv")?)?;
//!     let info = feed::parse_annotations(&std::fs::read_to_string("aka10_info.txt")?);
//!
//!     let trimmed = bankdiff::trim(
//!         &rom_a,
//!         &rom_b,
//!         &comparison,
//!         &ram,
//!         info.annotations,
//!         TrimConfig::default(),
//!     );
//!     print!("{}", trimmed.report.render());
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod classify;
pub mod config;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod records;
pub mod reconcile;
pub mod regions;
pub mod report;
pub mod rom;
pub mod switches;

use log::debug;

// Re-export commonly used types
pub use address::BankPtr;
pub use config::{Project, TrimConfig};
pub use error::{format_error, BankdiffError, ErrorCode, Result, SourceLocation, Span};
pub use reconcile::{Reconciliation, Verdict};
pub use report::{Entry, Report};

use classify::Classifier;
use feed::{Comparison, RamFeed};
use ledger::ShiftLedger;
use reconcile::Reconciler;
use regions::{Annotation, RegionIndex};
use rom::RomImage;
use switches::RamSwitchTable;

/// The version of bankdiff.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "Bankdiff";

/// Result of trimming one comparison.
#[derive(Debug, Clone)]
pub struct Trimmed {
    pub report: Report,
    pub reconciliation: Reconciliation,
    pub rom_ledger: ShiftLedger,
    pub ram_ledger: ShiftLedger,
    pub regions: RegionIndex,
}

impl Trimmed {
    /// Ledgers, runs, regions and per-record verdicts as text.
    ///
    /// Shift lines show the running total before and after each event.
    pub fn debug_dump(&self, comparison: &Comparison, ram: &RamFeed) -> String {
        let mut out = String::new();

        let mut before = 0;
        for (bank, ptr, total) in self.rom_ledger.iter() {
            out.push_str(&format!(
                "Shift: {:02X}:{:04X} -- {} --> {}\n",
                bank, ptr, before, total
            ));
            before = total;
        }
        for run in &comparison.insertions {
            out.push_str(&format!("Insertion: {} -- {}\n", run.a, run.len));
        }
        for run in &comparison.deletions {
            out.push_str(&format!("Deletion: {} -- -{}\n", run.a, run.len));
        }

        before = 0;
        for (_, ptr, total) in self.ram_ledger.iter() {
            out.push_str(&format!("RAM Shift: {:04X} -- {} --> {}\n", ptr, before, total));
            before = total;
        }
        for deletion in &ram.deletions {
            out.push_str(&format!(
                "RAM Deletion: {:04X} -- -{}\n",
                deletion.ptr, deletion.len
            ));
        }

        for region in self.regions.iter() {
            out.push_str(&format!(
                "Info: {} {} -- {} bytes ref bank {:02X}\n",
                region.kind,
                BankPtr::new(region.bank, region.ptr),
                region.len,
                region.ref_bank
            ));
        }

        for (record, verdict) in &self.reconciliation.verdicts {
            out.push_str(&format!("Record {}: {}\n", record.a, describe(verdict)));
        }

        out
    }
}

fn describe(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Explained {
            reference,
            expected,
        } => format!(
            "{} {:04X} -- {:04X}, explained",
            reference.pattern, reference.address_a, expected
        ),
        Verdict::Switched { reference } => format!(
            "{} {:04X} -- {:04X}, RAM switch",
            reference.pattern, reference.address_a, reference.address_b
        ),
        Verdict::Retained {
            reference,
            expected,
        } => format!(
            "{} {:04X} -- {:04X}, expected {:04X}",
            reference.pattern, reference.address_a, reference.address_b, expected
        ),
        Verdict::Flagged(warning) => format!("flagged [{}]", warning.code),
        Verdict::Unclassified => "unclassified".to_string(),
    }
}

/// Trim a parsed comparison.
///
/// This is the main entry point. It builds the shift ledgers and the
/// region index, judges every difference, and merges what is left with
/// the insertions and deletions into the report.
///
/// # Example
///
/// ```
/// use bankdiff::{feed, rom::RomImage, TrimConfig};
///
/// let comparison = feed::parse_comparison(
///     "Type,A,SizeA,B,SizeB\nOnly in B,h,h,0010h,2h\n",
/// )
/// .unwrap();
/// let rom = RomImage::from_bytes(&[0u8; 0x20]);
/// let trimmed = bankdiff::trim(
///     &rom,
///     &rom,
///     &comparison,
///     &feed::RamFeed::default(),
///     Vec::new(),
///     TrimConfig::default(),
/// );
/// assert_eq!(trimmed.report.entries.len(), 1);
/// ```
pub fn trim(
    rom_a: &RomImage,
    rom_b: &RomImage,
    comparison: &Comparison,
    ram: &RamFeed,
    annotations: Vec<Annotation>,
    config: TrimConfig,
) -> Trimmed {
    let rom_ledger = ShiftLedger::rom(&comparison.shifts);
    let ram_ledger = ShiftLedger::ram(&ram.shifts);
    let switches = RamSwitchTable::new(ram.switches.clone());
    let regions = RegionIndex::new(annotations);
    debug!(
        "{} ROM shifts, {} RAM shifts, {} RAM switches, {} regions",
        rom_ledger.len(),
        ram_ledger.len(),
        switches.len(),
        regions.len()
    );

    let classifier = Classifier::new(rom_a, rom_b, &regions, config);
    let reconciler = Reconciler::new(&rom_ledger, &ram_ledger, &switches);
    let reconciliation = reconcile::reconcile(&comparison.differences, &classifier, &reconciler);

    let report = Report::merge(
        &comparison.insertions,
        &comparison.deletions,
        reconciliation.retained(),
        reconciliation.checked(),
    );

    Trimmed {
        report,
        reconciliation,
        rom_ledger,
        ram_ledger,
        regions,
    }
}
