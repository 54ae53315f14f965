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

//! Fuzz target for the full trim pipeline.
//!
//! Builds two small images and a comparison table from structured
//! fuzzer input and runs them through classification and reconciliation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pipeline -- -max_total_time=60

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bankdiff::feed::{self, RamFeed};
use bankdiff::rom::RomImage;
use bankdiff::TrimConfig;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    rom_a: &'a [u8],
    rom_b: &'a [u8],
    table: &'a str,
    info: &'a str,
    long_call: Option<u8>,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(comparison) = feed::parse_comparison(input.table) else {
        return;
    };
    let info = feed::parse_annotations(input.info);
    let rom_a = RomImage::from_bytes(input.rom_a);
    let rom_b = RomImage::from_bytes(input.rom_b);
    let ram = RamFeed::default();
    let config = TrimConfig {
        long_call_opcode: input.long_call,
    };

    let trimmed = bankdiff::trim(&rom_a, &rom_b, &comparison, &ram, info.annotations, config);
    assert!(trimmed.report.retained <= trimmed.report.checked);
    let _ = trimmed.debug_dump(&comparison, &ram);
});
