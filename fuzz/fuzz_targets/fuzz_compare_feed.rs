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

//! Fuzz target for the comparison table readers.
//!
//! Feeds random text to the ROM and RAM table readers and the splitter.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compare_feed

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Errors are fine, panics are not
        if let Err(e) = bankdiff::feed::parse_comparison(text) {
            let _ = bankdiff::format_error(&e, text, None);
        }
        let _ = bankdiff::feed::parse_ram_feed(text);
        let _ = bankdiff::feed::split_rows(text);
    }
});
