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

//! Property-based fuzz tests for bankdiff.
//!
//! These tests use proptest to generate random inputs and verify that
//! the feed readers and the pipeline handle them gracefully (no panics).
//!
//! Unlike cargo-fuzz, these tests run on stable Rust.

use bankdiff::error::{format_error, format_warning};
use bankdiff::feed;
use bankdiff::rom::RomImage;
use bankdiff::TrimConfig;
use proptest::prelude::*;

/// Rows that look roughly like comparison rows.
fn table_text() -> impl Strategy<Value = String> {
    let kind = prop_oneof![
        Just("Match"),
        Just("Difference"),
        Just("Only in A"),
        Just("Only in B"),
        Just("Switch"),
        Just("\"Diff\"\"erence\""),
        Just(""),
    ];
    let field = "[0-9A-Fa-fhH\"-]{0,5}";
    let row = (kind, field, field, field, field)
        .prop_map(|(k, a, b, c, d)| format!("{},{},{},{},{}", k, a, b, c, d));
    prop::collection::vec(row, 0..30)
        .prop_map(|rows| format!("Type,A,SizeA,B,SizeB\n{}\n", rows.join("\n")))
}

// ============================================================================
// Feed Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the comparison reader with random ASCII.
    #[test]
    fn fuzz_comparison_ascii(s in "[ -~\\n\\r]{0,500}") {
        if let Err(e) = feed::parse_comparison(&s) {
            let _ = format_error(&e, &s, Some("fuzz.csv"));
        }
    }

    /// Fuzz the comparison reader with table-shaped text.
    #[test]
    fn fuzz_comparison_rows(s in table_text()) {
        match feed::parse_comparison(&s) {
            Ok(comparison) => {
                for warning in &comparison.warnings {
                    let _ = format_warning(warning, &s, Some("fuzz.csv"));
                }
            }
            Err(e) => {
                let _ = format_error(&e, &s, Some("fuzz.csv"));
            }
        }
    }

    /// Fuzz the RAM reader with table-shaped text.
    #[test]
    fn fuzz_ram_feed_rows(s in table_text()) {
        let _ = feed::parse_ram_feed(&s);
    }

    /// Fuzz the splitter with table-shaped text.
    #[test]
    fn fuzz_split_rows(s in table_text()) {
        let _ = feed::split_rows(&s);
    }

    /// Fuzz the annotation reader with random bytes.
    #[test]
    fn fuzz_annotations_bytes(bytes in prop::collection::vec(any::<u8>(), 0..500)) {
        let text = String::from_utf8_lossy(&bytes);
        let _ = feed::parse_annotations(&text);
    }

    /// Fuzz the annotation reader with well-formed but arbitrary lines.
    #[test]
    fn fuzz_annotations_lines(
        lines in prop::collection::vec(
            "(code|ptrtbl|data) [0-9A-F]{2} [0-9A-F]{2}:[0-9A-F]{4} [0-9A-F]{2}:[0-9A-F]{4}",
            0..20,
        )
    ) {
        let feed = feed::parse_annotations(&lines.join("\n"));
        prop_assert_eq!(feed.annotations.len() + feed.warnings.len(), lines.len());
    }
}

// ============================================================================
// Pipeline Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the whole pipeline with random images and tables.
    #[test]
    fn fuzz_pipeline(
        s in table_text(),
        bytes_a in prop::collection::vec(any::<u8>(), 0..0x200),
        bytes_b in prop::collection::vec(any::<u8>(), 0..0x200),
        long_call in any::<Option<u8>>(),
    ) {
        if let Ok(comparison) = feed::parse_comparison(&s) {
            let rom_a = RomImage::from_bytes(&bytes_a);
            let rom_b = RomImage::from_bytes(&bytes_b);
            let config = TrimConfig { long_call_opcode: long_call };
            let ram = feed::RamFeed::default();
            let trimmed = bankdiff::trim(&rom_a, &rom_b, &comparison, &ram, Vec::new(), config);
            let _ = trimmed.report.render();
            let _ = trimmed.debug_dump(&comparison, &ram);
        }
    }
}
