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

//! Annotation feed reader.
//!
//! Lines look like `ptrtbl 13 13:41AF 13:41C1`: a lowercase tag, the
//! reference bank, then start and end as `bank:pointer`. Anything else
//! is skipped, so the feed may carry comments and tool chatter.

use std::sync::OnceLock;

use regex::Regex;

use super::lines_with_offsets;
use crate::address::{compose, decompose};
use crate::error::{Span, Warning, WarningCode};
use crate::regions::{Annotation, RegionKind};

/// Annotations read from a feed, in feed order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationFeed {
    pub annotations: Vec<Annotation>,
    pub warnings: Vec<Warning>,
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^([a-z]+) +([0-9A-Fa-f]{2}) ([0-9A-Fa-f]{2}):([0-9A-Fa-f]{4}) ([0-9A-Fa-f]{2}):([0-9A-Fa-f]{4})$",
        )
        .expect("annotation pattern is valid")
    })
}

/// Parse an annotation feed. Never fails; malformed lines are skipped.
pub fn parse_annotations(text: &str) -> AnnotationFeed {
    let mut feed = AnnotationFeed::default();

    for (start, line) in lines_with_offsets(text) {
        let Some(caps) = line_pattern().captures(line) else {
            continue;
        };

        // The pattern only admits 2 or 4 hex digits, so these cannot fail
        let hex = |index: usize| u16::from_str_radix(&caps[index], 16).unwrap_or_default();

        let ref_bank = hex(2);
        let first = compose(hex(3), hex(4));
        let last = compose(hex(5), hex(6));

        if last < first {
            feed.warnings.push(Warning::at(
                WarningCode::InvalidRegionSpan,
                format!("Region ends before it starts: '{}'", line),
                Span::new(start, start + line.len()),
            ));
            continue;
        }

        let location = decompose(first);
        feed.annotations.push(Annotation {
            kind: RegionKind::from_tag(&caps[1]),
            bank: location.bank,
            ptr: location.ptr,
            ref_bank,
            len: last - first,
        });
    }

    feed
}
