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

//! The bytes around one side of a difference.

use crate::address::BankPtr;
use crate::rom::RomImage;

/// Bytes at offsets -2, -1, 0 and +1 from a difference, clipped to the
/// bank window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteWindow {
    pub before2: Option<u8>,
    pub before: Option<u8>,
    pub current: Option<u8>,
    pub next: Option<u8>,
}

impl ByteWindow {
    /// Read the window around `location` in `rom`.
    pub fn read(rom: &RomImage, location: BankPtr) -> Self {
        let at = |offset| rom.byte_at(location.bank, location.ptr, offset);
        Self {
            before2: at(-2),
            before: at(-1),
            current: at(0),
            next: at(1),
        }
    }

    /// Little-endian word at offsets 0 and +1.
    pub fn word(&self) -> Option<u16> {
        Some(u16::from_le_bytes([self.current?, self.next?]))
    }

    /// Little-endian word at offsets -1 and 0.
    pub fn word_before(&self) -> Option<u16> {
        Some(u16::from_le_bytes([self.before?, self.current?]))
    }
}

/// The value both windows agree on, if any.
pub fn same(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_at_bank_start() {
        let rom = RomImage::from_bytes(&[0x34, 0x12, 0x56]);
        let window = ByteWindow::read(&rom, BankPtr::new(0, 0));
        assert_eq!(window.before2, None);
        assert_eq!(window.before, None);
        assert_eq!(window.word(), Some(0x1234));
        assert_eq!(window.word_before(), None);
    }

    #[test]
    fn test_read_at_data_end() {
        let rom = RomImage::from_bytes(&[0xCD, 0x34, 0x12]);
        let window = ByteWindow::read(&rom, BankPtr::new(0, 2));
        assert_eq!(window.before2, Some(0xCD));
        assert_eq!(window.word_before(), Some(0x1234));
        assert_eq!(window.next, None);
        assert_eq!(window.word(), None);
    }

    #[test]
    fn test_same() {
        assert_eq!(same(Some(0xCD), Some(0xCD)), Some(0xCD));
        assert_eq!(same(Some(0xCD), Some(0xC3)), None);
        assert_eq!(same(None, Some(0xCD)), None);
        assert_eq!(same(None, None), None);
    }
}
