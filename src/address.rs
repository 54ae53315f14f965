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

//! Bank-switched address model.
//!
//! A cartridge image is addressed linearly in the files, but code sees it
//! through two 16 KiB windows:
//! - bank 0 is always mapped at `$0000-$3FFF`
//! - bank N (N >= 1) is paged into `$4000-$7FFF`
//!
//! Every other module converts between the two views through this one.

use std::fmt;

/// Size of one ROM bank window.
pub const BANK_SIZE: u32 = 0x4000;

/// Mask selecting the in-window part of a pointer.
pub const BANK_MASK: u16 = 0x3FFF;

/// Flag carried by every pointer into the switchable window.
pub const SWITCHABLE_WINDOW: u16 = 0x4000;

/// Addresses at or above this value are RAM/IO, not ROM.
pub const RAM_START: u16 = 0x8000;

/// A location as the CPU sees it: a bank number plus a pointer into
/// that bank's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BankPtr {
    pub bank: u16,
    pub ptr: u16,
}

impl BankPtr {
    /// Create a new bank/pointer pair.
    pub fn new(bank: u16, ptr: u16) -> Self {
        Self { bank, ptr }
    }

    /// The linear file offset of this location.
    pub fn linear(&self) -> u32 {
        compose(self.bank, self.ptr)
    }

    /// The pointer with the window flag stripped.
    pub fn offset_in_bank(&self) -> u16 {
        self.ptr & BANK_MASK
    }
}

impl fmt::Display for BankPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:{:04X}", self.bank, self.ptr)
    }
}

/// Split a linear file offset into bank and window pointer.
pub fn decompose(offset: u32) -> BankPtr {
    let bank = (offset / BANK_SIZE) as u16;
    let ptr = (offset % BANK_SIZE) as u16;
    if bank == 0 {
        BankPtr { bank, ptr }
    } else {
        BankPtr {
            bank,
            ptr: ptr | SWITCHABLE_WINDOW,
        }
    }
}

/// Combine a bank and a window pointer into a linear file offset.
///
/// The window flag of `ptr` is ignored, so `$4123` and `$0123` name the
/// same byte of `bank`.
pub fn compose(bank: u16, ptr: u16) -> u32 {
    u32::from(bank) * BANK_SIZE + u32::from(ptr & BANK_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_bank_zero() {
        assert_eq!(decompose(0x0000), BankPtr::new(0, 0x0000));
        assert_eq!(decompose(0x3FFF), BankPtr::new(0, 0x3FFF));
    }

    #[test]
    fn test_decompose_switchable_banks() {
        assert_eq!(decompose(0x4000), BankPtr::new(1, 0x4000));
        assert_eq!(decompose(0x7FFF), BankPtr::new(1, 0x7FFF));
        assert_eq!(decompose(0x4C123), BankPtr::new(0x13, 0x4123));
    }

    #[test]
    fn test_compose_ignores_window_flag() {
        assert_eq!(compose(0x13, 0x4123), 0x4C123);
        assert_eq!(compose(0x13, 0x0123), 0x4C123);
        assert_eq!(compose(0, 0x1234), 0x1234);
    }

    #[test]
    fn test_round_trip_at_bank_edges() {
        for offset in [0, 0x3FFF, 0x4000, 0x7FFF, 0x8000, 0xFFFFF] {
            let loc = decompose(offset);
            assert_eq!(compose(loc.bank, loc.ptr), offset);
        }
    }

    #[test]
    fn test_offset_in_bank_strips_window_flag() {
        assert_eq!(BankPtr::new(0x13, 0x41AF).offset_in_bank(), 0x01AF);
        assert_eq!(BankPtr::new(0, 0x3FFF).offset_in_bank(), 0x3FFF);
    }

    #[test]
    fn test_display() {
        assert_eq!(BankPtr::new(0x13, 0x41AF).to_string(), "13:41AF");
        assert_eq!(BankPtr::new(0, 0x0050).to_string(), "00:0050");
    }
}
