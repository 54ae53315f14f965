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

//! ROM image loading and clipped byte access.

use std::io;
use std::path::Path;

use crate::address::{BankPtr, BANK_SIZE};

/// One revision of a cartridge image, split into bank windows.
#[derive(Debug, Clone, Default)]
pub struct RomImage {
    banks: Vec<Vec<u8>>,
}

impl RomImage {
    /// Split raw bytes into banks. A trailing partial bank keeps its length.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let banks = bytes
            .chunks(BANK_SIZE as usize)
            .map(|chunk| chunk.to_vec())
            .collect();
        Self { banks }
    }

    /// Read an image from disk.
    pub fn read(path: &Path) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(&data))
    }

    /// Number of banks, counting a trailing partial one.
    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    /// Raw contents of one bank.
    pub fn bank(&self, bank: u16) -> Option<&[u8]> {
        self.banks.get(usize::from(bank)).map(Vec::as_slice)
    }

    /// Read the byte `offset` bytes away from `bank:ptr`.
    ///
    /// Reads never leave the bank window: anything before its start, past
    /// its end or past the loaded data yields `None`.
    pub fn byte_at(&self, bank: u16, ptr: u16, offset: i32) -> Option<u8> {
        let index = i32::from(BankPtr::new(bank, ptr).offset_in_bank()) + offset;
        if index < 0 || index >= BANK_SIZE as i32 {
            return None;
        }
        self.bank(bank)?.get(index as usize).copied()
    }
}
