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

//! Records derived from the comparison feeds.

use crate::address::{decompose, BankPtr};

/// A located discrepancy between revision A and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRecord {
    pub a: BankPtr,
    pub b: BankPtr,
    pub len_a: u32,
    pub len_b: u32,
}

impl DiffRecord {
    /// Build a record from linear offsets.
    pub fn from_offsets(addr_a: u32, len_a: u32, addr_b: u32, len_b: u32) -> Self {
        Self {
            a: decompose(addr_a),
            b: decompose(addr_b),
            len_a,
            len_b,
        }
    }
}

/// A run of bytes present in only one revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub a: BankPtr,
    pub b: BankPtr,
    pub len: u32,
}

impl Run {
    /// Build a run from linear offsets.
    pub fn from_offsets(addr_a: u32, addr_b: u32, len: u32) -> Self {
        Self {
            a: decompose(addr_a),
            b: decompose(addr_b),
            len,
        }
    }
}

/// Every ROM address in A at or after `a` lands `shift` bytes later in B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftEvent {
    pub a: BankPtr,
    pub b: BankPtr,
    pub shift: i32,
}

impl ShiftEvent {
    /// Build an event from linear offsets.
    pub fn from_offsets(addr_a: u32, addr_b: u32, shift: i32) -> Self {
        Self {
            a: decompose(addr_a),
            b: decompose(addr_b),
            shift,
        }
    }
}

/// A shift in the flat RAM/IO address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamShift {
    pub ptr: u32,
    pub shift: i32,
}

/// RAM bytes that vanished between revisions. Only traced, never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamDeletion {
    pub ptr: u32,
    pub len: u32,
}

/// An intentional RAM remap between revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamSwitch {
    pub ptr_a: u32,
    pub len_a: u32,
    pub ptr_b: u32,
    pub len_b: u32,
}
