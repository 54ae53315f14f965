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

//! SM83 opcodes that carry an address operand.
//!
//! Only the encodings the classifier looks for are listed. Every one of
//! them is a single opcode byte followed by its operand.

/// Opcodes for the SM83 CPU.
///
/// Naming convention: INSTR_OPERANDS where operands are:
/// - NN: 16-bit immediate
/// - ABS: memory at a 16-bit address (`[$nnnn]`)
/// - HIGH: memory at `$FF00 + n` (`[$FF00+n]`)
/// - NZ/Z/NC/C: condition
pub mod opcodes {
    // Calls
    pub const CALL_NN: u8 = 0xCD;
    pub const CALL_NZ_NN: u8 = 0xC4;
    pub const CALL_Z_NN: u8 = 0xCC;
    pub const CALL_NC_NN: u8 = 0xD4;
    pub const CALL_C_NN: u8 = 0xDC;

    // Jumps
    pub const JP_NN: u8 = 0xC3;
    pub const JP_NZ_NN: u8 = 0xC2;
    pub const JP_Z_NN: u8 = 0xCA;
    pub const JP_NC_NN: u8 = 0xD2;
    pub const JP_C_NN: u8 = 0xDA;

    // Absolute loads and stores
    pub const LD_ABS_A: u8 = 0xEA;
    pub const LD_A_ABS: u8 = 0xFA;

    // 16-bit immediate loads
    pub const LD_HL_NN: u8 = 0x21;
    pub const LD_DE_NN: u8 = 0x11;
    pub const LD_BC_NN: u8 = 0x01;

    // High page loads and stores
    pub const LDH_A_HIGH: u8 = 0xF0;
    pub const LDH_HIGH_A: u8 = 0xE0;

    // Restarts
    pub const RST_00: u8 = 0xC7;
}

use opcodes::*;

/// Call and jump encodings with a 16-bit target.
pub const CALL_JUMP: [u8; 10] = [
    CALL_NN, CALL_NZ_NN, CALL_Z_NN, CALL_NC_NN, CALL_C_NN, JP_NN, JP_NZ_NN, JP_Z_NN, JP_NC_NN,
    JP_C_NN,
];

/// Loads and stores with a 16-bit address or immediate operand.
pub const LOAD_STORE_ABS: [u8; 5] = [LD_ABS_A, LD_A_ABS, LD_HL_NN, LD_DE_NN, LD_BC_NN];

/// Loads and stores into the `$FF00` page.
pub const HIGH_PAGE_ACCESS: [u8; 2] = [LDH_A_HIGH, LDH_HIGH_A];

/// Base of the page addressed by `ldh`.
pub const HIGH_PAGE: u16 = 0xFF00;

/// The default long-call vector: `rst $00` followed by bank and address.
pub const DEFAULT_LONG_CALL: u8 = RST_00;
