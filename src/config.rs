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

//! Run configuration and the project file naming convention.

use std::path::{Path, PathBuf};

use crate::classify::sm83::DEFAULT_LONG_CALL;

/// ROM types whose code uses the `rst $00` long-call vector.
pub const LONG_CALL_ROM_TYPES: [&str; 2] = ["aka", "kuro"];

/// Knobs for one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimConfig {
    /// Opcode that starts a `op, bank, lo, hi` long call, if the game
    /// has one.
    pub long_call_opcode: Option<u8>,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            long_call_opcode: Some(DEFAULT_LONG_CALL),
        }
    }
}

impl TrimConfig {
    /// Configuration without long-call recognition.
    pub fn without_long_call() -> Self {
        Self {
            long_call_opcode: None,
        }
    }

    /// The default configuration for a ROM type.
    pub fn for_rom_type(rom_type: &str) -> Self {
        if LONG_CALL_ROM_TYPES.contains(&rom_type) {
            Self::default()
        } else {
            Self::without_long_call()
        }
    }
}

/// Input and output names for comparing two versions of one ROM type.
///
/// For `aka`, `10` and `11` in `dir` this is:
/// - `aka10.gbc` and `aka11.gbc`
/// - `aka_compare.csv` and `aka_ramshift.csv`
/// - `aka10_info.txt`
/// - `aka10v11_trimmed.log` (or `aka10v11_trimmed-debug.log`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub dir: PathBuf,
    pub rom_type: String,
    pub version_a: String,
    pub version_b: String,
}

impl Project {
    pub fn new(
        dir: impl Into<PathBuf>,
        rom_type: impl Into<String>,
        version_a: impl Into<String>,
        version_b: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            rom_type: rom_type.into(),
            version_a: version_a.into(),
            version_b: version_b.into(),
        }
    }

    fn file(&self, name: String) -> PathBuf {
        self.dir.join(name)
    }

    pub fn rom_a(&self) -> PathBuf {
        self.file(format!("{}{}.gbc", self.rom_type, self.version_a))
    }

    pub fn rom_b(&self) -> PathBuf {
        self.file(format!("{}{}.gbc", self.rom_type, self.version_b))
    }

    pub fn comparison(&self) -> PathBuf {
        self.file(format!("{}_compare.csv", self.rom_type))
    }

    pub fn annotations(&self) -> PathBuf {
        self.file(format!("{}{}_info.txt", self.rom_type, self.version_a))
    }

    pub fn ram_comparison(&self) -> PathBuf {
        self.file(format!("{}_ramshift.csv", self.rom_type))
    }

    pub fn report(&self, debug: bool) -> PathBuf {
        self.file(format!(
            "{}{}v{}_trimmed{}.log",
            self.rom_type,
            self.version_a,
            self.version_b,
            if debug { "-debug" } else { "" }
        ))
    }

    pub fn config(&self) -> TrimConfig {
        TrimConfig::for_rom_type(&self.rom_type)
    }
}

/// The file name of a path, for messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
