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

//! Bankdiff CLI
//!
//! Trims shift noise out of ROM revision comparisons.

use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bankdiff::config::display_name;
use bankdiff::error::{format_error, format_warning, Warning};
use bankdiff::feed::{parse_annotations, parse_comparison, parse_ram_feed, split_rows};
use bankdiff::rom::RomImage;
use bankdiff::{Project, TrimConfig};

/// Bankdiff - Filters shift-induced noise out of ROM revision diffs
#[derive(Parser, Debug)]
#[command(name = "bankdiff")]
#[command(author = "Bankdiff Team")]
#[command(version)]
#[command(about = "Filters shift-induced noise out of bank-switched ROM revision diffs")]
#[command(long_about = r#"
Bankdiff reads a byte comparison of two Game Boy ROM revisions and drops
every difference that is only a pointer moved by an earlier insertion or
deletion. What is left are the real edits.

Inputs for `trim aka 10 11` (inside --dir):
  aka10.gbc, aka11.gbc   the two revisions
  aka_compare.csv        the ROM comparison table
  aka_ramshift.csv       the RAM layout comparison table
  aka10_info.txt         code and pointer-table regions of revision A

Example usage:
  bankdiff split aka_compare.csv
  bankdiff trim aka 10 11
  bankdiff --debug trim kuro 10 11 kuro-trimmed.log
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log per-record details and add a debug dump to the report
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trim a ROM comparison down to unexplained differences
    Trim(TrimArgs),

    /// Split wide difference rows of a comparison table into two-byte rows
    Split {
        /// Comparison table to normalize
        #[arg(default_value = "Compare.csv")]
        csvfile: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct TrimArgs {
    /// ROM type, e.g. aka or kuro
    romtype: String,

    /// Version string of ROM A
    version_a: String,

    /// Version string of ROM B
    version_b: String,

    /// Report file ("-" for stdout)
    outfile: Option<PathBuf>,

    /// Directory holding the inputs
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// ROM A image
    #[arg(long)]
    rom_a: Option<PathBuf>,

    /// ROM B image
    #[arg(long)]
    rom_b: Option<PathBuf>,

    /// ROM comparison table
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Region annotations of ROM A
    #[arg(long)]
    info: Option<PathBuf>,

    /// RAM comparison table
    #[arg(long)]
    ramshift: Option<PathBuf>,

    /// Recognize long calls regardless of ROM type
    #[arg(long, conflicts_with = "no_long_call")]
    long_call: bool,

    /// Never recognize long calls
    #[arg(long)]
    no_long_call: bool,

    /// Opcode that starts a long call, in hex
    #[arg(long, value_parser = parse_opcode)]
    long_call_opcode: Option<u8>,
}

impl TrimArgs {
    fn config(&self, project: &Project) -> TrimConfig {
        let mut config = if self.long_call {
            TrimConfig::default()
        } else if self.no_long_call {
            TrimConfig::without_long_call()
        } else {
            project.config()
        };
        if let (Some(opcode), false) = (self.long_call_opcode, self.no_long_call) {
            config.long_call_opcode = Some(opcode);
        }
        config
    }
}

/// Parse `C7`, `0xC7`, `$C7` or `C7h`.
fn parse_opcode(text: &str) -> Result<u8, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix('$'))
        .or_else(|| text.strip_suffix(|c: char| c == 'h' || c == 'H'))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid opcode '{}': {}", text, e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Trim(args) => run_trim(&args, cli.debug),
        Command::Split { csvfile, output } => run_split(&csvfile, output.as_deref()),
    }
}

fn read_text(path: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: Cannot read {}: {}", path.display(), e);
        ExitCode::from(3)
    })
}

fn print_warnings(warnings: &[Warning], source: &str, path: &Path) {
    let name = display_name(path);
    for warning in warnings {
        eprint!("{}", format_warning(warning, source, Some(&name)));
    }
}

fn run_trim(args: &TrimArgs, debug: bool) -> ExitCode {
    match trim(args, debug) {
        Ok(code) | Err(code) => code,
    }
}

fn trim(args: &TrimArgs, debug: bool) -> Result<ExitCode, ExitCode> {
    let project = Project::new(&args.dir, &args.romtype, &args.version_a, &args.version_b);
    let config = args.config(&project);

    let rom_a_path = args.rom_a.clone().unwrap_or_else(|| project.rom_a());
    let rom_b_path = args.rom_b.clone().unwrap_or_else(|| project.rom_b());
    let compare_path = args.compare.clone().unwrap_or_else(|| project.comparison());
    let info_path = args.info.clone().unwrap_or_else(|| project.annotations());
    let ram_path = args.ramshift.clone().unwrap_or_else(|| project.ram_comparison());
    let out_path = args.outfile.clone().unwrap_or_else(|| project.report(debug));

    let read_rom = |path: &Path| {
        RomImage::read(path).map_err(|e| {
            eprintln!("Error: Cannot read {}: {}", path.display(), e);
            ExitCode::from(3)
        })
    };
    let rom_a = read_rom(&rom_a_path)?;
    let rom_b = read_rom(&rom_b_path)?;
    info!(
        "{}: {} banks, {}: {} banks",
        display_name(&rom_a_path),
        rom_a.bank_count(),
        display_name(&rom_b_path),
        rom_b.bank_count()
    );

    let compare_text = read_text(&compare_path)?;
    let comparison = parse_comparison(&compare_text).map_err(|e| {
        let name = display_name(&compare_path);
        eprint!("{}", format_error(&e, &compare_text, Some(&name)));
        ExitCode::from(1)
    })?;
    print_warnings(&comparison.warnings, &compare_text, &compare_path);

    let ram_text = read_text(&ram_path)?;
    let ram = parse_ram_feed(&ram_text).map_err(|e| {
        let name = display_name(&ram_path);
        eprint!("{}", format_error(&e, &ram_text, Some(&name)));
        ExitCode::from(1)
    })?;
    print_warnings(&ram.warnings, &ram_text, &ram_path);

    let info_text = read_text(&info_path)?;
    let info = parse_annotations(&info_text);
    print_warnings(&info.warnings, &info_text, &info_path);

    let trimmed = bankdiff::trim(&rom_a, &rom_b, &comparison, &ram, info.annotations, config);
    for warning in trimmed.reconciliation.warnings() {
        eprint!("{}", format_warning(warning, "", None));
    }

    let mut output = String::new();
    if debug {
        output.push_str(&trimmed.debug_dump(&comparison, &ram));
    }
    output.push_str(&trimmed.report.render());

    if out_path == Path::new("-") {
        print!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(e) = std::fs::write(&out_path, output) {
        eprintln!("Error: Cannot write {}: {}", out_path.display(), e);
        return Err(ExitCode::from(1));
    }

    println!(
        "Trimmed {} -> {} ({})",
        display_name(&compare_path),
        out_path.display(),
        trimmed.report.summary()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_split(csvfile: &Path, output: Option<&Path>) -> ExitCode {
    let source = match read_text(csvfile) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let split = match split_rows(&source) {
        Ok(split) => split,
        Err(e) => {
            let name = display_name(csvfile);
            eprint!("{}", format_error(&e, &source, Some(&name)));
            return ExitCode::from(1);
        }
    };

    let out_path = output.unwrap_or(csvfile);
    if let Err(e) = std::fs::write(out_path, split) {
        eprintln!("Error: Cannot write {}: {}", out_path.display(), e);
        return ExitCode::from(1);
    }

    println!("Split {} -> {}", display_name(csvfile), out_path.display());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_opcode() {
        assert_eq!(parse_opcode("C7"), Ok(0xC7));
        assert_eq!(parse_opcode("0xcf"), Ok(0xCF));
        assert_eq!(parse_opcode("$D7"), Ok(0xD7));
        assert_eq!(parse_opcode("DFh"), Ok(0xDF));
        assert!(parse_opcode("1C7").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_long_call_flags() {
        let cli = Cli::parse_from(["bankdiff", "trim", "pokered", "10", "11", "--long-call"]);
        let Command::Trim(args) = cli.command else {
            panic!("expected trim");
        };
        let project = Project::new(".", "pokered", "10", "11");
        assert_eq!(args.config(&project), TrimConfig::default());

        let cli = Cli::parse_from(["bankdiff", "trim", "aka", "10", "11", "--no-long-call"]);
        let Command::Trim(args) = cli.command else {
            panic!("expected trim");
        };
        let project = Project::new(".", "aka", "10", "11");
        assert_eq!(args.config(&project).long_call_opcode, None);
    }
}
