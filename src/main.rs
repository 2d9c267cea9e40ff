use barscan::cli::{self, ScanOptions};
use barscan::config::DEFAULT_SOURCE_PATH;
use barscan::error::ScanResult;
use barscan::types::RowBound;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "barscan")]
#[command(about = "Find one barcode in the primary and reference barcode columns of a spreadsheet")]
#[command(long_about = "Barscan - single-pass barcode lookup in a spreadsheet

Reads one worksheet read-only, from row 2 (row 1 is the header) up to the
row bound, and looks for the target barcode in:
  column B - primary barcodes (comma-separated)
  column C - reference barcodes (comma-separated), with a URL in column D

Reports the number of hits per column and previews the first 5 rows of each.

COMMANDS:
  scan  - Search the target barcode and print the report
  rows  - Count physical rows of a worksheet

EXAMPLES:
  barscan scan book.xlsx
  barscan scan book.xlsx --last-row end
  barscan rows book.xlsx

Set RUST_LOG=barscan=debug (or pass -vv) for per-match logging on stderr.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the target barcode in columns B and C
    Scan {
        /// Spreadsheet to scan (.xlsx, .xlsm, .xls, .xlsb, .ods)
        #[arg(env = "BARSCAN_FILE", default_value = DEFAULT_SOURCE_PATH)]
        file: PathBuf,

        /// Worksheet name (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Last row to scan: a row number or 'end' for the last row of the sheet
        #[arg(short = 'l', long, value_parser = parse_row_bound)]
        last_row: Option<RowBound>,

        /// YAML file overriding first_row, last_row and sheet
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Count physical rows of a worksheet
    Rows {
        /// Spreadsheet to inspect
        file: PathBuf,

        /// Worksheet name (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

fn parse_row_bound(s: &str) -> Result<RowBound, String> {
    s.parse()
}

fn run(command: Commands) -> ScanResult<()> {
    match command {
        Commands::Scan {
            file,
            sheet,
            last_row,
            config,
        } => cli::scan(ScanOptions {
            file,
            sheet,
            last_row,
            config,
        }),

        Commands::Rows { file, sheet } => cli::rows(file, sheet),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::init_tracing(cli.verbose) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}
