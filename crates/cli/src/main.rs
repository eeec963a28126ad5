// Packlist CLI - carton packing reconciliation, headless

mod data;
mod exit_codes;
mod report;
mod scan;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_EXPORT, EXIT_SNAPSHOT, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "packlist")]
#[command(about = "Carton packing tracker - reconciles scans against the master manifest")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import master manifest rows from tab-separated text
    #[command(after_help = "\
Input columns (tab-separated, one carton per line):
  style  po  color  size  carton_no  qty  destination

Examples:
  packlist import manifest.tsv
  packlist import manifest.tsv --preview
  xclip -o | packlist import")]
    Import {
        /// Input file (omit to read from stdin)
        file: Option<PathBuf>,

        /// Show parsed candidate rows without merging them
        #[arg(long)]
        preview: bool,

        /// Output machine-readable JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// List master manifest records
    Master {
        /// Output JSON to stdout instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// List shippable batches (style / po / color / size groups)
    #[command(after_help = "\
Examples:
  packlist batches
  packlist batches --filter PO-771
  packlist batches --json")]
    Batches {
        /// Only batches whose style or PO contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output JSON to stdout instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Scan cartons against an active batch
    #[command(after_help = "\
The active batch is selected with --batch (an index from `packlist batches`)
or with all four of --style/--po/--color/--size. Cartons come from the
arguments, or interactively from stdin (one per line) when none are given.

Examples:
  packlist scan --batch 1 CTN-0001 CTN-0002
  packlist scan --style S1 --po PO1 --color Red --size M --line L-03
  packlist scan --batch 2 --date 2026-08-07 < scans.txt")]
    Scan {
        /// Batch index from `packlist batches` (1-based)
        #[arg(long)]
        batch: Option<usize>,

        /// Batch style (with --po, --color, --size)
        #[arg(long)]
        style: Option<String>,

        /// Batch purchase order
        #[arg(long)]
        po: Option<String>,

        /// Batch color
        #[arg(long)]
        color: Option<String>,

        /// Batch size
        #[arg(long)]
        size: Option<String>,

        /// Production line stamped on accepted scans
        #[arg(long)]
        line: Option<String>,

        /// Capture date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Output one JSON outcome per scan to stdout
        #[arg(long)]
        json: bool,

        /// Carton numbers to scan (omit for interactive stdin mode)
        cartons: Vec<String>,
    },

    /// Look up one carton across master data and the scan ledger
    Carton {
        /// Carton number (matched case-insensitively after trimming)
        carton_no: String,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Session counters: expected, packed, pending
    Status {
        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Per-batch reconciliation report (exit 3 while cartons are missing)
    #[command(after_help = "\
Examples:
  packlist report
  packlist report --filter S1
  packlist report --json | jq '.[] | select(.isComplete | not)'")]
    Report {
        /// Only batches whose style or PO contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output JSON to stdout instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Export the reconciliation report as .xlsx or .csv
    #[command(after_help = "\
Examples:
  packlist export -o Packing_Report_2026-08-07.xlsx
  packlist export -o report.csv --filter PO-771")]
    Export {
        /// Output file; format inferred from the extension
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Only batches whose style or PO contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Write a JSON backup of both record sets
    Backup {
        /// Output file (default: Backup_Packing_<date>.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace both record sets wholesale from a backup file
    Restore {
        /// Backup file produced by `packlist backup`
        file: PathBuf,
    },

    /// Clear master data and the scan ledger
    Reset {
        /// Required; reset deletes everything
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: packlist <command> [options]");
            eprintln!("       packlist --help for more information");
            Ok(())
        }
        Some(Commands::Import { file, preview, json }) => data::cmd_import(file, preview, json),
        Some(Commands::Master { json }) => data::cmd_master(json),
        Some(Commands::Batches { filter, json }) => report::cmd_batches(filter, json),
        Some(Commands::Scan {
            batch,
            style,
            po,
            color,
            size,
            line,
            date,
            json,
            cartons,
        }) => scan::cmd_scan(batch, style, po, color, size, line, date, json, cartons),
        Some(Commands::Carton { carton_no, json }) => scan::cmd_carton(carton_no, json),
        Some(Commands::Status { json }) => report::cmd_status(json),
        Some(Commands::Report { filter, json }) => report::cmd_report(filter, json),
        Some(Commands::Export { output, filter }) => report::cmd_export(output, filter),
        Some(Commands::Backup { output }) => data::cmd_backup(output),
        Some(Commands::Restore { file }) => data::cmd_restore(file),
        Some(Commands::Reset { force }) => data::cmd_reset(force),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORE, message: msg.into(), hint: None }
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SNAPSHOT, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
