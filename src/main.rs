use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use lockscan::{scan_file, DEFAULT_TOKEN_COLUMN};

/// lockscan - report the locks held in exported Flask sessions
///
/// Reads a CSV export of session records, decodes the session token in
/// each row, and prints the `locks` entry of every session that has one.
#[derive(Parser)]
#[command(name = "lockscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the exported sessions CSV (first line is a header)
    path: PathBuf,

    /// Zero-based index of the column holding the encoded token
    #[arg(long, short, default_value_t = DEFAULT_TOKEN_COLUMN)]
    column: usize,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        // Single outermost catch; diagnostics go to stdout alongside
        // whatever the scan already printed.
        println!("Unexpected error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut stdout = io::stdout();
    scan_file(&cli.path, cli.column, &mut stdout)?;
    Ok(())
}
