use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use unblack_core::io::pnm::read_pgm;
use unblack_core::sudoku::check_solution;
use unblack_cli::input::{input_name, open_input};

#[derive(Parser)]
#[command(
    name = "sudoku",
    about = "Check whether a 9x9 PGM graymap is a solved sudoku (exit 0 if solved, 1 otherwise)"
)]
#[command(version)]
struct Cli {
    /// Input PGM file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<bool> {
    let name = input_name(cli.file.as_deref());
    let reader = open_input(cli.file.as_deref())?;
    let board = read_pgm(reader).with_context(|| format!("Failed to read {name}"))?;

    match check_solution(&board) {
        Ok(()) => {
            info!(input = %name, "Board is a solved sudoku");
            Ok(true)
        }
        Err(violation) => {
            info!(input = %name, %violation, "Board is not a solved sudoku");
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    unblack_cli::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("sudoku: {err:#}");
            ExitCode::FAILURE
        }
    }
}
