//! Boatyard BOM - options engine and picklists for boat production

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = boatyard_bom::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
