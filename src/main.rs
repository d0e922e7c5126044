//! taskdraft - Extract tasks from project documents

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskdraft::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
