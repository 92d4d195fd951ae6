//! tapstore - inspect and administer a file-backed table store

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tapstore::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
