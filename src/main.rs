use std::process::ExitCode;

use exporteer::cli::exit::exit_status;

fn main() -> ExitCode {
    match exporteer::run() {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}
